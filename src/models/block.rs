//! Content blocks.
//!
//! A [`Block`] carries its id, timestamps and child flag beside a
//! [`BlockBody`] selected by the block's `type`:
//!
//! ```json
//! {
//!   "object": "block",
//!   "id": "9bc30ad4-9373-46a5-84ab-0a7845ee52e6",
//!   "has_children": false,
//!   "type": "to_do",
//!   "to_do": { "text": [], "checked": true }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::codec::{closed_enum, tagged_union, TaggedUnion};
use crate::models::common::is_false;
use crate::models::{Empty, ObjectId, RichText, Timestamps};

closed_enum! {
    /// The kind of a block.
    pub enum BlockType {
        Paragraph = "paragraph",
        Heading1 = "heading_1",
        Heading2 = "heading_2",
        Heading3 = "heading_3",
        BulletedListItem = "bulleted_list_item",
        NumberedListItem = "numbered_list_item",
        ToDo = "to_do",
        Toggle = "toggle",
        ChildPage = "child_page",
        Unsupported = "unsupported",
    }
}

/// A block holding a run of rich text and optional nested blocks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// The block's rich text.
    #[serde(default)]
    pub text: Vec<RichText>,
    /// Nested blocks. Only populated when creating blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// A checklist item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ToDoBlock {
    /// The item's rich text.
    #[serde(default)]
    pub text: Vec<RichText>,
    /// Whether the item is ticked.
    #[serde(default)]
    pub checked: bool,
    /// Nested blocks. Only populated when creating blocks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// A sub-page shown as a block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildPageBlock {
    /// The sub-page's title as plain text.
    pub title: String,
}

tagged_union! {
    /// The type-specific part of a block.
    pub enum BlockBody(tag = BlockType) {
        Paragraph(TextBlock),
        Heading1(TextBlock),
        Heading2(TextBlock),
        Heading3(TextBlock),
        BulletedListItem(TextBlock),
        NumberedListItem(TextBlock),
        ToDo(ToDoBlock),
        Toggle(TextBlock),
        ChildPage(ChildPageBlock),
        Unsupported(Empty),
    }
}

/// A block of page content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Absent on blocks that have not been created yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Creation and last edit times.
    #[serde(flatten)]
    pub timestamps: Timestamps,
    /// Whether the block has nested blocks to fetch.
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_children: bool,
    /// Whether the block has been archived.
    #[serde(default, skip_serializing_if = "is_false")]
    pub archived: bool,
    /// The type tag and type-specific content.
    #[serde(flatten)]
    pub body: BlockBody,
}

impl Block {
    /// A new block with the given body.
    #[must_use]
    pub fn new(body: BlockBody) -> Self {
        Self {
            id: None,
            timestamps: Timestamps::default(),
            has_children: false,
            archived: false,
            body,
        }
    }

    /// A new paragraph.
    #[must_use]
    pub fn paragraph(text: Vec<RichText>) -> Self {
        Self::new(BlockBody::Paragraph(TextBlock {
            text,
            children: Vec::new(),
        }))
    }

    /// A new checklist item.
    #[must_use]
    pub fn to_do(text: Vec<RichText>, checked: bool) -> Self {
        Self::new(BlockBody::ToDo(ToDoBlock {
            text,
            checked,
            children: Vec::new(),
        }))
    }

    /// Returns the kind of this block.
    #[must_use]
    pub fn kind(&self) -> BlockType {
        self.body.tag()
    }

    /// Returns the rich text of text-bearing blocks.
    #[must_use]
    pub fn text(&self) -> Option<&[RichText]> {
        match &self.body {
            BlockBody::Paragraph(block)
            | BlockBody::Heading1(block)
            | BlockBody::Heading2(block)
            | BlockBody::Heading3(block)
            | BlockBody::BulletedListItem(block)
            | BlockBody::NumberedListItem(block)
            | BlockBody::Toggle(block) => Some(&block.text),
            BlockBody::ToDo(block) => Some(&block.text),
            BlockBody::ChildPage(_) | BlockBody::Unsupported(_) => None,
        }
    }

    /// Returns the nested blocks carried in the body.
    #[must_use]
    pub fn children(&self) -> &[Block] {
        match &self.body {
            BlockBody::Paragraph(block)
            | BlockBody::Heading1(block)
            | BlockBody::Heading2(block)
            | BlockBody::Heading3(block)
            | BlockBody::BulletedListItem(block)
            | BlockBody::NumberedListItem(block)
            | BlockBody::Toggle(block) => &block.children,
            BlockBody::ToDo(block) => &block.children,
            BlockBody::ChildPage(_) | BlockBody::Unsupported(_) => &[],
        }
    }

    /// Returns whether a checklist item is checked.
    #[must_use]
    pub const fn is_checked(&self) -> Option<bool> {
        match &self.body {
            BlockBody::ToDo(block) => Some(block.checked),
            _ => None,
        }
    }

    /// Returns the title of a child page block.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match &self.body {
            BlockBody::ChildPage(block) => Some(&block.title),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_do_block_decodes() {
        let block: Block = serde_json::from_value(json!({
            "object": "block",
            "id": "9bc30ad4-9373-46a5-84ab-0a7845ee52e6",
            "created_time": "2021-03-16T16:31:00Z",
            "last_edited_time": "2021-03-16T16:32:00Z",
            "has_children": false,
            "type": "to_do",
            "to_do": {
                "text": [{"type": "text", "text": {"content": "Lacinato kale"}, "plain_text": "Lacinato kale"}],
                "checked": true
            }
        }))
        .unwrap();

        assert_eq!(block.kind(), BlockType::ToDo);
        assert_eq!(block.is_checked(), Some(true));
        assert_eq!(block.text().unwrap()[0].text(), "Lacinato kale");
        assert!(block.timestamps.created_time.is_some());
    }

    #[test]
    fn test_child_page_title() {
        let block: Block = serde_json::from_value(json!({
            "id": "9bc30ad4-9373-46a5-84ab-0a7845ee52e6",
            "has_children": true,
            "type": "child_page",
            "child_page": {"title": "Meeting notes"}
        }))
        .unwrap();

        assert_eq!(block.title(), Some("Meeting notes"));
        assert!(block.has_children);
        assert!(block.text().is_none());
    }

    #[test]
    fn test_new_paragraph_encodes_without_server_fields() {
        let block = Block::paragraph(vec![RichText::plain("hi")]);
        let encoded = serde_json::to_value(&block).unwrap();
        assert_eq!(
            encoded,
            json!({
                "type": "paragraph",
                "paragraph": {"text": [{
                    "type": "text",
                    "text": {"content": "hi"},
                    "annotations": {"bold": false, "italic": false, "strikethrough": false,
                                    "underline": false, "code": false, "color": "default"},
                    "plain_text": "hi"
                }]}
            })
        );
    }

    #[test]
    fn test_round_trip_keeps_nested_children() {
        let mut parent = Block::new(BlockBody::Toggle(TextBlock {
            text: vec![RichText::plain("More")],
            children: vec![Block::to_do(vec![RichText::plain("nested")], false)],
        }));
        parent.has_children = true;

        let decoded: Block =
            serde_json::from_value(serde_json::to_value(&parent).unwrap()).unwrap();
        assert_eq!(decoded, parent);
        assert_eq!(decoded.children().len(), 1);
    }

    #[test]
    fn test_unknown_block_type_is_rejected() {
        let result = serde_json::from_value::<Block>(json!({"type": "carousel", "carousel": {}}));
        assert!(result.unwrap_err().to_string().contains("BlockType"));
    }

    #[test]
    fn test_unsupported_block_without_payload() {
        let block: Block = serde_json::from_value(json!({"type": "unsupported"})).unwrap();
        assert_eq!(block.kind(), BlockType::Unsupported);
    }
}
