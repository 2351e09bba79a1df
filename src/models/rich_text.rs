//! Rich text runs.

use serde::{Deserialize, Serialize};

use crate::codec::{closed_enum, tagged_union};
use crate::models::{DateValue, ObjectRef, User};

closed_enum! {
    /// The kind of a rich text run.
    pub enum RichTextType {
        Text = "text",
        Mention = "mention",
        Equation = "equation",
    }
}

closed_enum! {
    /// Text and background colors for annotations.
    #[derive(Default)]
    pub enum AnnotationColor {
        #[default]
        Default = "default",
        Gray = "gray",
        Brown = "brown",
        Orange = "orange",
        Yellow = "yellow",
        Green = "green",
        Blue = "blue",
        Purple = "purple",
        Pink = "pink",
        Red = "red",
        GrayBackground = "gray_background",
        BrownBackground = "brown_background",
        OrangeBackground = "orange_background",
        YellowBackground = "yellow_background",
        GreenBackground = "green_background",
        BlueBackground = "blue_background",
        PurpleBackground = "purple_background",
        PinkBackground = "pink_background",
        RedBackground = "red_background",
    }
}

closed_enum! {
    /// The kind of object a mention points at.
    pub enum MentionType {
        User = "user",
        Page = "page",
        Database = "database",
        Date = "date",
    }
}

/// Styling applied to a rich text run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    /// Bold text.
    pub bold: bool,
    /// Italic text.
    pub italic: bool,
    /// Struck-through text.
    pub strikethrough: bool,
    /// Underlined text.
    pub underline: bool,
    /// Inline code.
    pub code: bool,
    /// Text or background color.
    pub color: AnnotationColor,
}

/// A hyperlink target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The link target.
    pub url: String,
}

/// The payload of a plain text run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    /// The text itself.
    pub content: String,
    /// An optional hyperlink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

/// The payload of an inline equation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    /// A KaTeX expression.
    pub expression: String,
}

tagged_union! {
    /// An inline mention.
    pub enum Mention(tag = MentionType) {
        User(User),
        Page(ObjectRef),
        Database(ObjectRef),
        Date(DateValue),
    }
}

tagged_union! {
    /// The content of a rich text run.
    pub enum RichTextBody(tag = RichTextType) {
        Text(TextContent),
        Mention(Mention),
        Equation(Equation),
    }
}

/// One styled run of rich text.
///
/// # Example
///
/// ```rust
/// use notion_api::models::{RichText, RichTextBody};
/// use serde_json::json;
///
/// let run: RichText = serde_json::from_value(json!({
///     "type": "text",
///     "text": {"content": "Hello", "link": null},
///     "annotations": {"bold": true, "italic": false, "strikethrough": false,
///                     "underline": false, "code": false, "color": "default"},
///     "plain_text": "Hello",
///     "href": null
/// }))
/// .unwrap();
///
/// assert!(run.annotations.bold);
/// assert!(matches!(run.body, RichTextBody::Text(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    /// The run type and its content.
    #[serde(flatten)]
    pub body: RichTextBody,
    /// Styling applied to the run.
    #[serde(default)]
    pub annotations: Annotations,
    /// The text without styling, as rendered by the API.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plain_text: String,
    /// The URL of a link or mention, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl RichText {
    /// An unstyled text run.
    #[must_use]
    pub fn plain(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            body: RichTextBody::Text(TextContent {
                content: content.clone(),
                link: None,
            }),
            annotations: Annotations::default(),
            plain_text: content,
            href: None,
        }
    }

    /// Returns the text of this run. Falls back to the text payload when
    /// `plain_text` was not supplied.
    #[must_use]
    pub fn text(&self) -> &str {
        match &self.body {
            RichTextBody::Text(text) if self.plain_text.is_empty() => &text.content,
            _ => &self.plain_text,
        }
    }
}

/// Concatenates the text of a sequence of runs.
#[must_use]
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(RichText::text).collect()
}
