//! Pages and their property values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{closed_enum, tagged_union, Named, NamedEntries, TaggedUnion};
use crate::models::common::is_false;
use crate::models::{
    plain_text, Block, DateValue, File, FileSource, Icon, ObjectId, ObjectRef, Parent,
    PropertyType, RichText, SelectOption, Timestamps, User,
};

closed_enum! {
    /// The result type of a formula.
    pub enum FormulaType {
        String = "string",
        Number = "number",
        Boolean = "boolean",
        Date = "date",
    }
}

closed_enum! {
    /// The result type of a rollup.
    pub enum RollupValueType {
        Number = "number",
        Date = "date",
        Array = "array",
    }
}

tagged_union! {
    /// The computed value of a formula property.
    pub enum FormulaValue(tag = FormulaType) {
        String(Option<String>),
        Number(Option<f64>),
        Boolean(Option<bool>),
        Date(Option<DateValue>),
    }
}

tagged_union! {
    /// The computed value of a rollup property.
    pub enum RollupValue(tag = RollupValueType) {
        Number(Option<f64>),
        Date(Option<DateValue>),
        /// One value per related page, for rollups that show originals.
        Array(Vec<PropertyValue>),
    }
}

tagged_union! {
    /// The value of a page property.
    ///
    /// Computed values (formulas, rollups, timestamps and authors) are read
    /// only; the API rejects updates to them.
    pub enum PropertyValue(tag = PropertyType) {
        Title(Vec<RichText>),
        RichText(Vec<RichText>),
        Number(Option<f64>),
        Select(Option<SelectOption>),
        MultiSelect(Vec<SelectOption>),
        Date(Option<DateValue>),
        People(Vec<User>),
        Files(Vec<File>),
        Checkbox(bool),
        Url(Option<String>),
        Email(Option<String>),
        PhoneNumber(Option<String>),
        Formula(FormulaValue),
        Relation(Vec<ObjectRef>),
        Rollup(RollupValue),
        CreatedTime(DateTime<Utc>),
        CreatedBy(User),
        LastEditedTime(DateTime<Utc>),
        LastEditedBy(User),
    }
}

impl PropertyValue {
    /// Returns the type of this value.
    #[must_use]
    pub fn kind(&self) -> PropertyType {
        self.tag()
    }

    /// Returns the text of title and rich text values.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Title(runs) | Self::RichText(runs) => Some(plain_text(runs)),
            _ => None,
        }
    }
}

/// A property value of a page, named by its key in [`Page::properties`].
///
/// # Example
///
/// ```rust
/// use notion_api::models::{PageProperty, PropertyValue};
///
/// let done = PageProperty::new("Done", PropertyValue::Checkbox(true));
/// let encoded = serde_json::to_value(&done).unwrap();
/// assert_eq!(encoded, serde_json::json!({"type": "checkbox", "checkbox": true}));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageProperty {
    /// The property name, taken from its key in the page's property map.
    #[serde(skip)]
    pub name: String,
    /// The property id assigned by Notion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The typed value.
    #[serde(flatten)]
    pub value: PropertyValue,
}

impl PageProperty {
    /// A new property value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            id: None,
            value,
        }
    }
}

impl Named for PageProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// A page.
///
/// `children` is only sent when creating a page. Fetched pages get their
/// content through
/// [`NotionClient::get_page_and_children`](crate::NotionClient::get_page_and_children).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Absent on pages that have not been created yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Creation and last edit times.
    #[serde(flatten)]
    pub timestamps: Timestamps,
    /// Whether the page has been archived.
    #[serde(default, skip_serializing_if = "is_false")]
    pub archived: bool,
    /// Where the page lives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    /// Property values keyed by property name.
    #[serde(default)]
    pub properties: NamedEntries<PageProperty>,
    /// The page icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// The page cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<FileSource>,
    /// The page's public Notion URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Content blocks sent on creation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl Page {
    /// A new page under `parent`, ready for
    /// [`NotionClient::create_page`](crate::NotionClient::create_page).
    #[must_use]
    pub fn new(parent: Parent) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    /// Returns the value of the named property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name).map(|property| &property.value)
    }

    /// Sets a property, replacing any existing value of the same name.
    pub fn set_property(&mut self, name: impl Into<String>, value: PropertyValue) {
        let name = name.into();
        match self.properties.get_mut(&name) {
            Some(existing) => existing.value = value,
            None => self.properties.push(PageProperty::new(name, value)),
        }
    }

    /// Returns the page title as plain text.
    ///
    /// Every page has exactly one title property, whatever its name.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.properties
            .iter()
            .find(|property| property.value.kind() == PropertyType::Title)
            .and_then(|property| property.value.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "object": "page",
            "id": "b55c9c91-384d-452b-81db-d1ef79372b75",
            "created_time": "2020-03-17T19:10:04.968Z",
            "last_edited_time": "2020-03-17T21:49:37.913Z",
            "archived": false,
            "parent": {"type": "database_id", "database_id": "48f8fee9-cd79-4180-bc2f-ec0398253067"},
            "url": "https://www.notion.so/Tuscan-Kale-b55c9c91384d452b81dbd1ef79372b75",
            "properties": {
                "Name": {"id": "title", "type": "title", "title": [
                    {"type": "text", "text": {"content": "Tuscan Kale"}, "plain_text": "Tuscan Kale"}
                ]},
                "In stock": {"id": "{>U;", "type": "checkbox", "checkbox": false},
                "Price": {"id": "BJXS", "type": "number", "number": 2.5},
                "Store": {"id": "Bn%3D", "type": "select", "select": null},
                "Cost": {"id": "WOd%3B", "type": "formula", "formula": {"type": "number", "number": 2.5}},
                "Meals": {"id": "lV]M", "type": "relation", "relation": [
                    {"id": "2b4c8c5a-6a8b-4f44-8a6d-4b1c6e3b8f2e"}
                ]},
                "Recipes": {"id": "r%3Bt", "type": "rollup", "rollup": {"type": "array", "array": [
                    {"type": "number", "number": 3}
                ]}},
                "Added": {"id": "ct", "type": "created_time", "created_time": "2020-03-17T19:10:04.968Z"}
            }
        })
    }

    #[test]
    fn test_page_decodes_property_values() {
        let page: Page = serde_json::from_value(sample()).unwrap();

        assert_eq!(page.title().as_deref(), Some("Tuscan Kale"));
        assert_eq!(page.property("In stock"), Some(&PropertyValue::Checkbox(false)));
        assert_eq!(page.property("Price"), Some(&PropertyValue::Number(Some(2.5))));
        assert_eq!(page.property("Store"), Some(&PropertyValue::Select(None)));
        assert_eq!(
            page.property("Cost"),
            Some(&PropertyValue::Formula(FormulaValue::Number(Some(2.5))))
        );
        assert!(matches!(page.parent, Some(Parent::DatabaseId(_))));
    }

    #[test]
    fn test_rollup_array_holds_nested_values() {
        let page: Page = serde_json::from_value(sample()).unwrap();
        let Some(PropertyValue::Rollup(RollupValue::Array(values))) = page.property("Recipes") else {
            panic!("expected an array rollup");
        };
        assert_eq!(values, &vec![PropertyValue::Number(Some(3.0))]);
    }

    #[test]
    fn test_property_names_come_from_keys() {
        let page: Page = serde_json::from_value(sample()).unwrap();
        let mut names: Vec<&str> = page.properties.iter().map(|property| property.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec!["Added", "Cost", "In stock", "Meals", "Name", "Price", "Recipes", "Store"]
        );
    }

    #[test]
    fn test_new_page_encodes_parent_and_properties() {
        let parent = Parent::DatabaseId("48f8fee9-cd79-4180-bc2f-ec0398253067".parse().unwrap());
        let mut page = Page::new(parent);
        page.set_property("Done", PropertyValue::Checkbox(true));
        page.set_property("Done", PropertyValue::Checkbox(false));

        let encoded = serde_json::to_value(&page).unwrap();
        assert_eq!(
            encoded,
            json!({
                "parent": {"type": "database_id", "database_id": "48f8fee9-cd79-4180-bc2f-ec0398253067"},
                "properties": {"Done": {"type": "checkbox", "checkbox": false}}
            })
        );
    }

    #[test]
    fn test_clearing_a_number_encodes_null() {
        let property = PageProperty::new("Price", PropertyValue::Number(None));
        assert_eq!(
            serde_json::to_value(&property).unwrap(),
            json!({"type": "number", "number": null})
        );
    }

    #[test]
    fn test_unknown_formula_type_is_rejected() {
        let result = serde_json::from_value::<PropertyValue>(json!({
            "type": "formula", "formula": {"type": "complex", "complex": "1+i"}
        }));
        assert!(result.is_err());
    }
}
