//! Databases and their property schema.

use serde::{Deserialize, Serialize};

use crate::codec::{closed_enum, tagged_union, Named, NamedEntries, TaggedUnion};
use crate::models::{plain_text, Block, Empty, FileSource, Icon, ObjectId, Parent, RichText, Timestamps};

closed_enum! {
    /// The type of a database property, shared by schema entries and page
    /// property values.
    pub enum PropertyType {
        Title = "title",
        RichText = "rich_text",
        Number = "number",
        Select = "select",
        MultiSelect = "multi_select",
        Date = "date",
        People = "people",
        Files = "files",
        Checkbox = "checkbox",
        Url = "url",
        Email = "email",
        PhoneNumber = "phone_number",
        Formula = "formula",
        Relation = "relation",
        Rollup = "rollup",
        CreatedTime = "created_time",
        CreatedBy = "created_by",
        LastEditedTime = "last_edited_time",
        LastEditedBy = "last_edited_by",
    }
}

closed_enum! {
    /// Display format of a number property.
    #[derive(Default)]
    pub enum NumberFormat {
        #[default]
        Number = "number",
        NumberWithCommas = "number_with_commas",
        Percent = "percent",
        Dollar = "dollar",
        Euro = "euro",
        Pound = "pound",
        Yen = "yen",
        Ruble = "ruble",
        Rupee = "rupee",
        Won = "won",
        Yuan = "yuan",
    }
}

closed_enum! {
    /// Color of a select option.
    #[derive(Default)]
    pub enum SelectColor {
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
    }
}

closed_enum! {
    /// Aggregation applied by a rollup property.
    pub enum RollupFunction {
        CountAll = "count_all",
        CountValues = "count_values",
        CountUniqueValues = "count_unique_values",
        CountEmpty = "count_empty",
        CountNotEmpty = "count_not_empty",
        PercentEmpty = "percent_empty",
        PercentNotEmpty = "percent_not_empty",
        Sum = "sum",
        Average = "average",
        Median = "median",
        Min = "min",
        Max = "max",
        Range = "range",
    }
}

/// One option of a select or multi-select property.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// The option id assigned by Notion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The option label.
    pub name: String,
    /// The option color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<SelectColor>,
}

impl SelectOption {
    /// An option referenced by name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberConfig {
    /// How numbers are displayed.
    #[serde(default)]
    pub format: NumberFormat,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectConfig {
    /// The available options.
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaConfig {
    /// The formula source.
    #[serde(default)]
    pub expression: String,
}

/// Links a property to another database.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationConfig {
    /// The related database.
    pub database_id: ObjectId,
    /// The name of the mirrored property in the related database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_property_name: Option<String>,
    /// The id of the mirrored property in the related database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_property_id: Option<String>,
}

/// Aggregates a property of related pages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupConfig {
    /// The relation property to roll up through, by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_property_name: Option<String>,
    /// The relation property to roll up through, by id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_property_id: Option<String>,
    /// The property of related pages to aggregate, by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollup_property_name: Option<String>,
    /// The property of related pages to aggregate, by id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollup_property_id: Option<String>,
    /// The aggregation applied.
    pub function: RollupFunction,
}

tagged_union! {
    /// The type-specific configuration of a database property.
    pub enum PropertyConfig(tag = PropertyType) {
        Title(Empty),
        RichText(Empty),
        Number(NumberConfig),
        Select(SelectConfig),
        MultiSelect(SelectConfig),
        Date(Empty),
        People(Empty),
        Files(Empty),
        Checkbox(Empty),
        Url(Empty),
        Email(Empty),
        PhoneNumber(Empty),
        Formula(FormulaConfig),
        Relation(RelationConfig),
        Rollup(RollupConfig),
        CreatedTime(Empty),
        CreatedBy(Empty),
        LastEditedTime(Empty),
        LastEditedBy(Empty),
    }
}

/// One column of a database schema.
///
/// The name is the key the property is stored under in
/// [`Database::properties`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatabaseProperty {
    /// The property name, taken from its key in the schema.
    #[serde(skip)]
    pub name: String,
    /// The property id assigned by Notion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The property type and its settings.
    #[serde(flatten)]
    pub config: PropertyConfig,
}

impl DatabaseProperty {
    /// A new schema entry.
    #[must_use]
    pub fn new(name: impl Into<String>, config: PropertyConfig) -> Self {
        Self {
            name: name.into(),
            id: None,
            config,
        }
    }

    /// Returns the type of this property.
    #[must_use]
    pub fn kind(&self) -> PropertyType {
        self.config.tag()
    }
}

impl Named for DatabaseProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// A database.
///
/// `children` is never sent or received on the wire; it is filled by
/// [`NotionClient::get_database_and_children`](crate::NotionClient::get_database_and_children).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    /// Absent on databases that have not been created yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Creation and last edit times.
    #[serde(flatten)]
    pub timestamps: Timestamps,
    /// The database title.
    #[serde(default)]
    pub title: Vec<RichText>,
    /// The property schema keyed by property name.
    #[serde(default)]
    pub properties: NamedEntries<DatabaseProperty>,
    /// Where the database lives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
    /// The database icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// The database cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<FileSource>,
    /// The database's public Notion URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Content blocks sent on creation.
    #[serde(skip)]
    pub children: Vec<Block>,
}

impl Database {
    /// Returns the title as plain text.
    #[must_use]
    pub fn title_text(&self) -> String {
        plain_text(&self.title)
    }

    /// Returns the schema entry with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&DatabaseProperty> {
        self.properties.get(name)
    }
}
