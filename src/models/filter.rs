//! Database query filters and search filters.
//!
//! A property filter names the property and carries one condition keyed by
//! the property's kind, with the comparison nested one level deeper:
//!
//! ```json
//! { "property": "In stock", "checkbox": { "equals": true } }
//! ```
//!
//! Neither level has a `type` field; the condition unions are declared
//! `implied` so the present key selects the variant.
//!
//! # Example
//!
//! ```rust
//! use notion_api::models::{Filter, NumberFilter, PropertyCondition, TextFilter};
//! use serde_json::json;
//!
//! let filter = Filter::and(vec![
//!     Filter::property("Name", PropertyCondition::Text(TextFilter::Contains("kale".into()))),
//!     Filter::property("Price", PropertyCondition::Number(NumberFilter::LessThan(5.0))),
//! ]);
//!
//! assert_eq!(
//!     serde_json::to_value(&filter).unwrap(),
//!     json!({"and": [
//!         {"property": "Name", "text": {"contains": "kale"}},
//!         {"property": "Price", "number": {"less_than": 5.0}}
//!     ]})
//! );
//! ```

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::codec::{closed_enum, tagged_union};
use crate::models::{DateOrDateTime, Empty, ObjectId};

closed_enum! {
    /// The property kind a filter condition applies to.
    pub enum FilterConditionType {
        Text = "text",
        Number = "number",
        Checkbox = "checkbox",
        Select = "select",
        MultiSelect = "multi_select",
        Date = "date",
        People = "people",
        Files = "files",
        Relation = "relation",
        Formula = "formula",
    }
}

closed_enum! {
    /// Comparisons available on text-like properties.
    pub enum TextCondition {
        Equals = "equals",
        DoesNotEqual = "does_not_equal",
        Contains = "contains",
        DoesNotContain = "does_not_contain",
        StartsWith = "starts_with",
        EndsWith = "ends_with",
        IsEmpty = "is_empty",
        IsNotEmpty = "is_not_empty",
    }
}

closed_enum! {
    /// Comparisons available on number properties.
    pub enum NumberCondition {
        Equals = "equals",
        DoesNotEqual = "does_not_equal",
        GreaterThan = "greater_than",
        LessThan = "less_than",
        GreaterThanOrEqualTo = "greater_than_or_equal_to",
        LessThanOrEqualTo = "less_than_or_equal_to",
        IsEmpty = "is_empty",
        IsNotEmpty = "is_not_empty",
    }
}

closed_enum! {
    /// Comparisons available on checkbox properties.
    pub enum CheckboxCondition {
        Equals = "equals",
        DoesNotEqual = "does_not_equal",
    }
}

closed_enum! {
    /// Comparisons available on select properties.
    pub enum SelectCondition {
        Equals = "equals",
        DoesNotEqual = "does_not_equal",
        IsEmpty = "is_empty",
        IsNotEmpty = "is_not_empty",
    }
}

closed_enum! {
    /// Comparisons available on multi-select properties.
    pub enum MultiSelectCondition {
        Contains = "contains",
        DoesNotContain = "does_not_contain",
        IsEmpty = "is_empty",
        IsNotEmpty = "is_not_empty",
    }
}

closed_enum! {
    /// Comparisons available on date properties, including relative ranges.
    pub enum DateCondition {
        Equals = "equals",
        Before = "before",
        After = "after",
        OnOrBefore = "on_or_before",
        OnOrAfter = "on_or_after",
        IsEmpty = "is_empty",
        IsNotEmpty = "is_not_empty",
        PastWeek = "past_week",
        PastMonth = "past_month",
        PastYear = "past_year",
        NextWeek = "next_week",
        NextMonth = "next_month",
        NextYear = "next_year",
    }
}

closed_enum! {
    /// Comparisons available on people properties.
    pub enum PeopleCondition {
        Contains = "contains",
        DoesNotContain = "does_not_contain",
        IsEmpty = "is_empty",
        IsNotEmpty = "is_not_empty",
    }
}

closed_enum! {
    /// Comparisons available on files properties.
    pub enum FilesCondition {
        IsEmpty = "is_empty",
        IsNotEmpty = "is_not_empty",
    }
}

closed_enum! {
    /// Comparisons available on relation properties.
    pub enum RelationCondition {
        Contains = "contains",
        DoesNotContain = "does_not_contain",
        IsEmpty = "is_empty",
        IsNotEmpty = "is_not_empty",
    }
}

closed_enum! {
    /// The result type a formula condition compares against.
    pub enum FormulaCondition {
        Text = "text",
        Checkbox = "checkbox",
        Number = "number",
        Date = "date",
    }
}

tagged_union! {
    /// A condition on a title, rich text, url, email or phone property.
    pub enum TextFilter(tag = TextCondition, implied) {
        Equals(String),
        DoesNotEqual(String),
        Contains(String),
        DoesNotContain(String),
        StartsWith(String),
        EndsWith(String),
        IsEmpty(bool),
        IsNotEmpty(bool),
    }
}

tagged_union! {
    /// A condition on a number property.
    pub enum NumberFilter(tag = NumberCondition, implied) {
        Equals(f64),
        DoesNotEqual(f64),
        GreaterThan(f64),
        LessThan(f64),
        GreaterThanOrEqualTo(f64),
        LessThanOrEqualTo(f64),
        IsEmpty(bool),
        IsNotEmpty(bool),
    }
}

tagged_union! {
    /// A condition on a checkbox property.
    pub enum CheckboxFilter(tag = CheckboxCondition, implied) {
        Equals(bool),
        DoesNotEqual(bool),
    }
}

tagged_union! {
    /// A condition on a select property, compared by option name.
    pub enum SelectFilter(tag = SelectCondition, implied) {
        Equals(String),
        DoesNotEqual(String),
        IsEmpty(bool),
        IsNotEmpty(bool),
    }
}

tagged_union! {
    /// A condition on a multi-select property, compared by option name.
    pub enum MultiSelectFilter(tag = MultiSelectCondition, implied) {
        Contains(String),
        DoesNotContain(String),
        IsEmpty(bool),
        IsNotEmpty(bool),
    }
}

tagged_union! {
    /// A condition on a date, created time or last edited time property.
    pub enum DateFilter(tag = DateCondition, implied) {
        Equals(DateOrDateTime),
        Before(DateOrDateTime),
        After(DateOrDateTime),
        OnOrBefore(DateOrDateTime),
        OnOrAfter(DateOrDateTime),
        IsEmpty(bool),
        IsNotEmpty(bool),
        PastWeek(Empty),
        PastMonth(Empty),
        PastYear(Empty),
        NextWeek(Empty),
        NextMonth(Empty),
        NextYear(Empty),
    }
}

tagged_union! {
    /// A condition on a people, created by or last edited by property.
    pub enum PeopleFilter(tag = PeopleCondition, implied) {
        Contains(ObjectId),
        DoesNotContain(ObjectId),
        IsEmpty(bool),
        IsNotEmpty(bool),
    }
}

tagged_union! {
    /// A condition on a files property.
    pub enum FilesFilter(tag = FilesCondition, implied) {
        IsEmpty(bool),
        IsNotEmpty(bool),
    }
}

tagged_union! {
    /// A condition on a relation property.
    pub enum RelationFilter(tag = RelationCondition, implied) {
        Contains(ObjectId),
        DoesNotContain(ObjectId),
        IsEmpty(bool),
        IsNotEmpty(bool),
    }
}

tagged_union! {
    /// A condition on the result of a formula property.
    pub enum FormulaFilter(tag = FormulaCondition, implied) {
        Text(TextFilter),
        Checkbox(CheckboxFilter),
        Number(NumberFilter),
        Date(DateFilter),
    }
}

tagged_union! {
    /// The condition of a property filter, keyed by property kind.
    pub enum PropertyCondition(tag = FilterConditionType, implied) {
        Text(TextFilter),
        Number(NumberFilter),
        Checkbox(CheckboxFilter),
        Select(SelectFilter),
        MultiSelect(MultiSelectFilter),
        Date(DateFilter),
        People(PeopleFilter),
        Files(FilesFilter),
        Relation(RelationFilter),
        Formula(FormulaFilter),
    }
}

/// A condition on one named property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// The property name or ID.
    pub property: String,
    /// The condition, keyed by property kind.
    #[serde(flatten)]
    pub condition: PropertyCondition,
}

/// A database query filter.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// A condition on a single property.
    Property(PropertyFilter),
    /// Matches when any nested filter matches.
    Or(Vec<Filter>),
    /// Matches when every nested filter matches.
    And(Vec<Filter>),
}

impl Filter {
    /// A filter on one property.
    #[must_use]
    pub fn property(name: impl Into<String>, condition: PropertyCondition) -> Self {
        Self::Property(PropertyFilter {
            property: name.into(),
            condition,
        })
    }

    /// Matches when any of `filters` matches.
    #[must_use]
    pub const fn or(filters: Vec<Self>) -> Self {
        Self::Or(filters)
    }

    /// Matches when all of `filters` match.
    #[must_use]
    pub const fn and(filters: Vec<Self>) -> Self {
        Self::And(filters)
    }
}

impl From<PropertyFilter> for Filter {
    fn from(filter: PropertyFilter) -> Self {
        Self::Property(filter)
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        match self {
            Self::Property(filter) => filter.serialize(serializer),
            Self::Or(filters) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("or", filters)?;
                map.end()
            }
            Self::And(filters) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("and", filters)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;

        if let Some(filters) = map.remove("or") {
            return serde_json::from_value(filters).map(Self::Or).map_err(de::Error::custom);
        }
        if let Some(filters) = map.remove("and") {
            return serde_json::from_value(filters).map(Self::And).map_err(de::Error::custom);
        }
        serde_json::from_value(Value::Object(map))
            .map(Self::Property)
            .map_err(de::Error::custom)
    }
}

closed_enum! {
    /// The object kinds a search can be restricted to.
    pub enum ObjectKind {
        Page = "page",
        Database = "database",
    }
}

/// Restricts search results to one object kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// The object kind to keep.
    pub value: ObjectKind,
    /// Always `"object"`.
    pub property: String,
}

impl SearchFilter {
    /// Only return objects of the given kind.
    #[must_use]
    pub fn object(kind: ObjectKind) -> Self {
        Self {
            value: kind,
            property: "object".to_string(),
        }
    }
}
