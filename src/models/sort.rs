//! Result ordering for queries and search.

use serde::{Deserialize, Serialize};

use crate::codec::closed_enum;

closed_enum! {
    /// Object timestamps that results can be ordered by.
    pub enum SortTimestamp {
        CreatedTime = "created_time",
        LastEditedTime = "last_edited_time",
    }
}

closed_enum! {
    #[derive(Default)]
    pub enum SortDirection {
        #[default]
        Ascending = "ascending",
        Descending = "descending",
    }
}

/// One sort key. Set either `property` or `timestamp`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// The property to order by. Exclusive with `timestamp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// The timestamp to order by. Exclusive with `property`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<SortTimestamp>,
    /// Ascending or descending.
    #[serde(default)]
    pub direction: SortDirection,
}

impl Sort {
    /// Orders by a database property.
    #[must_use]
    pub fn by_property(property: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            property: Some(property.into()),
            timestamp: None,
            direction,
        }
    }

    /// Orders by an object timestamp.
    #[must_use]
    pub const fn by_timestamp(timestamp: SortTimestamp, direction: SortDirection) -> Self {
        Self {
            property: None,
            timestamp: Some(timestamp),
            direction,
        }
    }
}
