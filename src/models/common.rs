//! Value types shared across the object model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use url::Url;
use uuid::Uuid;

use crate::codec::{closed_enum, tagged_union};

/// The identifier of a block, page, database or user.
///
/// Accepts both the hyphenated and the compact 32-digit form and always
/// renders hyphenated.
///
/// # Example
///
/// ```rust
/// use notion_api::models::ObjectId;
///
/// let id: ObjectId = "c0ba6b0e3c4f4a8e9c5b2b1d0f2e1a3b".parse().unwrap();
/// assert_eq!(id.to_string(), "c0ba6b0e-3c4f-4a8e-9c5b-2b1d0f2e1a3b");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Wraps a UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ObjectId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for ObjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A reference to another object by id, as in `{"id": "..."}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    /// The referenced object.
    pub id: ObjectId,
}

impl From<ObjectId> for ObjectRef {
    fn from(id: ObjectId) -> Self {
        Self { id }
    }
}

/// An empty payload object, `{}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) const fn is_false(value: &bool) -> bool {
    !*value
}

/// Creation and last-edit times of an object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    /// When the object was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    /// When the object was last edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<DateTime<Utc>>,
}

/// One bound of a [`DateValue`]: a calendar date or a full timestamp.
///
/// The wire form is a single string. Strings containing `T` are RFC 3339
/// timestamps, anything else is `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateOrDateTime {
    /// A date without a time of day.
    Date(NaiveDate),
    /// A date with a time of day and offset.
    DateTime(DateTime<FixedOffset>),
}

impl DateOrDateTime {
    /// Returns `true` if this bound carries a time of day.
    #[must_use]
    pub const fn has_time(&self) -> bool {
        matches!(self, Self::DateTime(_))
    }

    /// Returns the calendar date of this bound.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(date) => *date,
            Self::DateTime(datetime) => datetime.date_naive(),
        }
    }
}

impl FromStr for DateOrDateTime {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('T') {
            DateTime::parse_from_rfc3339(s).map(Self::DateTime)
        } else {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self::Date)
        }
    }
}

impl fmt::Display for DateOrDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::DateTime(datetime) => f.write_str(&datetime.to_rfc3339()),
        }
    }
}

impl From<NaiveDate> for DateOrDateTime {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<DateTime<Utc>> for DateOrDateTime {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::DateTime(datetime.fixed_offset())
    }
}

impl Serialize for DateOrDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateOrDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// A date or date range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    /// The start of the range, or the single date.
    pub start: DateOrDateTime,
    /// The end of the range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateOrDateTime>,
}

impl DateValue {
    /// A single date with no end.
    #[must_use]
    pub fn on(start: impl Into<DateOrDateTime>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    /// Returns `true` if either bound carries a time of day.
    #[must_use]
    pub fn has_time(&self) -> bool {
        self.start.has_time() || self.end.is_some_and(|end| end.has_time())
    }
}

closed_enum! {
    /// The kind of object a page or database lives under.
    pub enum ParentType {
        Workspace = "workspace",
        PageId = "page_id",
        DatabaseId = "database_id",
    }
}

tagged_union! {
    /// The parent of a page or database.
    pub enum Parent(tag = ParentType) {
        /// Top level of the workspace. The payload is always `true`.
        Workspace(bool),
        /// Nested under a page.
        PageId(ObjectId),
        /// A row of a database.
        DatabaseId(ObjectId),
    }
}

impl Parent {
    /// The workspace root.
    #[must_use]
    pub const fn workspace() -> Self {
        Self::Workspace(true)
    }

    /// Returns the parent object's id, if it has one.
    #[must_use]
    pub const fn id(&self) -> Option<ObjectId> {
        match self {
            Self::Workspace(_) => None,
            Self::PageId(id) | Self::DatabaseId(id) => Some(*id),
        }
    }
}

closed_enum! {
    /// Where a file's bytes are hosted.
    pub enum FileType {
        File = "file",
        External = "external",
    }
}

/// A file hosted by the API behind an expiring URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedFile {
    /// The download URL.
    pub url: Url,
    /// When `url` stops working.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<DateTime<Utc>>,
}

/// A file hosted elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFile {
    /// The file URL.
    pub url: Url,
}

tagged_union! {
    /// The location of a file, also used for page covers.
    pub enum FileSource(tag = FileType) {
        File(HostedFile),
        External(ExternalFile),
    }
}

impl FileSource {
    /// An externally hosted file.
    #[must_use]
    pub const fn external(url: Url) -> Self {
        Self::External(ExternalFile { url })
    }

    /// Returns the file URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        match self {
            Self::File(file) => &file.url,
            Self::External(file) => &file.url,
        }
    }
}

/// A named file, as held by a files property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// The file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Where the file lives.
    #[serde(flatten)]
    pub source: FileSource,
}

closed_enum! {
    /// The kind of a page or database icon.
    pub enum IconType {
        Emoji = "emoji",
        File = "file",
        External = "external",
    }
}

tagged_union! {
    /// A page or database icon.
    pub enum Icon(tag = IconType) {
        Emoji(String),
        File(HostedFile),
        External(ExternalFile),
    }
}
