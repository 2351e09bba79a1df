//! Named-entry collections.
//!
//! Database schemas and page property sets arrive as objects keyed by
//! property name. [`NamedEntries`] holds them as a list whose elements carry
//! their own name, which is easier to build and iterate, and converts back
//! to the keyed shape on encode.
//!
//! Key order is not preserved across a round trip; only the set of
//! `(name, value)` pairs is.

use std::ops::{Deref, DerefMut};

use serde::de::{self, DeserializeOwned};
use serde::ser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::codec::CodecError;

/// An element whose name is carried out of band as its object key.
pub trait Named {
    /// Returns the entry name.
    fn name(&self) -> &str;

    /// Sets the entry name.
    fn set_name(&mut self, name: String);
}

/// Decodes a keyed object into named entries.
///
/// # Errors
///
/// Returns [`CodecError::NotAnObject`] if `raw` is not an object, or the
/// decode error of the first entry that fails.
pub fn decode_keyed<T>(raw: Value) -> Result<Vec<T>, CodecError>
where
    T: Named + DeserializeOwned,
{
    let Value::Object(map) = raw else {
        return Err(CodecError::NotAnObject {
            type_name: "NamedEntries",
        });
    };

    map.into_iter()
        .map(|(name, value)| -> Result<T, CodecError> {
            let mut entry: T = serde_json::from_value(value)?;
            entry.set_name(name);
            Ok(entry)
        })
        .collect()
}

/// Encodes named entries as a keyed object.
///
/// Entries with an empty name are skipped. When two entries share a name
/// the later one wins. `None` encodes to `null`.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if an entry fails to serialize.
pub fn encode_keyed<T>(entries: Option<&[T]>) -> Result<Value, CodecError>
where
    T: Named + Serialize,
{
    let Some(entries) = entries else {
        return Ok(Value::Null);
    };

    let mut map = Map::new();
    for entry in entries.iter().filter(|entry| !entry.name().is_empty()) {
        map.insert(entry.name().to_string(), serde_json::to_value(entry)?);
    }
    Ok(Value::Object(map))
}

/// A list of named entries carried on the wire as a keyed object.
///
/// Dereferences to `Vec<T>`.
///
/// # Example
///
/// ```rust
/// use notion_api::codec::NamedEntries;
/// use notion_api::models::PageProperty;
/// use serde_json::json;
///
/// let properties: NamedEntries<PageProperty> = serde_json::from_value(json!({
///     "Done": {"id": "a1", "type": "checkbox", "checkbox": true}
/// }))
/// .unwrap();
///
/// assert_eq!(properties.len(), 1);
/// assert!(properties.get("Done").is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NamedEntries<T>(Vec<T>);

impl<T> NamedEntries<T> {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Consumes the collection and returns the entries.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: Named> NamedEntries<T> {
    /// Returns the entry with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.0.iter().find(|entry| entry.name() == name)
    }

    /// Returns a mutable reference to the entry with the given name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.0.iter_mut().find(|entry| entry.name() == name)
    }
}

impl<T> Default for NamedEntries<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for NamedEntries<T> {
    fn from(entries: Vec<T>) -> Self {
        Self(entries)
    }
}

impl<T> FromIterator<T> for NamedEntries<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> Deref for NamedEntries<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for NamedEntries<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: Named + Serialize> Serialize for NamedEntries<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_keyed(Some(&self.0))
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de, T: Named + DeserializeOwned> Deserialize<'de> for NamedEntries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        decode_keyed(raw).map(Self).map_err(de::Error::custom)
    }
}
