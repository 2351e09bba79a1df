//! Accumulating list pages.
//!
//! Paginated endpoints return one `results` array per page. [`merge_page`]
//! decodes a page and appends it to an [`Accumulate`] target so that a
//! multi-page fetch ends with one collection.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::codec::CodecError;

/// A collection that pages of results are appended to.
pub trait Accumulate {
    /// The decoded element type of one result.
    type Item: DeserializeOwned;

    /// Appends decoded items. Never replaces existing contents.
    fn append(&mut self, items: Vec<Self::Item>);

    /// Returns the number of items held.
    fn count(&self) -> usize;
}

impl<T: DeserializeOwned> Accumulate for Vec<T> {
    type Item = T;

    fn append(&mut self, items: Vec<T>) {
        if self.capacity() == 0 {
            self.reserve_exact(items.len());
        }
        self.extend(items);
    }

    fn count(&self) -> usize {
        self.len()
    }
}

/// Decodes a JSON array and appends it to `target`.
///
/// Returns how many items `target` grew by. An empty array is a no-op,
/// and a decode failure leaves `target` untouched.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if `raw` is not an array of `A::Item`.
pub fn merge_page<A: Accumulate>(raw: Value, target: &mut A) -> Result<usize, CodecError> {
    let items: Vec<A::Item> = serde_json::from_value(raw)?;
    if items.is_empty() {
        return Ok(0);
    }

    let before = target.count();
    target.append(items);
    Ok(target.count().saturating_sub(before))
}
