//! The result of a paginated fetch.
//!
//! [`Listing<T>`] wraps the accumulated results together with where the
//! fetch stopped. It implements `Deref<Target = T>`, so a
//! `Listing<Vec<Block>>` can be iterated and indexed like the `Vec`.
//!
//! # Example
//!
//! ```rust,ignore
//! use notion_api::{RequestContext, ResultLimit};
//!
//! let ctx = RequestContext::background();
//! let users = client.list_users(&ctx, None, ResultLimit::AtMost(50)).await?;
//! for user in users.iter() {
//!     println!("{:?}", user.name);
//! }
//!
//! // Resume where the budget ran out
//! if users.has_more() {
//!     let rest = client
//!         .list_users(&ctx, users.next_cursor().map(String::from), ResultLimit::Unbounded)
//!         .await?;
//! }
//! ```

use std::ops::{Deref, DerefMut};

/// Accumulated results plus the cursor the fetch stopped at.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing<T> {
    data: T,
    next_cursor: Option<String>,
    has_more: bool,
}

impl<T> Listing<T> {
    /// Creates a listing.
    #[must_use]
    pub const fn new(data: T, next_cursor: Option<String>, has_more: bool) -> Self {
        Self {
            data,
            next_cursor,
            has_more,
        }
    }

    /// Consumes the listing and returns the accumulated results.
    ///
    /// ```rust
    /// use notion_api::rest::Listing;
    ///
    /// let listing = Listing::new(vec![1, 2, 3], None, false);
    /// assert_eq!(listing.len(), 3);
    /// assert_eq!(listing.into_inner(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns the cursor of the first page not fetched, if the server
    /// has more results.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    /// Returns `true` if the server reported more results after the last
    /// page fetched.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }
}

impl<T> Deref for Listing<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for Listing<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}
