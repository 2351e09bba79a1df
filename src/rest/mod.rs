//! REST operations on top of the HTTP dispatcher.
//!
//! This module provides:
//!
//! - **Endpoints**: [`Endpoint`] constants pairing a method with a path template
//! - **Pagination**: [`paginate`] walks a cursor-paged listing into any
//!   [`Accumulate`](crate::codec::Accumulate) target, bounded by a [`ResultLimit`]
//! - **[`Listing<T>`]**: a Deref wrapper carrying the collected results and
//!   the cursor to resume from
//! - **[`NotionClient`]**: the typed operations, see [`resources`]
//!
//! # Example
//!
//! ```rust
//! use notion_api::rest::{build_path, clamp_page_size, Listing, BLOCK_CHILDREN};
//!
//! assert_eq!(
//!     build_path(BLOCK_CHILDREN.template, &[("id", "abc")]),
//!     "v1/blocks/abc/children"
//! );
//! assert_eq!(clamp_page_size(500), 100);
//!
//! let listing = Listing::new(vec![1, 2, 3], Some("next".to_string()), true);
//! assert_eq!(listing.len(), 3);
//! assert_eq!(listing.next_cursor(), Some("next"));
//! ```

mod pagination;
mod path;
mod response;

pub mod resources;

pub use pagination::{clamp_page_size, paginate, Pager, ResultLimit, MAX_PAGE_SIZE};
pub use path::{
    build_path, Endpoint, APPEND_BLOCK_CHILDREN, BLOCK_CHILDREN, CREATE_DATABASE, CREATE_PAGE,
    DELETE_BLOCK, GET_BLOCK, GET_DATABASE, GET_PAGE, GET_USER, LIST_DATABASES, LIST_USERS,
    QUERY_DATABASE, SEARCH, UPDATE_BLOCK, UPDATE_DATABASE, UPDATE_PAGE,
};
pub use resources::{DatabaseQuery, NotionClient, SearchHit, SearchQuery, SearchResults};
pub use response::Listing;
