//! Cursor pagination.
//!
//! List endpoints return an envelope
//! `{"next_cursor": ..., "has_more": ..., "results": [...]}`. [`paginate`]
//! keeps requesting pages and merging `results` into one accumulator until
//! the server has nothing more or the caller's [`ResultLimit`] is spent.
//!
//! Two request shapes are supported through [`Pager`]:
//!
//! - **GET** endpoints carry `start_cursor` and `page_size` in the query
//!   string.
//! - **POST** endpoints (database queries and search) carry them in the
//!   JSON body. The caller's query is serialized once and every page gets
//!   a fresh copy, so concurrent fetches never share a request body.
//!
//! Each page asks for at most the remaining budget, clamped to the 1 to 100
//! range the API accepts. The budget is decremented by the number of items
//! actually merged, so a fetch may end with more items than asked for but
//! never issues a request once the budget is met.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{ClientError, HttpClient, HttpMethod, HttpRequest, RequestContext};
use crate::codec::{merge_page, Accumulate, CodecError};
use crate::rest::path::{build_path, Endpoint};
use crate::rest::response::Listing;

/// The largest page the API returns.
pub const MAX_PAGE_SIZE: u32 = 100;

/// How many results a paginated fetch should collect.
///
/// # Example
///
/// ```rust
/// use notion_api::ResultLimit;
///
/// assert_eq!(ResultLimit::from(-1), ResultLimit::Unbounded);
/// assert_eq!(ResultLimit::from(25), ResultLimit::AtMost(25));
/// assert_eq!(ResultLimit::AtMost(25).page_size(), 25);
/// assert_eq!(ResultLimit::Unbounded.page_size(), 100);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResultLimit {
    /// Fetch every page.
    #[default]
    Unbounded,
    /// Stop once at least this many results have been collected.
    AtMost(usize),
}

impl ResultLimit {
    /// Returns `true` once no more results are wanted.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::AtMost(0))
    }

    /// Returns the limit left after `merged` more results were collected.
    #[must_use]
    pub const fn consume(self, merged: usize) -> Self {
        match self {
            Self::Unbounded => Self::Unbounded,
            Self::AtMost(remaining) => Self::AtMost(remaining.saturating_sub(merged)),
        }
    }

    /// Returns the `page_size` to request next.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        match self {
            Self::Unbounded => MAX_PAGE_SIZE,
            Self::AtMost(remaining) => clamp_page_size(i64::try_from(*remaining).unwrap_or(0)),
        }
    }
}

impl From<i64> for ResultLimit {
    /// Negative values mean "everything".
    fn from(limit: i64) -> Self {
        usize::try_from(limit).map_or(Self::Unbounded, Self::AtMost)
    }
}

/// Clamps a requested page size to what the API accepts.
///
/// Values from 1 to 100 pass through; anything else, including zero and
/// negative values, becomes 100.
///
/// ```rust
/// use notion_api::rest::clamp_page_size;
///
/// assert_eq!(clamp_page_size(37), 37);
/// assert_eq!(clamp_page_size(0), 100);
/// assert_eq!(clamp_page_size(-5), 100);
/// assert_eq!(clamp_page_size(500), 100);
/// ```
#[must_use]
pub fn clamp_page_size(requested: i64) -> u32 {
    match u32::try_from(requested) {
        Ok(size) if (1..=MAX_PAGE_SIZE).contains(&size) => size,
        _ => MAX_PAGE_SIZE,
    }
}

/// Builds the request for each page of one paginated fetch.
#[derive(Clone, Debug, PartialEq)]
pub enum Pager {
    /// Cursor and page size in the query string.
    Get {
        /// The resolved path.
        path: String,
    },
    /// Cursor and page size merged into a JSON body.
    Post {
        /// The resolved path.
        path: String,
        /// The caller's query, without cursor or page size.
        body: Map<String, Value>,
    },
}

impl Pager {
    /// A GET pager for `endpoint`, with `{id}` filled in when given.
    #[must_use]
    pub fn get(endpoint: Endpoint, id: Option<&str>) -> Self {
        Self::Get {
            path: resolve(endpoint, id),
        }
    }

    /// A POST pager for `endpoint` carrying `query` in every body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] if `query` does not serialize to a
    /// JSON object.
    pub fn post<Q: Serialize>(
        endpoint: Endpoint,
        id: Option<&str>,
        query: &Q,
    ) -> Result<Self, ClientError> {
        let body = match serde_json::to_value(query)? {
            Value::Object(body) => body,
            Value::Null => Map::new(),
            _ => {
                return Err(CodecError::NotAnObject {
                    type_name: "pagination query",
                }
                .into())
            }
        };
        Ok(Self::Post {
            path: resolve(endpoint, id),
            body,
        })
    }

    /// Builds the request for one page. `cursor` is `None` for the first
    /// page.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the request fails validation.
    pub fn page_request(
        &self,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<HttpRequest, ClientError> {
        let request = match self {
            Self::Get { path } => {
                let mut builder = HttpRequest::builder(HttpMethod::Get, path)
                    .query_param("page_size", page_size.to_string());
                if let Some(cursor) = cursor {
                    builder = builder.query_param("start_cursor", cursor);
                }
                builder.build()?
            }
            Self::Post { path, body } => {
                let mut body = body.clone();
                body.insert("page_size".to_string(), Value::from(page_size));
                match cursor {
                    Some(cursor) => {
                        body.insert("start_cursor".to_string(), Value::from(cursor));
                    }
                    None => {
                        body.remove("start_cursor");
                    }
                }
                HttpRequest::builder(HttpMethod::Post, path)
                    .body(Value::Object(body))
                    .build()?
            }
        };
        Ok(request)
    }
}

fn resolve(endpoint: Endpoint, id: Option<&str>) -> String {
    id.map_or_else(
        || endpoint.template.to_string(),
        |id| build_path(endpoint.template, &[("id", id)]),
    )
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    next_cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
    results: Value,
}

/// Fetches pages into `target` until the server runs out or `limit` is met.
///
/// Each page takes its own rate-limit permit and observes `ctx`. A failed
/// page aborts the whole fetch; results merged from earlier pages are
/// dropped with the accumulator rather than returned as a partial success.
///
/// # Errors
///
/// Returns the first [`ClientError`] raised by a page request or by
/// decoding a page.
pub async fn paginate<A: Accumulate>(
    http: &HttpClient,
    ctx: &RequestContext,
    pager: &Pager,
    start_cursor: Option<String>,
    limit: ResultLimit,
    mut target: A,
) -> Result<Listing<A>, ClientError> {
    let mut cursor = start_cursor;
    let mut remaining = limit;
    let mut has_more = true;
    let mut page: u32 = 0;

    while has_more && !remaining.is_exhausted() {
        page += 1;
        let request = pager.page_request(cursor.as_deref(), remaining.page_size())?;
        let envelope: Envelope = http.send_json(ctx, request).await?;

        let merged = merge_page(envelope.results, &mut target)?;
        has_more = envelope.has_more;
        remaining = remaining.consume(merged);
        cursor = envelope.next_cursor;
        tracing::debug!(page, merged, has_more, "merged page");

        if has_more && cursor.is_none() {
            tracing::warn!(page, "has_more set without a next_cursor; stopping pagination");
            break;
        }
    }

    Ok(Listing::new(target, cursor, has_more))
}
