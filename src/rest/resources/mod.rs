//! Typed operations on the API's objects.
//!
//! Every operation is a method on [`NotionClient`] and takes the caller's
//! [`RequestContext`] first. Operations are grouped by object:
//!
//! - **Blocks**: get, update, delete, list children, append children
//! - **Databases**: get, query, create, update, list
//! - **Pages**: get, create, update properties
//! - **Users**: get, list
//! - **Search**: pages and databases shared with the integration
//!
//! # Example
//!
//! ```rust,ignore
//! use notion_api::{ApiKey, NotionClient, NotionConfig, RequestContext, ResultLimit};
//! use notion_api::models::{CheckboxFilter, Filter, PropertyCondition};
//! use notion_api::rest::DatabaseQuery;
//!
//! let config = NotionConfig::builder()
//!     .api_key(ApiKey::new(std::env::var("NOTION_TOKEN")?)?)
//!     .build()?;
//! let client = NotionClient::new(&config)?;
//! let ctx = RequestContext::background();
//!
//! let page = client.get_page(&ctx, page_id).await?;
//! println!("{:?}", page.title());
//!
//! let query = DatabaseQuery::new()
//!     .filter(Filter::property("Done", PropertyCondition::Checkbox(CheckboxFilter::Equals(true))))
//!     .limit(ResultLimit::AtMost(20));
//! for row in client.query_database(&ctx, database_id, &query).await?.iter() {
//!     println!("{:?}", row.title());
//! }
//! ```

mod blocks;
mod databases;
mod pages;
mod search;
mod users;

pub use databases::DatabaseQuery;
pub use search::{SearchHit, SearchQuery, SearchResults};

use std::sync::Arc;

use crate::clients::{
    ClientError, HttpClient, RateLimiter, ReqwestTransport, TokenBucket, Transport,
};
use crate::config::NotionConfig;

/// A client for the Notion API.
///
/// Cheap to share: wrap it in an `Arc` and call it from as many tasks as
/// needed. The rate limiter and transport are shared between calls; each
/// call owns its own request bodies.
#[derive(Debug)]
pub struct NotionClient {
    http: HttpClient,
}

// Verify NotionClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NotionClient>();
};

impl NotionClient {
    /// Creates a client with the reqwest transport and a token bucket
    /// sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &NotionConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(config)?;
        let limiter = TokenBucket::new(config.rate_limit());
        Ok(Self::with_parts(
            config,
            Arc::new(transport),
            Arc::new(limiter),
        ))
    }

    /// Creates a client over custom collaborators.
    #[must_use]
    pub fn with_parts(
        config: &NotionConfig,
        transport: Arc<dyn Transport>,
        limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            http: HttpClient::new(config, transport, limiter),
        }
    }

    /// Returns the underlying dispatcher.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http
    }
}

pub(crate) const fn missing(entity: &'static str, field: &'static str) -> ClientError {
    ClientError::MissingField { entity, field }
}
