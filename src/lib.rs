//! # Notion API Rust Client
//!
//! A typed, async client for the Notion REST API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`NotionConfig`] and [`NotionConfigBuilder`]
//! - A typed object model for blocks, pages, databases and users in [`models`]
//! - Strict decoding: unknown enum values and variant tags are errors, see [`codec`]
//! - Cursor pagination that collects results up to a [`ResultLimit`]
//! - An HTTP dispatcher with retries, backoff and a token-bucket rate limiter
//! - Per-call cancellation and deadlines through [`RequestContext`]
//!
//! ## Quick Start
//!
//! ```rust
//! use notion_api::{ApiKey, ApiVersion, NotionClient, NotionConfig};
//!
//! let config = NotionConfig::builder()
//!     .api_key(ApiKey::new("secret_abc").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! let client = NotionClient::new(&config).unwrap();
//! assert_eq!(client.http_client().base_url().as_str(), "https://api.notion.com/");
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use notion_api::{NotionClient, RequestContext, ResultLimit};
//! use notion_api::models::{ObjectKind, SearchFilter};
//! use notion_api::rest::SearchQuery;
//!
//! let ctx = RequestContext::background().with_timeout(Duration::from_secs(20));
//!
//! let children = client
//!     .get_block_children(&ctx, page_id, None, ResultLimit::AtMost(50))
//!     .await?;
//! if children.has_more() {
//!     println!("resume from {:?}", children.next_cursor());
//! }
//!
//! let query = SearchQuery::new("roadmap").filter(SearchFilter::object(ObjectKind::Page));
//! let results = client.search(&ctx, &query).await?;
//! println!("{} pages", results.pages.len());
//! ```
//!
//! ## Cancellation
//!
//! ```rust,ignore
//! let (ctx, handle) = RequestContext::cancellable();
//! let call = tokio::spawn(async move { client.get_page(&ctx, page_id).await });
//! handle.cancel();
//! assert!(call.await?.unwrap_err().is_cancellation());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: newtypes and enums validate on construction
//! - **Thread-safe**: the client is `Send + Sync` and shares one rate limiter
//! - **Async-first**: designed for use with the Tokio runtime

pub mod clients;
pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, ApiVersion, NotionConfig, NotionConfigBuilder, RateLimit};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, BackoffStrategy, CancelHandle, ClientError, ConstantBackoff,
    ExponentialJitterBackoff, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, InvalidHttpRequestError, MaxHttpRetriesExceededError, RateLimiter,
    RequestContext, ReqwestTransport, TokenBucket, Transport,
};

// Re-export REST types
pub use rest::{Listing, NotionClient, ResultLimit};
