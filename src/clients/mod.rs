//! HTTP layer for API communication.
//!
//! # Overview
//!
//! - [`HttpClient`]: the request dispatcher
//! - [`HttpRequest`] / [`HttpResponse`]: what goes over the wire
//! - [`Transport`]: the seam that actually sends requests, with
//!   [`ReqwestTransport`] as the default
//! - [`RateLimiter`]: the permit source, with [`TokenBucket`] as the default
//! - [`BackoffStrategy`]: retry delays for the transport
//! - [`RequestContext`]: caller cancellation and deadlines
//! - [`ClientError`], [`ApiError`], [`HttpError`]: what can go wrong
//!
//! # Retry Behavior
//!
//! Only the transport retries. The default transport retries 5xx gateway
//! statuses, 429 (when enabled), timeouts and connection failures, up to
//! `max_retries` times with the configured backoff. Other 4xx statuses are
//! returned immediately and surface as [`ClientError::Api`].

mod backoff;
mod context;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod rate_limit;
mod transport;

pub use backoff::{BackoffStrategy, ConstantBackoff, ExponentialJitterBackoff};
pub use context::{CancelHandle, RequestContext};
pub use errors::{
    ApiError, ClientError, HttpError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::HttpClient;
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use rate_limit::{RateLimiter, TokenBucket};
pub use transport::{ReqwestTransport, Transport};
