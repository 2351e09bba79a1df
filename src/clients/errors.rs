//! Error types for the HTTP layer and the API surface.
//!
//! - [`HttpError`]: transport failures (network, exhausted retries, a
//!   request that failed validation before it was sent)
//! - [`ApiError`]: the structured error body the API returns with a
//!   non-2xx status
//! - [`ClientError`]: the error of every public client operation
//!
//! # Example
//!
//! ```rust,ignore
//! use notion_api::{ClientError, RequestContext};
//!
//! match client.get_page(&RequestContext::background(), id).await {
//!     Ok(page) => println!("{:?}", page.title()),
//!     Err(e) if e.is_not_found() => println!("no such page"),
//!     Err(ClientError::Cancelled) => println!("gave up"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clients::http_request::HttpMethod;
use crate::codec::CodecError;

/// Error returned when a transient failure outlasted the retry budget.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The number of attempts that were made.
    pub tries: u32,
    /// The last failure seen.
    pub message: String,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: HttpMethod,
    },

    /// The request path could not be joined onto the base URL.
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The path that was provided.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Retry attempts exhausted on network failures.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// A structured error returned by the API.
///
/// Error bodies look like
/// `{"object": "error", "status": 404, "code": "object_not_found", "message": "..."}`.
/// `code` is kept as a string so that codes added server-side still
/// surface; the known codes are available as constants.
///
/// # Example
///
/// ```rust
/// use notion_api::clients::ApiError;
///
/// let error: ApiError = serde_json::from_str(
///     r#"{"status":404,"code":"object_not_found","message":"Could not find page."}"#,
/// ).unwrap();
/// assert!(error.is_not_found());
/// assert_eq!(error.code, ApiError::OBJECT_NOT_FOUND);
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code} ({status}): {message}")]
pub struct ApiError {
    /// The HTTP status echoed in the body.
    pub status: u16,
    /// The machine-readable error code.
    pub code: String,
    /// The human-readable message.
    pub message: String,
    /// The `x-request-id` of the failed request, if the server sent one.
    #[serde(skip)]
    pub request_id: Option<String>,
}

impl ApiError {
    /// The request body could not be decoded as JSON.
    pub const INVALID_JSON: &'static str = "invalid_json";
    /// The request URL is not valid.
    pub const INVALID_REQUEST_URL: &'static str = "invalid_request_url";
    /// The request is not supported.
    pub const INVALID_REQUEST: &'static str = "invalid_request";
    /// The request body does not match the expected schema.
    pub const VALIDATION_ERROR: &'static str = "validation_error";
    /// The bearer token is not valid.
    pub const UNAUTHORIZED: &'static str = "unauthorized";
    /// The integration lacks permission for this operation.
    pub const RESTRICTED_RESOURCE: &'static str = "restricted_resource";
    /// The resource does not exist or is not shared with the integration.
    pub const OBJECT_NOT_FOUND: &'static str = "object_not_found";
    /// The transaction could not be completed because of a data collision.
    pub const CONFLICT_ERROR: &'static str = "conflict_error";
    /// The integration has been rate limited.
    pub const RATE_LIMITED: &'static str = "rate_limited";
    /// An unexpected server error.
    pub const INTERNAL_SERVER_ERROR: &'static str = "internal_server_error";
    /// The server is unavailable.
    pub const SERVICE_UNAVAILABLE: &'static str = "service_unavailable";

    /// Returns `true` for `object_not_found`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == Self::OBJECT_NOT_FOUND
    }

    /// Returns `true` for `conflict_error`.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.code == Self::CONFLICT_ERROR
    }

    /// Returns `true` for `rate_limited`.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.code == Self::RATE_LIMITED
    }

    /// Returns `true` for `validation_error`.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        self.code == Self::VALIDATION_ERROR
    }

    /// Returns `true` for `unauthorized`.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.code == Self::UNAUTHORIZED
    }
}

/// The error of every public client operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with a structured error.
    #[error("{method} request to {url} with status {status_text}: {source}")]
    Api {
        /// The request method.
        method: HttpMethod,
        /// The request URL.
        url: String,
        /// The HTTP status line, e.g. `404 Not Found`.
        status_text: String,
        /// The decoded error body.
        source: ApiError,
    },

    /// The API answered with a non-2xx status and a body that is not an
    /// [`ApiError`].
    #[error("{method} request to {url} with status {status_text}: {body}")]
    UnexpectedResponse {
        /// The request method.
        method: HttpMethod,
        /// The request URL.
        url: String,
        /// The HTTP status line.
        status_text: String,
        /// The raw response body.
        body: String,
    },

    /// The request could not be completed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A response body did not decode.
    #[error(transparent)]
    Decode(#[from] CodecError),

    /// A field the operation needs was not set. No request was issued.
    #[error("{entity} is missing required field '{field}'")]
    MissingField {
        /// The kind of object being sent.
        entity: &'static str,
        /// The missing field.
        field: &'static str,
    },

    /// The caller cancelled the operation.
    #[error("request cancelled")]
    Cancelled,

    /// The caller's deadline passed before the operation finished.
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

impl ClientError {
    /// Returns the structured API error, if the server sent one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns the API error code, if the server sent one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.api_error().map(|error| error.code.as_str())
    }

    /// Returns `true` if the server answered `object_not_found`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_not_found)
    }

    /// Returns `true` if the server answered `conflict_error`.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_conflict)
    }

    /// Returns `true` if the server answered `rate_limited`.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_rate_limited)
    }

    /// Returns `true` if the caller's context fired.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(CodecError::Json(error))
    }
}

impl From<InvalidHttpRequestError> for ClientError {
    fn from(error: InvalidHttpRequestError) -> Self {
        Self::Http(HttpError::InvalidRequest(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> ClientError {
        ClientError::Api {
            method: HttpMethod::Get,
            url: "https://api.notion.com/v1/pages/abc".to_string(),
            status_text: "404 Not Found".to_string(),
            source: ApiError {
                status: 404,
                code: ApiError::OBJECT_NOT_FOUND.to_string(),
                message: "Could not find page.".to_string(),
                request_id: None,
            },
        }
    }

    #[test]
    fn test_api_error_message_includes_request_context() {
        let message = not_found().to_string();
        assert_eq!(
            message,
            "GET request to https://api.notion.com/v1/pages/abc with status 404 Not Found: \
             object_not_found (404): Could not find page."
        );
    }

    #[test]
    fn test_client_error_code_helpers() {
        let error = not_found();
        assert_eq!(error.code(), Some("object_not_found"));
        assert!(error.is_not_found());
        assert!(!error.is_conflict());
        assert!(!error.is_rate_limited());
        assert!(!error.is_cancellation());
    }

    #[test]
    fn test_api_error_decodes_and_ignores_object_field() {
        let error: ApiError = serde_json::from_str(
            r#"{"object":"error","status":409,"code":"conflict_error","message":"retry"}"#,
        )
        .unwrap();
        assert!(error.is_conflict());
        assert_eq!(error.status, 409);
        assert!(error.request_id.is_none());
    }

    #[test]
    fn test_api_error_predicates() {
        let error = |code: &str| ApiError {
            status: 400,
            code: code.to_string(),
            message: String::new(),
            request_id: None,
        };
        assert!(error(ApiError::RATE_LIMITED).is_rate_limited());
        assert!(error(ApiError::VALIDATION_ERROR).is_validation_error());
        assert!(error(ApiError::UNAUTHORIZED).is_unauthorized());
        assert!(!error("something_new").is_not_found());
    }

    #[test]
    fn test_cancellation_errors_have_no_code() {
        assert!(ClientError::Cancelled.is_cancellation());
        assert!(ClientError::DeadlineExceeded.is_cancellation());
        assert_eq!(ClientError::Cancelled.code(), None);
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: HttpMethod::Patch,
        };
        assert_eq!(error.to_string(), "Cannot use PATCH without specifying data.");
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            tries: 3,
            message: "connection refused".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains('3'));
        assert!(message.contains("Exceeded maximum retry count"));
    }

    #[test]
    fn test_missing_field_message() {
        let error = ClientError::MissingField {
            entity: "page",
            field: "parent",
        };
        assert_eq!(error.to_string(), "page is missing required field 'parent'");
    }
}
