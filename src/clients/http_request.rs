//! HTTP request types.
//!
//! This module provides the [`HttpRequest`] type and its builder.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving objects.
    Get,
    /// HTTP POST method for creating objects and running queries.
    Post,
    /// HTTP PATCH method for updating objects.
    Patch,
    /// HTTP DELETE method for archiving objects.
    Delete,
}

impl HttpMethod {
    /// Returns the method as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` if requests with this method must carry a body.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// An HTTP request to be sent to the API.
///
/// `url` starts out as a path relative to the API root (for example
/// `v1/pages/{id}`). The dispatcher resolves it against the configured
/// base URL and adds the standard headers before handing the request to
/// the transport.
///
/// # Example
///
/// ```rust
/// use notion_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "v1/users")
///     .query_param("page_size", "100")
///     .build()
///     .unwrap();
/// assert_eq!(get_request.query, vec![("page_size".to_string(), "100".to_string())]);
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "v1/search")
///     .body(json!({"query": "roadmap"}))
///     .build()
///     .unwrap();
/// assert!(post_request.body.is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The path, or the absolute URL once resolved.
    pub url: String,
    /// Query parameters, in the order they were added.
    pub query: Vec<(String, String)>,
    /// Headers to send.
    pub headers: HashMap<String, String>,
    /// The JSON body, if any.
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Creates a new builder.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] if the method is
    /// `Post` or `Patch` and there is no body.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.method,
            });
        }
        Ok(())
    }

    /// Returns the value of a query parameter.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: HttpMethod,
    url: String,
    query: Vec<(String, String)>,
    headers: HashMap<String, String>,
    body: Option<serde_json::Value>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a header. A later value for the same name replaces an earlier one.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Builds and validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if validation fails.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            method: self.method,
            url: self.url,
            query: self.query,
            headers: self.headers,
            body: self.body,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_http_method_into_reqwest() {
        assert_eq!(reqwest::Method::from(HttpMethod::Patch), reqwest::Method::PATCH);
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "v1/users/abc")
            .build()
            .unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "v1/users/abc");
        assert!(request.body.is_none());
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_verify_requires_body_for_post() {
        let result = HttpRequest::builder(HttpMethod::Post, "v1/pages").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody {
                method: HttpMethod::Post
            })
        ));
    }

    #[test]
    fn test_verify_requires_body_for_patch() {
        let result = HttpRequest::builder(HttpMethod::Patch, "v1/blocks/abc").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_without_body_is_valid() {
        assert!(HttpRequest::builder(HttpMethod::Delete, "v1/blocks/abc")
            .build()
            .is_ok());
    }

    #[test]
    fn test_builder_keeps_query_order() {
        let request = HttpRequest::builder(HttpMethod::Get, "v1/users")
            .query_param("page_size", "10")
            .query_param("start_cursor", "abc")
            .build()
            .unwrap();
        assert_eq!(request.query[0].0, "page_size");
        assert_eq!(request.query_value("start_cursor"), Some("abc"));
        assert_eq!(request.query_value("missing"), None);
    }

    #[test]
    fn test_builder_with_headers_and_body() {
        let request = HttpRequest::builder(HttpMethod::Post, "v1/search")
            .header("X-Trace", "1")
            .body(json!({"query": "x"}))
            .build()
            .unwrap();
        assert_eq!(request.headers.get("X-Trace"), Some(&"1".to_string()));
        assert_eq!(request.body, Some(json!({"query": "x"})));
    }
}
