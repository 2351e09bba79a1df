//! Request dispatch.
//!
//! This module provides the [`HttpClient`] type, which turns a relative
//! [`HttpRequest`] into one authenticated, rate-limited call and maps the
//! outcome onto [`ClientError`].

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;

use crate::clients::context::RequestContext;
use crate::clients::errors::{ApiError, ClientError, InvalidHttpRequestError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::rate_limit::RateLimiter;
use crate::clients::transport::Transport;
use crate::config::NotionConfig;

/// Dispatches requests to the API.
///
/// For every request the client:
/// - resolves the path against the configured base URL
/// - adds `Authorization`, `Notion-Version` and, when configured,
///   `User-Agent`, plus `Content-Type: application/json` for non-GET
///   requests
/// - takes one permit from the rate limiter
/// - sends the request through the transport
/// - maps a non-2xx response onto [`ClientError::Api`]
///
/// Both waits observe the caller's [`RequestContext`].
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`; one instance serves concurrent calls.
#[derive(Debug)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    limiter: Arc<dyn RateLimiter>,
    base_url: Url,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a dispatcher over the given collaborators.
    #[must_use]
    pub fn new(
        config: &NotionConfig,
        transport: Arc<dyn Transport>,
        limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Authorization".to_string(), config.api_key().bearer());
        default_headers.insert(
            "Notion-Version".to_string(),
            config.api_version().to_string(),
        );
        if let Some(user_agent) = config.user_agent() {
            default_headers.insert("User-Agent".to_string(), user_agent.to_string());
        }

        // Url::join drops the last segment of a base without a trailing slash
        let mut base_url = config.base_url().clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            transport,
            limiter,
            base_url,
            default_headers,
        }
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the headers added to every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request and returns the successful response.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Cancelled`] / [`ClientError::DeadlineExceeded`] if
    ///   `ctx` fires while waiting for a permit or a response
    /// - [`ClientError::Http`] if the request is invalid or the transport
    ///   fails
    /// - [`ClientError::Api`] for a non-2xx response with an error body
    /// - [`ClientError::UnexpectedResponse`] for a non-2xx response whose
    ///   body is not an API error
    pub async fn request(
        &self,
        ctx: &RequestContext,
        request: HttpRequest,
    ) -> Result<HttpResponse, ClientError> {
        let request = self.prepare(request)?;
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");

        ctx.run(self.limiter.acquire()).await?;
        let response = ctx.run(self.transport.send(&request)).await??;

        if response.is_ok() {
            return Ok(response);
        }
        Err(Self::error_from(&request, response))
    }

    /// Sends a request and decodes the response body into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`request`](Self::request) returns, plus
    /// [`ClientError::Decode`] if the body does not decode.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        request: HttpRequest,
    ) -> Result<T, ClientError> {
        let response = self.request(ctx, request).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Sends a request and discards the response body.
    ///
    /// # Errors
    ///
    /// Everything [`request`](Self::request) returns.
    pub async fn send_discard(
        &self,
        ctx: &RequestContext,
        request: HttpRequest,
    ) -> Result<(), ClientError> {
        self.request(ctx, request).await.map(drop)
    }

    fn prepare(&self, mut request: HttpRequest) -> Result<HttpRequest, ClientError> {
        request.verify()?;

        let url = self
            .base_url
            .join(request.url.trim_start_matches('/'))
            .map_err(|e| InvalidHttpRequestError::InvalidUrl {
                url: request.url.clone(),
                reason: e.to_string(),
            })?;
        request.url = url.into();

        let mut headers = self.default_headers.clone();
        if request.method != HttpMethod::Get {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        headers.extend(request.headers);
        request.headers = headers;

        Ok(request)
    }

    fn error_from(request: &HttpRequest, response: HttpResponse) -> ClientError {
        match serde_json::from_str::<ApiError>(&response.body) {
            Ok(mut source) => {
                source.request_id = response.request_id().map(String::from);
                ClientError::Api {
                    method: request.method,
                    url: request.url.clone(),
                    status_text: response.status_text,
                    source,
                }
            }
            Err(_) => ClientError::UnexpectedResponse {
                method: request.method,
                url: request.url.clone(),
                status_text: response.status_text,
                body: response.body,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::rate_limit::TokenBucket;
    use crate::clients::transport::ReqwestTransport;
    use crate::config::{ApiKey, ApiVersion};

    fn client(base_url: &str, user_agent: Option<&str>) -> HttpClient {
        let mut builder = NotionConfig::builder()
            .api_key(ApiKey::new("secret_test").unwrap())
            .api_version(ApiVersion::V2021_05_13)
            .base_url(base_url);
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }
        let config = builder.build().unwrap();
        HttpClient::new(
            &config,
            Arc::new(ReqwestTransport::new(&config).unwrap()),
            Arc::new(TokenBucket::new(config.rate_limit())),
        )
    }

    #[test]
    fn test_default_headers() {
        let client = client("https://api.notion.com", Some("tests/1.0"));
        let headers = client.default_headers();
        assert_eq!(
            headers.get("Authorization"),
            Some(&"Bearer secret_test".to_string())
        );
        assert_eq!(
            headers.get("Notion-Version"),
            Some(&"2021-05-13".to_string())
        );
        assert_eq!(headers.get("User-Agent"), Some(&"tests/1.0".to_string()));
    }

    #[test]
    fn test_user_agent_omitted_when_unset() {
        let client = client("https://api.notion.com", None);
        assert!(!client.default_headers().contains_key("User-Agent"));
    }

    #[test]
    fn test_prepare_resolves_against_base_path() {
        let client = client("http://127.0.0.1:9000/proxy", None);
        let request = HttpRequest::builder(HttpMethod::Get, "/v1/users")
            .build()
            .unwrap();
        let prepared = client.prepare(request).unwrap();
        assert_eq!(prepared.url, "http://127.0.0.1:9000/proxy/v1/users");
        assert!(!prepared.headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_prepare_sets_content_type_for_non_get() {
        let client = client("https://api.notion.com", None);
        let request = HttpRequest::builder(HttpMethod::Delete, "v1/blocks/abc")
            .build()
            .unwrap();
        let prepared = client.prepare(request).unwrap();
        assert_eq!(prepared.url, "https://api.notion.com/v1/blocks/abc");
        assert_eq!(
            prepared.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_error_from_decodes_api_error() {
        let request = HttpRequest::builder(HttpMethod::Get, "https://api.notion.com/v1/pages/x")
            .build()
            .unwrap();
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-9".to_string()]);
        let response = HttpResponse::new(
            404,
            headers,
            r#"{"object":"error","status":404,"code":"object_not_found","message":"x"}"#,
        );

        let error = HttpClient::error_from(&request, response);
        assert_eq!(error.code(), Some("object_not_found"));
        assert_eq!(
            error.api_error().and_then(|e| e.request_id.as_deref()),
            Some("req-9")
        );
    }

    #[test]
    fn test_error_from_keeps_unparseable_body() {
        let request = HttpRequest::builder(HttpMethod::Get, "https://api.notion.com/v1/users")
            .build()
            .unwrap();
        let response = HttpResponse::new(502, HashMap::new(), "<html>bad gateway</html>");

        let error = HttpClient::error_from(&request, response);
        assert!(matches!(
            error,
            ClientError::UnexpectedResponse { ref body, .. } if body.contains("bad gateway")
        ));
        assert_eq!(error.code(), None);
    }
}
