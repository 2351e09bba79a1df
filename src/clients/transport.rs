//! The transport seam and its reqwest implementation.
//!
//! The dispatcher hands a fully resolved [`HttpRequest`] to a [`Transport`]
//! and gets back the final [`HttpResponse`]. Retrying transient failures is
//! the transport's job; nothing above it retries.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::backoff::BackoffStrategy;
use crate::clients::errors::{HttpError, MaxHttpRetriesExceededError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::NotionConfig;

/// Sends one logical request, retrying internally as it sees fit.
///
/// Implementations must be safe to share between concurrent calls.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` and returns the final response.
    ///
    /// A non-2xx status is not an error at this level.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no response could be obtained.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// The default [`Transport`], built on reqwest with rustls.
///
/// # Retry Behavior
///
/// - **500, 502, 503, 504**: retried after the backoff delay
/// - **429**: retried when `retry_on_429` is set, waiting for `Retry-After`
///   if the server sent one and the backoff delay otherwise
/// - **Timeouts and connection failures**: retried after the backoff delay
/// - **Anything else**: returned immediately
///
/// After `max_retries` retries a retried status is returned as is, so the
/// server's error body still reaches the caller, while a network failure
/// becomes [`HttpError::MaxRetries`].
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    max_retries: u32,
    retry_on_429: bool,
    backoff: Arc<dyn BackoffStrategy>,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport using the timeout and retry settings of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: &NotionConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries(),
            retry_on_429: config.retry_on_429(),
            backoff: config.backoff(),
        })
    }

    const fn is_retryable_status(&self, code: u16) -> bool {
        matches!(code, 500 | 502 | 503 | 504) || (code == 429 && self.retry_on_429)
    }

    async fn send_once(&self, request: &HttpRequest) -> Result<HttpResponse, reqwest::Error> {
        let mut builder = self.client.request(request.method.into(), &request.url);

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let res = builder.send().await?;
        let code = res.status().as_u16();
        let headers = parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(code, headers, body))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut retries: u32 = 0;
        loop {
            let outcome = self.send_once(request).await;

            let retryable = match &outcome {
                Ok(response) => self.is_retryable_status(response.code),
                Err(error) => error.is_timeout() || error.is_connect(),
            };
            if !retryable {
                return outcome.map_err(HttpError::from);
            }

            if retries >= self.max_retries {
                return match outcome {
                    Ok(response) => Ok(response),
                    Err(error) if self.max_retries == 0 => Err(HttpError::Network(error)),
                    Err(error) => Err(MaxHttpRetriesExceededError {
                        tries: retries + 1,
                        message: error.to_string(),
                    }
                    .into()),
                };
            }

            retries += 1;
            let delay = match &outcome {
                Ok(response) if response.code == 429 => response
                    .retry_after()
                    .unwrap_or_else(|| self.backoff.delay(retries)),
                _ => self.backoff.delay(retries),
            };

            match &outcome {
                Ok(response) => tracing::warn!(
                    attempt = retries,
                    status = response.code,
                    ?delay,
                    "retrying {} {}",
                    request.method,
                    request.url
                ),
                Err(error) => tracing::warn!(
                    attempt = retries,
                    %error,
                    ?delay,
                    "retrying {} {}",
                    request.method,
                    request.url
                ),
            }

            tokio::time::sleep(delay).await;
        }
    }
}

fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}
