//! Configuration types for the Notion client.
//!
//! # Overview
//!
//! - [`NotionConfig`]: every setting the client needs
//! - [`NotionConfigBuilder`]: builds a [`NotionConfig`] with defaults
//! - [`ApiKey`]: a validated integration token with masked debug output
//! - [`ApiVersion`]: the `Notion-Version` sent with every request
//! - [`RateLimit`]: token-bucket settings
//!
//! Defaults live in the builder; nothing is read from process-wide state.
//!
//! # Example
//!
//! ```rust
//! use notion_api::{ApiKey, ApiVersion, NotionConfig};
//! use std::time::Duration;
//!
//! let config = NotionConfig::builder()
//!     .api_key(ApiKey::new("secret_abc").unwrap())
//!     .api_version(ApiVersion::V2021_05_13)
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_retries(), 8);
//! ```

mod newtypes;
mod version;

pub use newtypes::ApiKey;
pub use version::ApiVersion;

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::clients::{BackoffStrategy, ExponentialJitterBackoff};
use crate::error::ConfigError;

/// The production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";

/// Token-bucket settings for outgoing requests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateLimit {
    per_second: f64,
    burst: u32,
}

impl RateLimit {
    /// Creates validated rate limit settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRateLimit`] if either value is not
    /// positive.
    pub fn new(per_second: f64, burst: u32) -> Result<Self, ConfigError> {
        if !per_second.is_finite() || per_second <= 0.0 {
            return Err(ConfigError::InvalidRateLimit {
                reason: format!("rate must be positive, got {per_second}"),
            });
        }
        if burst == 0 {
            return Err(ConfigError::InvalidRateLimit {
                reason: "burst must be at least 1".to_string(),
            });
        }
        Ok(Self { per_second, burst })
    }

    /// Tokens added per second.
    #[must_use]
    pub const fn per_second(&self) -> f64 {
        self.per_second
    }

    /// Bucket capacity.
    #[must_use]
    pub const fn burst(&self) -> u32 {
        self.burst
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            per_second: 1.0,
            burst: 3,
        }
    }
}

/// Configuration for the Notion client.
///
/// `NotionConfig` is `Clone`, `Send` and `Sync`.
#[derive(Clone, Debug)]
pub struct NotionConfig {
    api_key: ApiKey,
    api_version: ApiVersion,
    user_agent: Option<String>,
    base_url: Url,
    timeout: Duration,
    max_retries: u32,
    retry_on_429: bool,
    rate_limit: RateLimit,
    backoff: Arc<dyn BackoffStrategy>,
}

impl NotionConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> NotionConfigBuilder {
        NotionConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns the user agent, if configured.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-attempt request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns how many times a transient failure is retried.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns whether `429 Too Many Requests` is retried.
    #[must_use]
    pub const fn retry_on_429(&self) -> bool {
        self.retry_on_429
    }

    /// Returns the rate limit settings.
    #[must_use]
    pub const fn rate_limit(&self) -> RateLimit {
        self.rate_limit
    }

    /// Returns the backoff strategy used between retries.
    #[must_use]
    pub fn backoff(&self) -> Arc<dyn BackoffStrategy> {
        Arc::clone(&self.backoff)
    }
}

// Verify NotionConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NotionConfig>();
};

/// Builder for [`NotionConfig`].
///
/// `api_key` is required. Everything else has a default:
///
/// - `api_version`: [`ApiVersion::latest()`]
/// - `user_agent`: `None`
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `timeout`: 30 seconds
/// - `max_retries`: 8
/// - `retry_on_429`: `true`
/// - `rate_limit`: 1 request per second, burst of 3
/// - `backoff`: [`ExponentialJitterBackoff::default()`]
#[derive(Debug, Default)]
pub struct NotionConfigBuilder {
    api_key: Option<ApiKey>,
    api_version: Option<ApiVersion>,
    user_agent: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    retry_on_429: Option<bool>,
    rate_limit: Option<RateLimit>,
    backoff: Option<Arc<dyn BackoffStrategy>>,
}

impl NotionConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the base URL, mainly for pointing tests at a mock server.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-attempt request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how many times a transient failure is retried.
    #[must_use]
    pub const fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Sets whether `429 Too Many Requests` is retried.
    #[must_use]
    pub const fn retry_on_429(mut self, retry: bool) -> Self {
        self.retry_on_429 = Some(retry);
        self
    }

    /// Sets the rate limit.
    #[must_use]
    pub const fn rate_limit(mut self, rate_limit: RateLimit) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    /// Sets the backoff strategy.
    #[must_use]
    pub fn backoff(mut self, backoff: Arc<dyn BackoffStrategy>) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Builds the [`NotionConfig`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if `api_key` is not set
    /// - [`ConfigError::InvalidBaseUrl`] if the base URL does not parse
    pub fn build(self) -> Result<NotionConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        let raw_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or(ConfigError::InvalidBaseUrl { url: raw_url })?;

        let rate_limit = self.rate_limit.unwrap_or_default();

        Ok(NotionConfig {
            api_key,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            user_agent: self.user_agent,
            base_url,
            timeout: self.timeout.unwrap_or(Duration::from_secs(30)),
            max_retries: self.max_retries.unwrap_or(8),
            retry_on_429: self.retry_on_429.unwrap_or(true),
            rate_limit,
            backoff: self
                .backoff
                .unwrap_or_else(|| Arc::new(ExponentialJitterBackoff::default())),
        })
    }
}
