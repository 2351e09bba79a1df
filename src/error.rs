//! Error types for client configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that a
//! misconfigured client fails when it is built rather than on its first
//! request.
//!
//! # Example
//!
//! ```rust
//! use notion_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a Notion integration token.")]
    EmptyApiKey,

    /// API version is not one this client speaks.
    #[error("Unsupported API version '{version}'. Supported versions: 2021-05-13, 2021-08-16.")]
    UnsupportedApiVersion {
        /// The version string that was provided.
        version: String,
    },

    /// Base URL does not parse.
    #[error("Invalid base URL '{url}'. Please provide an absolute URL such as 'https://api.notion.com'.")]
    InvalidBaseUrl {
        /// The URL that was provided.
        url: String,
    },

    /// Rate limit settings are out of range.
    #[error("Invalid rate limit: {reason}")]
    InvalidRateLimit {
        /// Why the settings were rejected.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
