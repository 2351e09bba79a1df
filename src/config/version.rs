//! Notion API version definitions.
//!
//! The version is sent on every request in the `Notion-Version` header.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Notion API version.
///
/// Only versions whose payload shapes this client models are accepted;
/// anything else is rejected when parsed.
///
/// # Example
///
/// ```rust
/// use notion_api::ApiVersion;
///
/// let version: ApiVersion = "2021-05-13".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2021_05_13);
/// assert_eq!(ApiVersion::latest().to_string(), "2021-08-16");
/// assert!("2022-06-28".parse::<ApiVersion>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiVersion {
    /// API version 2021-05-13
    V2021_05_13,
    /// API version 2021-08-16
    V2021_08_16,
}

impl ApiVersion {
    /// Returns the latest supported API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2021_08_16
    }

    /// Returns all supported versions, oldest first.
    #[must_use]
    pub fn supported_versions() -> Vec<Self> {
        vec![Self::V2021_05_13, Self::V2021_08_16]
    }

    /// Returns the header value for this version.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V2021_05_13 => "2021-05-13",
            Self::V2021_08_16 => "2021-08-16",
        }
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::supported_versions()
            .into_iter()
            .find(|version| version.as_str() == s)
            .ok_or_else(|| ConfigError::UnsupportedApiVersion {
                version: s.to_string(),
            })
    }
}
