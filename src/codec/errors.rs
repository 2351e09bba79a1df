//! Error types for the JSON codec layer.
//!
//! Every decode or encode failure inside the codec surfaces as a
//! [`CodecError`]. Enum membership failures are kept distinct from
//! structural failures so callers can tell a new server-side value apart
//! from a malformed payload.
//!
//! # Example
//!
//! ```rust
//! use notion_api::codec::{parse_enum, CodecError};
//! use notion_api::models::BlockType;
//!
//! let result = parse_enum::<BlockType>("carousel");
//! assert!(matches!(
//!     result,
//!     Err(CodecError::InvalidEnum { enum_name: "BlockType", .. })
//! ));
//! ```

use thiserror::Error;

/// Errors raised while converting between wire JSON and typed values.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A string is outside the accepted set of a closed enum.
    #[error("'{value}' is not a valid value for {enum_name}")]
    InvalidEnum {
        /// The name of the enum type being decoded.
        enum_name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A tagged value or keyed collection was not a JSON object.
    #[error("expected a JSON object for {type_name}")]
    NotAnObject {
        /// The name of the type being decoded.
        type_name: &'static str,
    },

    /// The discriminator field of a tagged value is missing.
    #[error("{type_name} is missing its '{field}' discriminator")]
    MissingDiscriminator {
        /// The name of the tagged type.
        type_name: &'static str,
        /// The discriminator field that was expected.
        field: &'static str,
    },

    /// The discriminator is a valid enum value with no registered codec.
    #[error("{type_name} has no codec registered for '{tag}'")]
    UnregisteredVariant {
        /// The name of the tagged type.
        type_name: &'static str,
        /// The discriminator value.
        tag: String,
    },

    /// The payload nested under a discriminator failed to decode or encode.
    #[error("invalid '{tag}' payload for {type_name}: {source}")]
    Payload {
        /// The name of the tagged type.
        type_name: &'static str,
        /// The discriminator value owning the payload.
        tag: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// Malformed JSON or a value that does not fit the target type.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    /// Returns `true` if this error is an enum membership failure.
    #[must_use]
    pub const fn is_invalid_enum(&self) -> bool {
        matches!(self, Self::InvalidEnum { .. })
    }
}
