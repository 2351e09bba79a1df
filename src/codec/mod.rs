//! JSON codec for the API's polymorphic payloads.
//!
//! # Overview
//!
//! - [`ClosedEnum`] and [`closed_enum!`]: string enums with a fixed accepted set
//! - [`TaggedUnion`] and [`tagged_union!`]: discriminator-keyed sum types
//! - [`NamedEntries`]: objects keyed by entry name, held as a list
//! - [`Accumulate`] and [`merge_page`]: appending list pages to one collection
//!
//! All failures are reported as [`CodecError`].

mod enums;
mod errors;
mod keyed;
mod merge;
mod tagged;

pub(crate) use enums::closed_enum;
pub(crate) use tagged::tagged_union;

pub use enums::{decode_enum, parse_enum, validate, ClosedEnum};
pub use errors::CodecError;
pub use keyed::{decode_keyed, encode_keyed, Named, NamedEntries};
pub use merge::{merge_page, Accumulate};
pub use tagged::{
    decode_payload, decode_tagged, decode_tagged_value, deserialize_tagged, encode_payload,
    encode_tagged, serialize_tagged, TaggedUnion, Variant,
};
