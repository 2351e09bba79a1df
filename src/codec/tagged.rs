//! Tagged unions keyed by a discriminator value.
//!
//! The API nests variant data under a key equal to the discriminator's
//! value:
//!
//! ```json
//! { "type": "to_do", "to_do": { "text": [], "checked": true } }
//! ```
//!
//! A Rust sum type models the closed set of shapes. Each variant is paired
//! with a [`Variant`] registry entry holding its decode and encode
//! functions, so dispatch on the runtime string is a table lookup rather
//! than field introspection. Common fields (ids, timestamps) live on the
//! enclosing struct and sit beside the union via `#[serde(flatten)]`.
//!
//! Filter payloads use the same shape without a `type` field:
//!
//! ```json
//! { "checkbox": { "equals": true } }
//! ```
//!
//! Unions declared with `implied` find their tag by looking for the single
//! registered key present in the object and never emit a discriminator.
//!
//! # Absent payloads
//!
//! When the discriminator is present but its payload key is not, the
//! payload decodes as its type's empty form: `null`, then `{}`, then `[]`
//! are tried in turn. A payload type with no empty form (a bare number, a
//! bare bool) fails with [`CodecError::Payload`].

use serde::de::{self, DeserializeOwned};
use serde::ser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::codec::{decode_enum, ClosedEnum, CodecError};

/// One registry entry of a [`TaggedUnion`].
pub struct Variant<T> {
    /// The discriminator value selecting this variant.
    pub tag: &'static str,
    /// Builds the variant from the payload found under `tag`, if any.
    pub decode: fn(Option<Value>) -> Result<T, CodecError>,
    /// Encodes the payload of `T` if it is this variant.
    pub encode: fn(&T) -> Option<Result<Value, CodecError>>,
}

/// A sum type carried on the wire as a discriminator plus a nested payload.
pub trait TaggedUnion: Sized + 'static {
    /// The closed enum of discriminator values.
    type Tag: ClosedEnum;

    /// The type name used in error messages.
    const TYPE_NAME: &'static str;

    /// The discriminator field name.
    const DISCRIMINATOR: &'static str = "type";

    /// Whether the discriminator is written as its own field.
    const EMBED_DISCRIMINATOR: bool = true;

    /// Decode and encode functions, one entry per discriminator value.
    const REGISTRY: &'static [Variant<Self>];

    /// Returns the discriminator of this value.
    fn tag(&self) -> Self::Tag;
}

fn find_variant<T: TaggedUnion>(tag: &str) -> Result<&'static Variant<T>, CodecError> {
    T::REGISTRY
        .iter()
        .find(|variant| variant.tag == tag)
        .ok_or_else(|| CodecError::UnregisteredVariant {
            type_name: T::TYPE_NAME,
            tag: tag.to_string(),
        })
}

/// Decodes a tagged union from a raw JSON value.
///
/// # Errors
///
/// Returns [`CodecError::NotAnObject`] if `raw` is not an object, plus any
/// error from [`decode_tagged`].
pub fn decode_tagged_value<T: TaggedUnion>(raw: Value) -> Result<T, CodecError> {
    match raw {
        Value::Object(map) => decode_tagged(map),
        _ => Err(CodecError::NotAnObject {
            type_name: T::TYPE_NAME,
        }),
    }
}

/// Decodes a tagged union from a JSON object.
///
/// Extra keys are ignored; they belong to the enclosing struct.
///
/// # Errors
///
/// - [`CodecError::MissingDiscriminator`] if no tag can be found
/// - [`CodecError::InvalidEnum`] if the tag is outside the accepted set
/// - [`CodecError::Payload`] if the nested payload does not decode
pub fn decode_tagged<T: TaggedUnion>(mut map: Map<String, Value>) -> Result<T, CodecError> {
    let missing = || CodecError::MissingDiscriminator {
        type_name: T::TYPE_NAME,
        field: T::DISCRIMINATOR,
    };

    let tag = if T::EMBED_DISCRIMINATOR {
        let raw = map.get(T::DISCRIMINATOR).ok_or_else(missing)?;
        decode_enum::<T::Tag>(raw)?.as_str()
    } else {
        T::REGISTRY
            .iter()
            .map(|variant| variant.tag)
            .find(|tag| map.contains_key(*tag))
            .ok_or_else(missing)?
    };

    let variant = find_variant::<T>(tag)?;
    (variant.decode)(map.remove(tag))
}

/// Encodes a tagged union as `{discriminator: tag, tag: payload}`.
///
/// # Errors
///
/// Returns [`CodecError::Payload`] if the payload fails to serialize.
pub fn encode_tagged<T: TaggedUnion>(value: &T) -> Result<Map<String, Value>, CodecError> {
    let tag = value.tag().as_str();
    let variant = find_variant::<T>(tag)?;
    let payload = (variant.encode)(value).ok_or_else(|| CodecError::UnregisteredVariant {
        type_name: T::TYPE_NAME,
        tag: tag.to_string(),
    })??;

    let mut map = Map::new();
    if T::EMBED_DISCRIMINATOR {
        map.insert(T::DISCRIMINATOR.to_string(), Value::String(tag.to_string()));
    }
    map.insert(tag.to_string(), payload);
    Ok(map)
}

/// Decodes the payload of one variant.
///
/// # Errors
///
/// Returns [`CodecError::Payload`] if the payload does not fit `P`.
pub fn decode_payload<T: TaggedUnion, P: DeserializeOwned>(
    tag: &'static str,
    payload: Option<Value>,
) -> Result<P, CodecError> {
    let wrap = |source| CodecError::Payload {
        type_name: T::TYPE_NAME,
        tag,
        source,
    };

    match payload {
        Some(value) => serde_json::from_value(value).map_err(wrap),
        None => serde_json::from_value(Value::Null)
            .or_else(|_| serde_json::from_value(Value::Object(Map::new())))
            .or_else(|_| serde_json::from_value(Value::Array(Vec::new())))
            .map_err(wrap),
    }
}

/// Encodes the payload of one variant.
///
/// # Errors
///
/// Returns [`CodecError::Payload`] if the payload fails to serialize.
pub fn encode_payload<T: TaggedUnion, P: Serialize>(
    tag: &'static str,
    payload: &P,
) -> Result<Value, CodecError> {
    serde_json::to_value(payload).map_err(|source| CodecError::Payload {
        type_name: T::TYPE_NAME,
        tag,
        source,
    })
}

/// `Serialize` body shared by every generated union.
///
/// # Errors
///
/// Propagates encode failures as serializer errors.
pub fn serialize_tagged<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: TaggedUnion,
    S: Serializer,
{
    encode_tagged(value)
        .map_err(ser::Error::custom)?
        .serialize(serializer)
}

/// `Deserialize` body shared by every generated union.
///
/// # Errors
///
/// Propagates decode failures as deserializer errors.
pub fn deserialize_tagged<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: TaggedUnion,
    D: Deserializer<'de>,
{
    let map = Map::<String, Value>::deserialize(deserializer)?;
    decode_tagged(map).map_err(de::Error::custom)
}

/// Declares a tagged union over a [`closed_enum!`](crate::codec) tag type.
///
/// Union variants share their names with the tag enum's variants. Write
/// `(tag = Kind)` for a `"type"` discriminator or `(tag = Kind, implied)`
/// for filter-style objects that carry only the payload key.
macro_rules! tagged_union {
    (@impl [$($meta:tt)*] $vis:vis $name:ident $tag:ident $disc:literal $embed:literal {
        $( [$($vmeta:tt)*] $variant:ident($payload:ty) )+
    }) => {
        $($meta)*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $(
                $($vmeta)*
                $variant($payload),
            )+
        }

        impl $crate::codec::TaggedUnion for $name {
            type Tag = $tag;

            const TYPE_NAME: &'static str = stringify!($name);
            const DISCRIMINATOR: &'static str = $disc;
            const EMBED_DISCRIMINATOR: bool = $embed;
            const REGISTRY: &'static [$crate::codec::Variant<Self>] = &[
                $(
                    $crate::codec::Variant {
                        tag: $tag::$variant.as_str(),
                        decode: |payload| {
                            $crate::codec::decode_payload::<$name, $payload>(
                                $tag::$variant.as_str(),
                                payload,
                            )
                            .map($name::$variant)
                        },
                        encode: |value| match value {
                            $name::$variant(payload) => Some($crate::codec::encode_payload::<$name, _>(
                                $tag::$variant.as_str(),
                                payload,
                            )),
                            #[allow(unreachable_patterns)]
                            _ => None,
                        },
                    },
                )+
            ];

            fn tag(&self) -> $tag {
                match self {
                    $(Self::$variant(_) => $tag::$variant,)+
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                $crate::codec::serialize_tagged(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::codec::deserialize_tagged(deserializer)
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident(tag = $tag:ident) {
            $( $(#[$vmeta:meta])* $variant:ident($payload:ty) ),+ $(,)?
        }
    ) => {
        $crate::codec::tagged_union!(@impl [$(#[$meta])*] $vis $name $tag "type" true {
            $( [$(#[$vmeta])*] $variant($payload) )+
        });
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident(tag = $tag:ident, implied) {
            $( $(#[$vmeta:meta])* $variant:ident($payload:ty) ),+ $(,)?
        }
    ) => {
        $crate::codec::tagged_union!(@impl [$(#[$meta])*] $vis $name $tag "condition" false {
            $( [$(#[$vmeta])*] $variant($payload) )+
        });
    };
}

pub(crate) use tagged_union;
