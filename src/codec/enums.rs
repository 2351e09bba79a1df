//! Closed string enums.
//!
//! The API uses plain strings for every discriminator and option field, but
//! each one only admits a fixed set of values. [`ClosedEnum`] captures that
//! set; [`closed_enum!`] generates the Rust enum, its accepted-value table,
//! and the serde glue so that decoding an unknown value always fails with
//! [`CodecError::InvalidEnum`] instead of being coerced.
//!
//! # Example
//!
//! ```rust
//! use notion_api::codec::{decode_enum, validate, ClosedEnum};
//! use notion_api::models::SortDirection;
//! use serde_json::json;
//!
//! assert!(validate("ascending", SortDirection::ACCEPTED));
//! let direction: SortDirection = decode_enum(&json!("descending")).unwrap();
//! assert_eq!(direction, SortDirection::Descending);
//! assert!(decode_enum::<SortDirection>(&json!("sideways")).is_err());
//! ```

use serde_json::Value;

use crate::codec::CodecError;

/// A string-backed enum restricted to a fixed set of wire values.
pub trait ClosedEnum: Sized + Copy + 'static {
    /// The type name used in error messages.
    const NAME: &'static str;

    /// Every wire value accepted for this enum.
    const ACCEPTED: &'static [&'static str];

    /// Maps an accepted wire value to its variant.
    fn from_accepted(value: &str) -> Option<Self>;

    /// Returns the wire value for this variant.
    fn as_str(&self) -> &'static str;
}

/// Returns `true` if `candidate` is one of `accepted`.
#[must_use]
pub fn validate(candidate: &str, accepted: &[&str]) -> bool {
    accepted.contains(&candidate)
}

/// Parses a raw string into a closed enum.
///
/// # Errors
///
/// Returns [`CodecError::InvalidEnum`] if the value is not accepted.
pub fn parse_enum<E: ClosedEnum>(value: &str) -> Result<E, CodecError> {
    let invalid = || CodecError::InvalidEnum {
        enum_name: E::NAME,
        value: value.to_string(),
    };
    if !validate(value, E::ACCEPTED) {
        return Err(invalid());
    }
    E::from_accepted(value).ok_or_else(invalid)
}

/// Decodes a JSON string into a closed enum.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if `raw` is not a JSON string and
/// [`CodecError::InvalidEnum`] if it is not an accepted value.
pub fn decode_enum<E: ClosedEnum>(raw: &Value) -> Result<E, CodecError> {
    match raw {
        Value::String(value) => parse_enum(value),
        other => {
            let value: String = serde_json::from_value(other.clone())?;
            parse_enum(&value)
        }
    }
}

/// Declares a closed string enum.
///
/// Each variant is bound to its wire literal. The generated type gets
/// `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq` and `Hash`, a `const fn
/// as_str`, an `ACCEPTED` table, `Display`, `FromStr` and serde
/// implementations that route through [`parse_enum`].
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every wire value accepted for this enum.
            pub const ACCEPTED: &'static [&'static str] = &[$($value),+];

            /// Returns the wire value for this variant.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl $crate::codec::ClosedEnum for $name {
            const NAME: &'static str = stringify!($name);
            const ACCEPTED: &'static [&'static str] = &[$($value),+];

            fn from_accepted(value: &str) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn as_str(&self) -> &'static str {
                $name::as_str(self)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($name::as_str(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::codec::CodecError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::codec::parse_enum(s)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str($name::as_str(self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                $crate::codec::parse_enum(&raw).map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }
    };
}

pub(crate) use closed_enum;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    closed_enum! {
        /// Test enum.
        enum Fruit {
            Apple = "apple",
            BloodOrange = "blood_orange",
        }
    }

    #[test]
    fn test_validate_checks_membership() {
        assert!(validate("apple", Fruit::ACCEPTED));
        assert!(!validate("Apple", Fruit::ACCEPTED));
        assert!(!validate("", Fruit::ACCEPTED));
    }

    #[test]
    fn test_every_accepted_value_round_trips() {
        for value in Fruit::ACCEPTED {
            let parsed: Fruit = value.parse().unwrap();
            assert_eq!(parsed.as_str(), *value);
            let encoded = serde_json::to_value(parsed).unwrap();
            let decoded: Fruit = serde_json::from_value(encoded).unwrap();
            assert_eq!(decoded, parsed);
        }
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        let result = decode_enum::<Fruit>(&json!("banana"));
        assert!(matches!(
            result,
            Err(CodecError::InvalidEnum { enum_name: "Fruit", value }) if value == "banana"
        ));
    }

    #[test]
    fn test_non_string_is_a_json_error() {
        let result = decode_enum::<Fruit>(&json!(42));
        assert!(matches!(result, Err(CodecError::Json(_))));
    }

    #[test]
    fn test_serde_rejects_unknown_value() {
        let result = serde_json::from_value::<Fruit>(json!("pear"));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("pear"));
        assert!(message.contains("Fruit"));
    }

    #[test]
    fn test_display_uses_wire_value() {
        assert_eq!(Fruit::BloodOrange.to_string(), "blood_orange");
    }

    fn assert_accepted_values_round_trip<E>()
    where
        E: ClosedEnum + std::fmt::Debug + PartialEq + serde::Serialize + serde::de::DeserializeOwned,
    {
        for value in E::ACCEPTED {
            let parsed: E = parse_enum(value).unwrap();
            assert_eq!(ClosedEnum::as_str(&parsed), *value, "{}", E::NAME);
            assert_eq!(serde_json::to_value(parsed).unwrap(), json!(value));
            assert_eq!(decode_enum::<E>(&json!(value)).unwrap(), parsed);
        }
        for bogus in ["", "UNKNOWN", "not_a_real_value"] {
            assert!(
                matches!(decode_enum::<E>(&json!(bogus)), Err(CodecError::InvalidEnum { .. })),
                "{} accepted {bogus:?}",
                E::NAME
            );
        }
        if let Some(first) = E::ACCEPTED.first() {
            let shouted = first.to_uppercase();
            assert!(parse_enum::<E>(&shouted).is_err(), "{} is case-insensitive", E::NAME);
        }
    }

    #[test]
    fn test_model_enums_accept_exactly_their_table() {
        use crate::models::*;

        assert_accepted_values_round_trip::<BlockType>();
        assert_accepted_values_round_trip::<ParentType>();
        assert_accepted_values_round_trip::<FileType>();
        assert_accepted_values_round_trip::<IconType>();
        assert_accepted_values_round_trip::<PropertyType>();
        assert_accepted_values_round_trip::<NumberFormat>();
        assert_accepted_values_round_trip::<SelectColor>();
        assert_accepted_values_round_trip::<RollupFunction>();
        assert_accepted_values_round_trip::<FilterConditionType>();
        assert_accepted_values_round_trip::<TextCondition>();
        assert_accepted_values_round_trip::<NumberCondition>();
        assert_accepted_values_round_trip::<CheckboxCondition>();
        assert_accepted_values_round_trip::<SelectCondition>();
        assert_accepted_values_round_trip::<MultiSelectCondition>();
        assert_accepted_values_round_trip::<DateCondition>();
        assert_accepted_values_round_trip::<PeopleCondition>();
        assert_accepted_values_round_trip::<FilesCondition>();
        assert_accepted_values_round_trip::<RelationCondition>();
        assert_accepted_values_round_trip::<FormulaCondition>();
        assert_accepted_values_round_trip::<ObjectKind>();
        assert_accepted_values_round_trip::<FormulaType>();
        assert_accepted_values_round_trip::<RollupValueType>();
        assert_accepted_values_round_trip::<RichTextType>();
        assert_accepted_values_round_trip::<MentionType>();
        assert_accepted_values_round_trip::<AnnotationColor>();
        assert_accepted_values_round_trip::<SortTimestamp>();
        assert_accepted_values_round_trip::<SortDirection>();
        assert_accepted_values_round_trip::<UserType>();
    }
}
