//! Scalar kinds and values.
//!
//! Every scalar property is declared with a [`ScalarKind`]. A kind is a
//! closed description of the values a property may hold, and it carries the
//! codec between those values and their text in a document:
//!
//! | Kind | Rust type | Text |
//! |------|-----------|------|
//! | `Bool` | `bool` | `true` / `false` (any case on input) |
//! | `Int16`, `Int32`, `Int64`, `UInt32` | `i16`, `i32`, `i64`, `u32` | decimal digits |
//! | `Float` | `f64` | shortest round-trip decimal |
//! | `Text` | `String` | the text itself |
//! | `Symbol` | enums declared with [`symbols!`](crate::symbols) | one of a fixed set of names |
//! | `Timestamp` | `DateTime<Utc>` | RFC 3339 |
//!
//! Rendering never depends on locale.
//!
//! ## Typed access
//!
//! ```rust
//! use easy_markup::{ScalarKind, ScalarType, ScalarValue};
//!
//! let value = ScalarKind::Int16.decode("Amount", "7").unwrap();
//! assert_eq!(value, ScalarValue::Integer(7));
//! assert_eq!(i16::from_scalar(&value), Some(7));
//! assert_eq!(value.render(), "7");
//!
//! // Out of range for the declared kind
//! assert!(ScalarKind::Int16.decode("Amount", "70000").is_err());
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::{Error, Result};

/// The declared type of a scalar property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Int16,
    Int32,
    Int64,
    UInt32,
    Float,
    Text,
    /// An enumerated symbol drawn from a fixed, case-sensitive set of names.
    Symbol(&'static [&'static str]),
    Timestamp,
}

impl ScalarKind {
    /// Returns the name of this kind as used in error messages.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easy_markup::ScalarKind;
    ///
    /// assert_eq!(ScalarKind::Int16.name(), "int16");
    /// assert_eq!(ScalarKind::Symbol(&["A", "B"]).name(), "symbol");
    /// ```
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int16 => "int16",
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::UInt32 => "uint32",
            ScalarKind::Float => "float",
            ScalarKind::Text => "text",
            ScalarKind::Symbol(_) => "symbol",
            ScalarKind::Timestamp => "timestamp",
        }
    }

    const fn integer_range(&self) -> Option<(i64, i64)> {
        match self {
            ScalarKind::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            ScalarKind::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            ScalarKind::Int64 => Some((i64::MIN, i64::MAX)),
            ScalarKind::UInt32 => Some((0, u32::MAX as i64)),
            _ => None,
        }
    }

    /// Returns `true` if `value` is a legal value of this kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easy_markup::{ScalarKind, ScalarValue};
    ///
    /// assert!(ScalarKind::Int16.accepts(&ScalarValue::Integer(25)));
    /// assert!(!ScalarKind::UInt32.accepts(&ScalarValue::Integer(-1)));
    /// assert!(!ScalarKind::Symbol(&["A"]).accepts(&ScalarValue::Symbol("B".into())));
    /// ```
    #[must_use]
    pub fn accepts(&self, value: &ScalarValue) -> bool {
        match (self, value) {
            (ScalarKind::Bool, ScalarValue::Bool(_)) => true,
            (ScalarKind::Float, ScalarValue::Float(_)) => true,
            (ScalarKind::Text, ScalarValue::Text(_)) => true,
            (ScalarKind::Timestamp, ScalarValue::Timestamp(_)) => true,
            (ScalarKind::Symbol(symbols), ScalarValue::Symbol(symbol)) => {
                symbols.contains(&symbol.as_str())
            }
            (kind, ScalarValue::Integer(i)) => kind
                .integer_range()
                .is_some_and(|(min, max)| (min..=max).contains(i)),
            _ => false,
        }
    }

    /// Decodes the text of the property `key` into a value of this kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeConversion`] if `text` is not a legal rendering of this kind.
    pub fn decode(&self, key: &str, text: &str) -> Result<ScalarValue> {
        let value = match self {
            ScalarKind::Bool => {
                if text.eq_ignore_ascii_case("true") {
                    Some(ScalarValue::Bool(true))
                } else if text.eq_ignore_ascii_case("false") {
                    Some(ScalarValue::Bool(false))
                } else {
                    None
                }
            }
            ScalarKind::Int16 | ScalarKind::Int32 | ScalarKind::Int64 | ScalarKind::UInt32 => {
                text.parse::<i64>().ok().map(ScalarValue::Integer)
            }
            ScalarKind::Float => text.parse::<f64>().ok().map(ScalarValue::Float),
            ScalarKind::Text => Some(ScalarValue::Text(text.to_string())),
            ScalarKind::Symbol(symbols) => symbols
                .iter()
                .find(|symbol| **symbol == text)
                .map(|symbol| ScalarValue::Symbol((*symbol).to_string())),
            ScalarKind::Timestamp => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| ScalarValue::Timestamp(dt.with_timezone(&Utc))),
        };

        value
            .filter(|v| self.accepts(v))
            .ok_or_else(|| Error::type_conversion(key, self.name(), text))
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded scalar value.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Symbol(String),
    Timestamp(DateTime<Utc>),
}

impl ScalarValue {
    /// Renders this value in its canonical, unescaped text form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easy_markup::ScalarValue;
    ///
    /// assert_eq!(ScalarValue::Bool(true).render(), "true");
    /// assert_eq!(ScalarValue::Float(2.5).render(), "2.5");
    /// assert_eq!(ScalarValue::Float(3.0).render(), "3");
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            ScalarValue::Bool(b) => b.to_string(),
            ScalarValue::Integer(i) => i.to_string(),
            ScalarValue::Float(f) => f.to_string(),
            ScalarValue::Text(s) | ScalarValue::Symbol(s) => s.clone(),
            ScalarValue::Timestamp(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) | ScalarValue::Symbol(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Serialize for ScalarValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ScalarValue::Bool(b) => serializer.serialize_bool(*b),
            ScalarValue::Integer(i) => serializer.serialize_i64(*i),
            ScalarValue::Float(f) => serializer.serialize_f64(*f),
            ScalarValue::Text(s) | ScalarValue::Symbol(s) => serializer.serialize_str(s),
            ScalarValue::Timestamp(dt) => dt.serialize(serializer),
        }
    }
}

/// A Rust type that can be stored in a scalar property.
///
/// Implemented for the primitive types listed in the [module docs](self) and
/// for enums declared with [`symbols!`](crate::symbols).
pub trait ScalarType: Sized {
    /// The kind a property holding this type is declared with.
    fn kind() -> ScalarKind;

    /// Extracts this type from a decoded value, if the value fits.
    fn from_scalar(value: &ScalarValue) -> Option<Self>;

    fn into_scalar(self) -> ScalarValue;
}

macro_rules! impl_integer_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ScalarType for $ty {
                fn kind() -> ScalarKind {
                    ScalarKind::$kind
                }

                fn from_scalar(value: &ScalarValue) -> Option<Self> {
                    value.as_i64().and_then(|i| <$ty>::try_from(i).ok())
                }

                fn into_scalar(self) -> ScalarValue {
                    ScalarValue::Integer(i64::from(self))
                }
            }
        )*
    };
}

impl_integer_scalar!(i16 => Int16, i32 => Int32, i64 => Int64, u32 => UInt32);

impl ScalarType for bool {
    fn kind() -> ScalarKind {
        ScalarKind::Bool
    }

    fn from_scalar(value: &ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Bool(self)
    }
}

impl ScalarType for f64 {
    fn kind() -> ScalarKind {
        ScalarKind::Float
    }

    fn from_scalar(value: &ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Float(self)
    }
}

impl ScalarType for String {
    fn kind() -> ScalarKind {
        ScalarKind::Text
    }

    fn from_scalar(value: &ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Text(self)
    }
}

impl ScalarType for DateTime<Utc> {
    fn kind() -> ScalarKind {
        ScalarKind::Timestamp
    }

    fn from_scalar(value: &ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Timestamp(dt) => Some(*dt),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Timestamp(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_decode_integers_respects_width() {
        assert_eq!(
            ScalarKind::Int32.decode("Count", "7").unwrap(),
            ScalarValue::Integer(7)
        );
        assert_eq!(
            ScalarKind::Int16.decode("Count", "-32768").unwrap(),
            ScalarValue::Integer(-32768)
        );
        assert!(ScalarKind::Int16.decode("Count", "32768").is_err());
        assert!(ScalarKind::UInt32.decode("Count", "-1").is_err());
        assert!(ScalarKind::Int64.decode("Count", "seven").is_err());
        assert!(ScalarKind::Int32.decode("Count", "1.5").is_err());
    }

    #[test]
    fn test_decode_bool_is_case_insensitive() {
        assert_eq!(
            ScalarKind::Bool.decode("On", "True").unwrap(),
            ScalarValue::Bool(true)
        );
        assert_eq!(
            ScalarKind::Bool.decode("On", "FALSE").unwrap(),
            ScalarValue::Bool(false)
        );
        assert!(ScalarKind::Bool.decode("On", "yes").is_err());
    }

    #[test]
    fn test_decode_symbol_is_exact() {
        let kind = ScalarKind::Symbol(&["Titanium", "Copper"]);
        assert_eq!(
            kind.decode("ItemID", "Copper").unwrap(),
            ScalarValue::Symbol("Copper".to_string())
        );
        let err = kind.decode("ItemID", "copper").unwrap_err();
        assert!(matches!(err, Error::TypeConversion { ref kind, .. } if kind == "symbol"));
    }

    #[test]
    fn test_timestamp_codec() {
        let value = ScalarKind::Timestamp
            .decode("At", "2024-01-15T12:30:00+02:00")
            .unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(value, ScalarValue::Timestamp(expected));
        assert_eq!(value.render(), "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_float_rendering_round_trips() {
        for f in [0.1, -2.75, 1e-7, 123456789.125] {
            let text = ScalarValue::Float(f).render();
            assert_eq!(
                ScalarKind::Float.decode("F", &text).unwrap(),
                ScalarValue::Float(f)
            );
        }
    }

    #[test]
    fn test_scalar_type_conversions() {
        assert_eq!(i16::kind(), ScalarKind::Int16);
        assert_eq!(i16::from_scalar(&ScalarValue::Integer(70000)), None);
        assert_eq!(u32::from_scalar(&ScalarValue::Integer(5)), Some(5));
        assert_eq!(
            String::from_scalar(&"x".to_string().into_scalar()),
            Some("x".to_string())
        );
        assert_eq!(bool::from_scalar(&ScalarValue::Integer(1)), None);
    }

    #[test]
    fn test_serialize_as_plain_json() {
        assert_eq!(
            serde_json::to_value(ScalarValue::Integer(3)).unwrap(),
            serde_json::json!(3)
        );
        assert_eq!(
            serde_json::to_value(ScalarValue::Symbol("Glass".into())).unwrap(),
            serde_json::json!("Glass")
        );
    }
}
