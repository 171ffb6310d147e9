//! Typed views over parsed composites.
//!
//! The engine itself only knows about keys, kinds and values. Application
//! types sit on top: they declare the schema they are parsed with and how to
//! project a parsed [`CollectionProperty`] into themselves, checking whatever
//! business rules apply on the way.
//!
//! ```rust
//! use easy_markup::typed::{ensure_range, require};
//! use easy_markup::{CollectionProperty, FromCollection, Property, Schema, ValidationError};
//!
//! struct Ingredient {
//!     item_id: String,
//!     required: i16,
//! }
//!
//! impl FromCollection for Ingredient {
//!     const KEY: &'static str = "Ingredient";
//!
//!     fn schema() -> Schema {
//!         Schema::new([
//!             Property::typed::<String>("ItemID"),
//!             Property::typed::<i16>("Required"),
//!         ])
//!     }
//!
//!     fn from_collection(c: &CollectionProperty) -> Result<Self, ValidationError> {
//!         Ok(Ingredient {
//!             item_id: require(c, "ItemID")?,
//!             required: ensure_range("Required", c.value("Required").unwrap_or(1), 1, 99)?,
//!         })
//!     }
//! }
//!
//! let ingredient: Ingredient =
//!     easy_markup::from_str_typed("Ingredient:(ItemID:Copper;Required:2;);").unwrap();
//! assert_eq!(ingredient.item_id, "Copper");
//! assert_eq!(ingredient.required, 2);
//!
//! assert!(easy_markup::from_str_typed::<Ingredient>("Ingredient:(Required:2;);").is_err());
//! ```

use thiserror::Error;

use crate::value::ScalarType;
use crate::{CollectionProperty, Property, Result, Schema};

/// A schema-layer validation failure.
///
/// Kept apart from [`Error`](crate::Error): the document was well formed, but
/// its values break a rule of the type it is projected into.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required value `{key}`")]
    Missing { key: String },

    #[error("`{key}` is {value}, expected a value in {min}..={max}")]
    OutOfRange {
        key: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Invalid `{key}`: {msg}")]
    Invalid { key: String, msg: String },
}

impl ValidationError {
    pub fn missing(key: &str) -> Self {
        ValidationError::Missing {
            key: key.to_string(),
        }
    }

    pub fn out_of_range(key: &str, value: i64, min: i64, max: i64) -> Self {
        ValidationError::OutOfRange {
            key: key.to_string(),
            value,
            min,
            max,
        }
    }

    pub fn invalid<T: std::fmt::Display>(key: &str, msg: T) -> Self {
        ValidationError::Invalid {
            key: key.to_string(),
            msg: msg.to_string(),
        }
    }
}

/// A Rust type that can be projected from a parsed composite.
pub trait FromCollection: Sized {
    /// The key documents of this type are written under.
    const KEY: &'static str;

    /// The schema a composite of this type is parsed with.
    fn schema() -> Schema;

    /// Projects a parsed composite into this type.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for missing or out-of-rule values.
    fn from_collection(collection: &CollectionProperty)
        -> std::result::Result<Self, ValidationError>;

    /// An empty property to parse documents of this type into.
    #[must_use]
    fn prototype() -> Property {
        Property::collection(Self::KEY, &Self::schema())
    }
}

/// Reads the scalar child `key`, failing if it is absent.
///
/// # Errors
///
/// Returns [`ValidationError::Missing`] if the child is absent, empty or of another type.
pub fn require<T: ScalarType>(
    collection: &CollectionProperty,
    key: &str,
) -> std::result::Result<T, ValidationError> {
    collection
        .value(key)
        .ok_or_else(|| ValidationError::missing(key))
}

/// Checks that `value` lies in `min..=max`.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] otherwise.
pub fn ensure_range<T>(key: &str, value: T, min: T, max: T) -> std::result::Result<T, ValidationError>
where
    T: Into<i64> + PartialOrd + Copy,
{
    if value < min || value > max {
        return Err(ValidationError::out_of_range(
            key,
            value.into(),
            min.into(),
            max.into(),
        ));
    }
    Ok(value)
}

/// A post-extraction hook that rejects composites `T` cannot be projected from.
///
/// Attach it with [`Schema::on_extracted`] to fail at parse time instead of
/// at projection time.
///
/// # Examples
///
/// ```rust
/// use easy_markup::typed::{require, validate};
/// use easy_markup::{CollectionProperty, FromCollection, Property, Schema, ValidationError};
///
/// struct Named(String);
///
/// impl FromCollection for Named {
///     const KEY: &'static str = "Named";
///
///     fn schema() -> Schema {
///         Schema::new([Property::typed::<String>("Name")]).on_extracted(validate::<Named>)
///     }
///
///     fn from_collection(c: &CollectionProperty) -> Result<Self, ValidationError> {
///         require(c, "Name").map(Named)
///     }
/// }
///
/// let mut named = Named::prototype();
/// assert!(named.parse("Named:(Name:x;);", false).is_ok());
/// assert!(named.parse("Named:(Name:;);", false).is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::Validation`](crate::Error::Validation) with the projection's error.
pub fn validate<T: FromCollection>(collection: &CollectionProperty) -> Result<()> {
    T::from_collection(collection)?;
    Ok(())
}
