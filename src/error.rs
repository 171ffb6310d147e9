//! Error types for EasyMarkup parsing and serialization.
//!
//! This module provides the engine's error taxonomy. Every parse failure
//! aborts the whole document: the engine never hands out partially parsed
//! trees and makes no attempt at error recovery.
//!
//! ## Error Categories
//!
//! - **Empty input**: nothing to parse (a recoverable "field absent" signal)
//! - **Key mismatch**: the document's key differs from the one the property was built with
//! - **Type conversion**: scalar text that does not decode to the declared kind
//! - **Buffer underflow**: the document ended before an expected delimiter
//! - **Schema violation**: unknown, duplicate or missing children, malformed list items
//! - **Syntax**: misplaced quotes, unescaped structural characters, trailing content
//!
//! Business-level checks ("amount must be in 1..=25") are not engine errors.
//! They live in [`ValidationError`](crate::ValidationError) and are only
//! wrapped into [`Error::Validation`] at the typed boundary.
//!
//! ## Examples
//!
//! ```rust
//! use easy_markup::{Error, Property, ScalarKind};
//!
//! let mut count = Property::scalar("Count", ScalarKind::Int32);
//! let err = count.parse("Count:seven;", false).unwrap_err();
//! assert!(matches!(err, Error::TypeConversion { .. }));
//! ```

use std::fmt;
use thiserror::Error;

use crate::typed::ValidationError;

/// Represents all possible errors that can occur while parsing or writing EasyMarkup.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// There was nothing left to parse after comments and whitespace were removed
    #[error("No data to parse")]
    EmptyInput,

    /// The document's key differs from the key the property was constructed with
    #[error("Key mismatch: expected `{expected}` but found `{found}`")]
    KeyMismatch { expected: String, found: String },

    /// Scalar text could not be decoded to the declared kind
    #[error("Cannot convert `{text}` to {kind} for key `{key}`")]
    TypeConversion {
        key: String,
        kind: String,
        text: String,
    },

    /// The input ended before an expected character was found
    #[error("Unexpected end of input: expected {expected}")]
    BufferUnderflow { expected: String },

    /// The document does not fit the schema of the property being parsed
    #[error("Schema violation in `{key}`: {msg}")]
    SchemaViolation { key: String, msg: String },

    /// Malformed markup
    #[error("Syntax error: {msg}")]
    Syntax { msg: String },

    /// A parsed document failed schema-layer validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a key mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easy_markup::Error;
    ///
    /// let err = Error::key_mismatch("bar", "foo");
    /// assert!(err.to_string().contains("expected `bar`"));
    /// ```
    pub fn key_mismatch(expected: &str, found: &str) -> Self {
        Error::KeyMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a type conversion error for a scalar whose text does not match its kind.
    pub fn type_conversion(key: &str, kind: &str, text: &str) -> Self {
        Error::TypeConversion {
            key: key.to_string(),
            kind: kind.to_string(),
            text: text.to_string(),
        }
    }

    /// Creates a buffer underflow error describing what the parser was waiting for.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easy_markup::Error;
    ///
    /// let err = Error::underflow("';'");
    /// assert!(err.to_string().contains("expected ';'"));
    /// ```
    pub fn underflow(expected: &str) -> Self {
        Error::BufferUnderflow {
            expected: expected.to_string(),
        }
    }

    /// Creates a schema violation error for the property with the given key.
    pub fn schema_violation(key: &str, msg: &str) -> Self {
        Error::SchemaViolation {
            key: key.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a syntax error.
    pub fn syntax<T: fmt::Display>(msg: T) -> Self {
        Error::Syntax {
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easy_markup::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
