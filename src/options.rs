//! Configuration options for parsing and pretty-printing.
//!
//! This module provides types to customize how EasyMarkup is read and written:
//!
//! - [`MarkupOptions`]: Main configuration struct
//! - [`LineEnding`]: Line break emitted by the pretty printer
//!
//! Options are plain data and (de)serialize with serde, so a host application
//! can keep them in its own configuration file. Missing fields take their
//! defaults.
//!
//! ## Examples
//!
//! ```rust
//! use easy_markup::{MarkupOptions, LineEnding};
//!
//! let options = MarkupOptions::new()
//!     .with_indent(2)
//!     .with_line_ending(LineEnding::CrLf);
//! assert_eq!(options.indent, 2);
//! ```

use serde::{Deserialize, Serialize};

/// Line break used by the pretty printer.
///
/// # Examples
///
/// ```rust
/// use easy_markup::LineEnding;
///
/// assert_eq!(LineEnding::Lf.as_str(), "\n");
/// assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Returns the characters of this line ending.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Configuration options for EasyMarkup.
///
/// `indent` and `line_ending` only affect pretty-printed output;
/// `halt_on_key_mismatch` only affects parsing.
///
/// # Examples
///
/// ```rust
/// use easy_markup::MarkupOptions;
///
/// // Lenient parsing, 4-space indentation
/// let options = MarkupOptions::new();
/// assert_eq!(options.indent, 4);
/// assert!(!options.halt_on_key_mismatch);
///
/// // Fail when a document's key differs from the expected one
/// let options = MarkupOptions::strict();
/// assert!(options.halt_on_key_mismatch);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupOptions {
    pub indent: usize,
    pub line_ending: LineEnding,
    pub halt_on_key_mismatch: bool,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        MarkupOptions {
            indent: 4,
            line_ending: LineEnding::default(),
            halt_on_key_mismatch: false,
        }
    }
}

impl MarkupOptions {
    /// Creates default options (lenient keys, 4-space indent, LF line endings).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that reject documents whose key differs from the property's key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easy_markup::{MarkupOptions, Property, ScalarKind};
    ///
    /// let mut bar = Property::scalar("bar", ScalarKind::Int32);
    /// assert!(bar.parse_with_options("foo:1;", &MarkupOptions::strict()).is_err());
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        MarkupOptions {
            halt_on_key_mismatch: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per nesting level).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easy_markup::MarkupOptions;
    ///
    /// let options = MarkupOptions::new().with_indent(2);
    /// assert_eq!(options.indent, 2);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the line ending used by the pretty printer.
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Sets whether parsing fails when a document's key differs from the property's key.
    #[must_use]
    pub fn with_halt_on_key_mismatch(mut self, halt: bool) -> Self {
        self.halt_on_key_mismatch = halt;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_load_with_defaults() {
        let options: MarkupOptions = serde_json::from_str(r#"{ "indent": 2 }"#).unwrap();
        assert_eq!(options.indent, 2);
        assert_eq!(options.line_ending, LineEnding::Lf);
        assert!(!options.halt_on_key_mismatch);

        let options: MarkupOptions =
            serde_json::from_str(r#"{ "line_ending": "CrLf", "halt_on_key_mismatch": true }"#)
                .unwrap();
        assert_eq!(options, MarkupOptions::strict().with_line_ending(LineEnding::CrLf));
    }
}
