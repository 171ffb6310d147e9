//! # easy_markup
//!
//! A reader and writer for EasyMarkup, a small `key:value;` markup language,
//! with a schema-driven, strongly typed property model.
//!
//! ## What is EasyMarkup?
//!
//! EasyMarkup is a hand-editable format for nested configuration records. A
//! document is a property; a property is a key, a `:`, a value and a `;`.
//! Values are scalars, parenthesized composites of further properties, or
//! parenthesized comma-separated lists:
//!
//! ```text
//! CustomRecipe:
//! (
//!     ItemID: AdvancedWiringKit;   # what gets crafted #
//!     AmountCrafted: 2;
//!     Ingredients:
//!     (
//!         Ingredient: ( ItemID: Silver; Required: 2; );,
//!         Ingredient: ( ItemID: ComputerChip; Required: 1; );
//!     );
//!     LinkedItemIDs: ( Glass, "Lead Ingot" );
//! );
//! ```
//!
//! Whitespace outside literal strings is insignificant and `#...#` blocks are
//! comments. See [`grammar`] for the lexical rules.
//!
//! ## Key Features
//!
//! - **Schemas as prototypes**: composites are declared once as a [`Schema`]
//!   and every parsed instance is a fresh copy of it
//! - **Typed scalars**: a closed set of [`ScalarKind`]s with explicit codecs,
//!   extensible with [`symbols!`] enums
//! - **All-or-nothing parsing**: a failed parse leaves the target untouched
//! - **Round-trip safe**: compact output parses back to an equal tree
//! - **Pretty-printing** that is lossless and idempotent
//! - **serde export** of parsed trees to any serde format
//!
//! ## Quick Start
//!
//! ```rust
//! use easy_markup::{Property, Schema};
//!
//! let schema = Schema::new([
//!     Property::typed::<String>("ItemID").required(),
//!     Property::typed::<i16>("AmountCrafted"),
//! ]);
//! let prototype = Property::collection("CustomRecipe", &schema);
//!
//! let recipe = easy_markup::from_str(
//!     &prototype,
//!     "CustomRecipe: ( ItemID: Glass; AmountCrafted: 2; );",
//! )
//! .unwrap();
//!
//! let fields = recipe.as_collection().unwrap();
//! assert_eq!(fields.value::<String>("ItemID").as_deref(), Some("Glass"));
//! assert_eq!(fields.value::<i16>("AmountCrafted"), Some(2));
//!
//! assert_eq!(
//!     easy_markup::to_string(&recipe),
//!     "CustomRecipe:(ItemID:Glass;AmountCrafted:2;);"
//! );
//! ```
//!
//! ## Typed Records
//!
//! Implement [`FromCollection`] to project parsed composites into your own
//! types, checking business rules on the way. See [`typed`].
//!
//! ## Logging
//!
//! With the `tracing` feature the parser emits `tracing` events for key
//! adoption, list sizes and extraction hooks. Without it the logging calls
//! compile to nothing.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Parsing and writing a small schema
//! - **`custom_recipe.rs`** - A full recipe schema with typed projection
//! - **`pretty_print.rs`** - Laying out compact documents
//! - **`custom_options.rs`** - Indentation, line endings and strict keys
//!
//! Run any demo with: `cargo run --example <name>`

pub mod buffer;
pub mod collection;
pub mod de;
pub mod error;
pub mod grammar;
pub mod macros;
pub mod options;
pub mod pretty;
pub mod property;
pub mod ser;
mod tracing_macros;
pub mod typed;
pub mod value;

pub use buffer::CursorBuffer;
pub use collection::{CollectionProperty, ExtractHook, ListProperty, Schema};
pub use error::{Error, Result};
pub use grammar::{check_key, escape_special_characters};
pub use options::{LineEnding, MarkupOptions};
pub use pretty::{pretty_print, pretty_print_with_options};
pub use property::{Property, ScalarProperty};
pub use typed::{FromCollection, ValidationError};
pub use value::{ScalarKind, ScalarType, ScalarValue};

use std::io;

/// Parses a document into a fresh copy of `prototype`.
///
/// Key mismatches are tolerated: the result keeps the prototype's key. Use
/// [`from_str_with_options`] with [`MarkupOptions::strict`] to reject them.
///
/// # Examples
///
/// ```rust
/// use easy_markup::{from_str, Error, Property, ScalarKind};
///
/// let count = Property::scalar("Count", ScalarKind::Int32);
/// let parsed = from_str(&count, "Count: 7;").unwrap();
/// assert_eq!(parsed.as_scalar().unwrap().get::<i32>(), Some(7));
///
/// assert!(matches!(from_str(&count, "# nothing #"), Err(Error::EmptyInput)));
/// ```
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if the text holds only whitespace and
/// comments, or any parse error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(prototype: &Property, s: &str) -> Result<Property> {
    from_str_with_options(prototype, s, &MarkupOptions::default())
}

/// Parses a document into a fresh copy of `prototype` with custom options.
///
/// # Examples
///
/// ```rust
/// use easy_markup::{from_str_with_options, Error, MarkupOptions, Property, ScalarKind};
///
/// let bar = Property::scalar("bar", ScalarKind::Int32);
/// let result = from_str_with_options(&bar, "foo:1;", &MarkupOptions::strict());
/// assert!(matches!(result, Err(Error::KeyMismatch { .. })));
/// ```
///
/// # Errors
///
/// See [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(
    prototype: &Property,
    s: &str,
    options: &MarkupOptions,
) -> Result<Property> {
    let mut property = prototype.copy();
    if !property.parse_with_options(s, options)? {
        return Err(Error::EmptyInput);
    }
    Ok(property)
}

/// Parses a document from UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or do not parse.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(prototype: &Property, v: &[u8]) -> Result<Property> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(prototype, s)
}

/// Parses a document from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use easy_markup::{from_reader, Property, ScalarKind};
/// use std::io::Cursor;
///
/// let flag = Property::scalar("Enabled", ScalarKind::Bool);
/// let parsed = from_reader(&flag, Cursor::new(b"Enabled: TRUE;")).unwrap();
/// assert_eq!(parsed.as_scalar().unwrap().get::<bool>(), Some(true));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, or any error of [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(prototype: &Property, mut reader: R) -> Result<Property>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(prototype, &string)
}

/// Parses a document holding any number of properties shaped like `prototype`.
///
/// # Examples
///
/// ```rust
/// use easy_markup::{from_str_many, Property, Schema};
///
/// let item = Property::collection("", &Schema::new([Property::typed::<u32>("Id")]));
/// let items = from_str_many(&item, "A:(Id:1;); B:(Id:2;);").unwrap();
/// let keys: Vec<_> = items.iter().map(Property::key).collect();
/// assert_eq!(keys, vec!["A", "B"]);
/// ```
///
/// # Errors
///
/// Returns the first parse error; nothing is returned for the other properties.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_many(prototype: &Property, s: &str) -> Result<Vec<Property>> {
    de::parse_many(prototype, s, false)
}

/// Parses a document written under `T::KEY` and projects it into `T`.
///
/// The document's key must match.
///
/// # Errors
///
/// Returns a parse error, [`Error::EmptyInput`], or [`Error::Validation`] if
/// the projection rejects the parsed values.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_typed<T: FromCollection>(s: &str) -> Result<T> {
    let parsed = from_str_with_options(&T::prototype(), s, &MarkupOptions::strict())?;
    let collection = parsed
        .as_collection()
        .ok_or_else(|| Error::custom("typed prototype is not a collection"))?;
    Ok(T::from_collection(collection)?)
}

/// Writes a property in compact form.
///
/// Same as `property.to_string()`.
#[must_use]
pub fn to_string(property: &Property) -> String {
    property.to_string()
}

/// Writes a property in pretty-printed form with the default options.
///
/// # Examples
///
/// ```rust
/// use easy_markup::{from_str, to_string_pretty, Property, Schema};
///
/// let point = Property::collection("P", &Schema::new([Property::typed::<i32>("X")]));
/// let point = from_str(&point, "P:(X:1;);").unwrap();
/// assert_eq!(to_string_pretty(&point), "P:\n(\n    X: 1;\n);");
/// ```
#[must_use]
pub fn to_string_pretty(property: &Property) -> String {
    property.pretty_print()
}

#[must_use]
pub fn to_string_pretty_with_options(property: &Property, options: &MarkupOptions) -> String {
    property.pretty_print_with_options(options)
}

/// Writes a property in compact form to a writer.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(mut writer: W, property: &Property) -> Result<()>
where
    W: io::Write,
{
    writer
        .write_all(property.to_string().as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

/// Writes a property in pretty-printed form to a writer.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_pretty<W>(mut writer: W, property: &Property, options: &MarkupOptions) -> Result<()>
where
    W: io::Write,
{
    writer
        .write_all(property.pretty_print_with_options(options).as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> Property {
        Property::collection(
            "Point",
            &Schema::new([Property::typed::<i32>("X"), Property::typed::<i32>("Y")]),
        )
    }

    #[test]
    fn test_round_trip() {
        let parsed = from_str(&point(), "Point: ( X: 1; Y: -2; );").unwrap();
        let text = to_string(&parsed);
        assert_eq!(text, "Point:(X:1;Y:-2;);");
        assert_eq!(from_str(&point(), &text).unwrap(), parsed);
    }

    #[test]
    fn test_pretty_round_trip() {
        let parsed = from_str(&point(), "Point:(X:1;Y:2;);").unwrap();
        let pretty = to_string_pretty(&parsed);
        assert_eq!(from_str(&point(), &pretty).unwrap(), parsed);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(from_str(&point(), ""), Err(Error::EmptyInput)));
        assert!(matches!(
            from_str(&point(), " #a#\n#b# "),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_prototype_is_not_modified() {
        let prototype = point();
        let _ = from_str(&prototype, "Point:(X:5;);").unwrap();
        assert_eq!(prototype, point());
    }

    #[test]
    fn test_writers() {
        let parsed = from_str(&point(), "Point:(X:1;);").unwrap();

        let mut buffer = Vec::new();
        to_writer(&mut buffer, &parsed).unwrap();
        assert_eq!(buffer, b"Point:(X:1;Y:;);");

        let mut buffer = Vec::new();
        let options = MarkupOptions::new().with_indent(1);
        to_writer_pretty(&mut buffer, &parsed, &options).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Point:\n(\n X: 1;\n Y:;\n);"
        );
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        assert!(matches!(
            from_slice(&point(), &[0xff, 0xfe]),
            Err(Error::Custom(_))
        ));
        assert!(from_slice(&point(), b"Point:(X:1;);").is_ok());
    }

    #[test]
    fn test_properties_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Property>();
        assert_send_sync::<Schema>();
        assert_send_sync::<Error>();
    }
}
