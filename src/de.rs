//! EasyMarkup parsing.
//!
//! This module implements the parse protocol for [`Property`] trees.
//!
//! ## Overview
//!
//! Parsing runs in two passes over one document:
//!
//! 1. **Cleaning**: whitespace and `#...#` comments are stripped into a
//!    [`CursorBuffer`], keeping literal strings and escapes intact.
//! 2. **Extraction**: the property reads its key, then its value, consuming
//!    the cleaned buffer from the front. Composites and lists hand the same
//!    buffer down to copies of their prototypes.
//!
//! A parse is all or nothing: it runs against a fresh copy of the property,
//! which only replaces the original once the whole subtree has parsed.
//!
//! ## Usage
//!
//! ```rust
//! use easy_markup::{Property, ScalarKind};
//!
//! let mut count = Property::scalar("Count", ScalarKind::Int32);
//! assert!(count.parse("Count: 7;", false).unwrap());
//! assert_eq!(count.as_scalar().unwrap().get::<i32>(), Some(7));
//!
//! // Nothing to parse is not an error
//! assert!(!count.parse("  # just a comment #  ", false).unwrap());
//!
//! // A failed parse leaves the property untouched
//! assert!(count.parse("Count: seven;", false).is_err());
//! assert_eq!(count.as_scalar().unwrap().get::<i32>(), Some(7));
//! ```

use std::collections::HashSet;

use crate::grammar::{
    self, BEGIN_COMPLEX_VALUE, FINISH_COMPLEX_VALUE, LIST_ITEM_SPLITTER, VALUE_DELIMITER,
};
use crate::{
    debug, trace, CollectionProperty, CursorBuffer, Error, ListProperty, MarkupOptions, Property,
    Result, ScalarProperty,
};

impl Property {
    /// Parses `raw` into this property.
    ///
    /// Returns `Ok(false)` if the text holds nothing but whitespace and
    /// comments. A property without a key adopts the document's key; a
    /// property with a key keeps it, and fails on a different document key
    /// only when `halt_on_key_mismatch` is set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easy_markup::{Error, Property, ScalarKind};
    ///
    /// let mut bar = Property::scalar("bar", ScalarKind::Int32);
    /// assert!(matches!(bar.parse("foo:1;", true), Err(Error::KeyMismatch { .. })));
    ///
    /// assert!(bar.parse("foo:1;", false).unwrap());
    /// assert_eq!(bar.key(), "bar");
    /// assert_eq!(bar.as_scalar().unwrap().get::<i32>(), Some(1));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyMismatch`], [`Error::TypeConversion`],
    /// [`Error::BufferUnderflow`], [`Error::SchemaViolation`] or
    /// [`Error::Syntax`]; on error the property is left unchanged.
    pub fn parse(&mut self, raw: &str, halt_on_key_mismatch: bool) -> Result<bool> {
        let mut clean = grammar::clean_value(&mut CursorBuffer::from(raw), false)?;
        if clean.is_empty() {
            return Ok(false);
        }

        let mut fresh = self.copy();
        fresh.extract(&mut clean, halt_on_key_mismatch)?;
        if !clean.is_empty() {
            return Err(Error::syntax(format!(
                "unexpected content after `{}`: `{clean}`",
                fresh.key()
            )));
        }

        *self = fresh;
        Ok(true)
    }

    /// Parses `raw` into this property using the given options.
    ///
    /// # Errors
    ///
    /// See [`Property::parse`].
    pub fn parse_with_options(&mut self, raw: &str, options: &MarkupOptions) -> Result<bool> {
        self.parse(raw, options.halt_on_key_mismatch)
    }

    /// Reads `key:value;` from the front of a cleaned buffer.
    pub(crate) fn extract(&mut self, buffer: &mut CursorBuffer, halt: bool) -> Result<()> {
        let found = grammar::read_key(buffer)?;
        self.adopt_key(found, halt)?;
        self.extract_value(buffer, halt)
    }

    fn adopt_key(&mut self, found: String, halt: bool) -> Result<()> {
        let key = self.key_mut();
        if key.is_empty() {
            trace!("Adopting key {:?}", found);
            *key = found;
        } else if halt && *key != found {
            return Err(Error::key_mismatch(key, &found));
        }
        Ok(())
    }

    /// Reads the value and its terminator; the key has already been consumed.
    pub(crate) fn extract_value(&mut self, buffer: &mut CursorBuffer, halt: bool) -> Result<()> {
        if buffer.peek_start() == Some(VALUE_DELIMITER) {
            buffer.pop_from_start()?;
            trace!("Empty value for {:?}", self.key());
            return Ok(());
        }

        match self {
            Property::Scalar(scalar) => scalar.extract_value(buffer),
            Property::Collection(collection) => collection.extract_value(buffer, halt),
            Property::List(list) => list.extract_value(buffer, halt),
        }
    }
}

/// Parses a document holding one or more properties shaped like `prototype`.
pub(crate) fn parse_many(
    prototype: &Property,
    raw: &str,
    halt_on_key_mismatch: bool,
) -> Result<Vec<Property>> {
    let mut clean = grammar::clean_value(&mut CursorBuffer::from(raw), false)?;
    let mut properties = Vec::new();
    while !clean.is_empty() {
        let mut property = prototype.copy();
        property.extract(&mut clean, halt_on_key_mismatch)?;
        properties.push(property);
    }
    debug!("Parsed {} properties", properties.len());
    Ok(properties)
}

impl ScalarProperty {
    fn extract_value(&mut self, buffer: &mut CursorBuffer) -> Result<()> {
        let (text, _) = grammar::read_until_delimiter(buffer, &[VALUE_DELIMITER])?;
        self.set_serialized(&text)
    }
}

impl CollectionProperty {
    fn extract_value(&mut self, buffer: &mut CursorBuffer, halt: bool) -> Result<()> {
        grammar::expect(buffer, BEGIN_COMPLEX_VALUE)?;

        let mut seen = HashSet::with_capacity(self.properties.len());
        let mut present = HashSet::with_capacity(self.properties.len());
        loop {
            match buffer.peek_start() {
                None => return Err(Error::underflow("')'")),
                Some(FINISH_COMPLEX_VALUE) => {
                    buffer.pop_from_start()?;
                    break;
                }
                Some(_) => {}
            }

            let key = grammar::read_key(buffer)?;
            let Some(child) = self.properties.get_mut(&key) else {
                return Err(Error::schema_violation(
                    &self.key,
                    &format!("unknown key `{key}`"),
                ));
            };
            if !seen.insert(key.clone()) {
                return Err(Error::schema_violation(
                    &self.key,
                    &format!("duplicate key `{key}`"),
                ));
            }
            if buffer.peek_start() != Some(VALUE_DELIMITER) {
                present.insert(key);
            }
            child.extract_value(buffer, halt)?;
        }
        grammar::expect(buffer, VALUE_DELIMITER)?;

        if let Some((name, _)) = self
            .properties
            .iter()
            .find(|(name, child)| child.is_required() && !present.contains(name.as_str()))
        {
            return Err(Error::schema_violation(
                &self.key,
                &format!("missing required key `{name}`"),
            ));
        }

        if let Some(hook) = self.on_extracted {
            trace!("Running extraction hook for {:?}", self.key);
            hook(self)?;
        }
        Ok(())
    }
}

impl ListProperty {
    fn extract_value(&mut self, buffer: &mut CursorBuffer, halt: bool) -> Result<()> {
        grammar::expect(buffer, BEGIN_COMPLEX_VALUE)?;
        self.items.clear();

        if buffer.peek_start() == Some(FINISH_COMPLEX_VALUE) {
            buffer.pop_from_start()?;
        } else {
            loop {
                let mut item = self.item.copy();
                let delimiter = match &mut item {
                    Property::Scalar(scalar) => {
                        let (text, delimiter) = grammar::read_until_delimiter(
                            buffer,
                            &[LIST_ITEM_SPLITTER, FINISH_COMPLEX_VALUE],
                        )?;
                        if text.is_empty() {
                            return Err(Error::schema_violation(
                                &self.key,
                                &format!("empty item at position {}", self.items.len()),
                            ));
                        }
                        scalar.set_serialized(&text)?;
                        delimiter
                    }
                    item => {
                        item.extract(buffer, halt)?;
                        buffer
                            .pop_from_start()
                            .map_err(|_| Error::underflow("',' or ')'"))?
                    }
                };
                self.items.push(item);

                match delimiter {
                    LIST_ITEM_SPLITTER => continue,
                    FINISH_COMPLEX_VALUE => break,
                    other => {
                        return Err(Error::schema_violation(
                            &self.key,
                            &format!(
                                "item {} does not match the item prototype: unexpected `{other}`",
                                self.items.len()
                            ),
                        ))
                    }
                }
            }
        }
        grammar::expect(buffer, VALUE_DELIMITER)?;

        trace!("List {:?} holds {} items", self.key, self.items.len());
        Ok(())
    }
}
