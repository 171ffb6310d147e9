//! EasyMarkup serialization.
//!
//! This module writes [`Property`] trees back to text and exports them
//! through `serde`.
//!
//! ## Overview
//!
//! The compact form is what [`Display`](std::fmt::Display) produces for every
//! property type:
//!
//! - **Scalars**: `key:value;`, the value escaped for output
//! - **Composites**: `key:(` + children in schema order + `);`
//! - **Lists**: `key:(` + items joined by `,` + `);`
//! - **Absent values**: `key:;`
//!
//! No whitespace is emitted. Use [`pretty_print`](crate::pretty_print) for
//! the indented form.
//!
//! ## serde export
//!
//! Every property implements [`Serialize`], so a parsed tree can be handed to
//! any serde format. Scalars become their value (or `null`), composites become
//! maps in schema order and lists become sequences:
//!
//! ```rust
//! use easy_markup::{Property, Schema};
//!
//! let schema = Schema::new([
//!     Property::typed::<String>("ItemID"),
//!     Property::typed::<i16>("AmountCrafted"),
//! ]);
//! let mut recipe = Property::collection("Recipe", &schema);
//! recipe.parse("Recipe:(ItemID:Glass;AmountCrafted:2;);", false).unwrap();
//!
//! let json = serde_json::to_string(&recipe).unwrap();
//! assert_eq!(json, r#"{"ItemID":"Glass","AmountCrafted":2}"#);
//! ```

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::Serialize;

use crate::grammar::{
    escape_special_characters, BEGIN_COMPLEX_VALUE, FINISH_COMPLEX_VALUE, KEY_DELIMITER,
    LIST_ITEM_SPLITTER, VALUE_DELIMITER,
};
use crate::{CollectionProperty, ListProperty, Property, ScalarProperty};

/// Writes the compact form of a property tree.
struct Writer {
    output: String,
}

impl Writer {
    fn new() -> Self {
        Writer {
            output: String::with_capacity(128),
        }
    }

    fn into_inner(self) -> String {
        self.output
    }

    fn write_key(&mut self, key: &str) {
        self.output.push_str(&escape_special_characters(key));
        self.output.push(KEY_DELIMITER);
    }

    fn write_property(&mut self, property: &Property) {
        self.write_key(property.key());
        self.write_value(property);
        self.output.push(VALUE_DELIMITER);
    }

    fn write_value(&mut self, property: &Property) {
        match property {
            Property::Scalar(scalar) => self.write_scalar(scalar),
            Property::Collection(collection) => self.write_collection_body(collection),
            Property::List(list) => self.write_list_body(list),
        }
    }

    fn write_scalar(&mut self, scalar: &ScalarProperty) {
        self.output
            .push_str(&escape_special_characters(scalar.serialized_value()));
    }

    fn write_collection_body(&mut self, collection: &CollectionProperty) {
        self.output.push(BEGIN_COMPLEX_VALUE);
        for (_, child) in collection.iter() {
            self.write_property(child);
        }
        self.output.push(FINISH_COMPLEX_VALUE);
    }

    fn write_list_body(&mut self, list: &ListProperty) {
        self.output.push(BEGIN_COMPLEX_VALUE);
        for (i, item) in list.iter().enumerate() {
            if i > 0 {
                self.output.push(LIST_ITEM_SPLITTER);
            }
            match item {
                Property::Scalar(scalar) => self.write_scalar(scalar),
                item => self.write_property(item),
            }
        }
        self.output.push(FINISH_COMPLEX_VALUE);
    }
}

impl CollectionProperty {
    /// The parenthesized children, as written between `:` and `;`.
    pub(crate) fn body(&self) -> String {
        let mut writer = Writer::new();
        writer.write_collection_body(self);
        writer.into_inner()
    }
}

impl ListProperty {
    /// The parenthesized items, as written between `:` and `;`.
    pub(crate) fn body(&self) -> String {
        let mut writer = Writer::new();
        writer.write_list_body(self);
        writer.into_inner()
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = Writer::new();
        writer.write_property(self);
        f.write_str(&writer.into_inner())
    }
}

impl fmt::Display for ScalarProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{KEY_DELIMITER}{}{VALUE_DELIMITER}",
            escape_special_characters(&self.key),
            escape_special_characters(self.serialized_value())
        )
    }
}

impl fmt::Display for CollectionProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = Writer::new();
        writer.write_key(&self.key);
        writer.write_collection_body(self);
        writer.output.push(VALUE_DELIMITER);
        f.write_str(&writer.into_inner())
    }
}

impl fmt::Display for ListProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = Writer::new();
        writer.write_key(&self.key);
        writer.write_list_body(self);
        writer.output.push(VALUE_DELIMITER);
        f.write_str(&writer.into_inner())
    }
}

impl Serialize for Property {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Property::Scalar(scalar) => scalar.serialize(serializer),
            Property::Collection(collection) => collection.serialize(serializer),
            Property::List(list) => list.serialize(serializer),
        }
    }
}

impl Serialize for ScalarProperty {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.value() {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl Serialize for CollectionProperty {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, child) in self.iter() {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}

impl Serialize for ListProperty {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self.iter() {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}
