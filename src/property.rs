//! The property model.
//!
//! A [`Property`] is one named unit of a document: a [`ScalarProperty`], a
//! [`CollectionProperty`] (a fixed-schema composite), or a [`ListProperty`].
//! Trees are built from schemas of prototypes; parsing fills in a fresh copy
//! of the prototype tree and serialization walks the same tree back to text.
//!
//! ```rust
//! use easy_markup::{Property, Schema, ScalarKind};
//!
//! let schema = Schema::new([
//!     Property::scalar("ItemID", ScalarKind::Int32),
//!     Property::scalar("Amount", ScalarKind::Int16),
//! ]);
//! let mut root = Property::collection("R", &schema);
//! assert!(root.parse("R:(ItemID:42;Amount:3;);", false).unwrap());
//!
//! let root = root.as_collection().unwrap();
//! assert_eq!(root.value::<i32>("ItemID"), Some(42));
//! assert_eq!(root.to_string(), "R:(ItemID:42;Amount:3;);");
//! ```

use std::borrow::Cow;

use crate::collection::{CollectionProperty, ListProperty, Schema};
use crate::value::{ScalarKind, ScalarType, ScalarValue};
use crate::{Error, Result};

/// A named unit of an EasyMarkup document.
#[derive(Clone, Debug)]
pub enum Property {
    Scalar(ScalarProperty),
    Collection(CollectionProperty),
    List(ListProperty),
}

impl Property {
    /// Creates a scalar prototype of the given kind.
    #[must_use]
    pub fn scalar(key: &str, kind: ScalarKind) -> Self {
        Property::Scalar(ScalarProperty::new(key, kind))
    }

    /// Creates a scalar prototype whose kind is taken from `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easy_markup::{Property, ScalarKind};
    ///
    /// let amount = Property::typed::<i16>("AmountCrafted");
    /// assert_eq!(amount.as_scalar().unwrap().kind(), ScalarKind::Int16);
    /// ```
    #[must_use]
    pub fn typed<T: ScalarType>(key: &str) -> Self {
        Property::scalar(key, T::kind())
    }

    /// Creates a composite whose children are copies of the schema's prototypes.
    #[must_use]
    pub fn collection(key: &str, schema: &Schema) -> Self {
        Property::Collection(CollectionProperty::new(key, schema))
    }

    /// Creates a list of bare scalar values of one kind.
    #[must_use]
    pub fn scalar_list(key: &str, kind: ScalarKind) -> Self {
        Property::List(ListProperty::of_scalars(key, kind))
    }

    /// Creates a list of composites, each item keyed `item_key` and shaped by `schema`.
    ///
    /// An empty `item_key` adopts whatever key each item carries in the document.
    #[must_use]
    pub fn collection_list(key: &str, item_key: &str, schema: &Schema) -> Self {
        Property::List(ListProperty::of_collections(
            key,
            CollectionProperty::new(item_key, schema),
        ))
    }

    /// Marks this prototype as required inside its parent composite.
    #[must_use]
    pub fn required(mut self) -> Self {
        match &mut self {
            Property::Scalar(s) => s.required = true,
            Property::Collection(c) => c.required = true,
            Property::List(l) => l.required = true,
        }
        self
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        match self {
            Property::Scalar(s) => s.required,
            Property::Collection(c) => c.required,
            Property::List(l) => l.required,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Property::Scalar(s) => &s.key,
            Property::Collection(c) => c.key(),
            Property::List(l) => l.key(),
        }
    }

    pub(crate) fn key_mut(&mut self) -> &mut String {
        match self {
            Property::Scalar(s) => &mut s.key,
            Property::Collection(c) => &mut c.key,
            Property::List(l) => &mut l.key,
        }
    }

    /// Returns the value as it appears between `:` and `;`, before escaping.
    ///
    /// Composites and lists render their parenthesized body.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easy_markup::{Property, ScalarKind};
    ///
    /// let mut list = Property::scalar_list("L", ScalarKind::Int32);
    /// list.parse("L:(1,2);", false).unwrap();
    /// assert_eq!(list.serialized_value(), "(1,2)");
    /// ```
    #[must_use]
    pub fn serialized_value(&self) -> Cow<'_, str> {
        match self {
            Property::Scalar(s) => Cow::Borrowed(s.serialized_value()),
            Property::Collection(c) => Cow::Owned(c.body()),
            Property::List(l) => Cow::Owned(l.body()),
        }
    }

    /// Returns a fresh, empty instance sharing this property's key and schema.
    ///
    /// This is how prototypes are instantiated: values are never carried over.
    #[must_use]
    pub fn copy(&self) -> Self {
        match self {
            Property::Scalar(s) => Property::Scalar(s.copy()),
            Property::Collection(c) => Property::Collection(c.copy()),
            Property::List(l) => Property::List(l.copy()),
        }
    }

    /// Returns the name of this property's variant.
    #[must_use]
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Property::Scalar(_) => "scalar",
            Property::Collection(_) => "collection",
            Property::List(_) => "list",
        }
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&ScalarProperty> {
        match self {
            Property::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_scalar_mut(&mut self) -> Option<&mut ScalarProperty> {
        match self {
            Property::Scalar(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_collection(&self) -> Option<&CollectionProperty> {
        match self {
            Property::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_collection_mut(&mut self) -> Option<&mut CollectionProperty> {
        match self {
            Property::Collection(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&ListProperty> {
        match self {
            Property::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListProperty> {
        match self {
            Property::List(l) => Some(l),
            _ => None,
        }
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self, other) {
            (Property::Scalar(a), Property::Scalar(b)) => a == b,
            (Property::Collection(a), Property::Collection(b)) => a == b,
            (Property::List(a), Property::List(b)) => a == b,
            _ => false,
        }
    }
}

impl From<ScalarProperty> for Property {
    fn from(scalar: ScalarProperty) -> Self {
        Property::Scalar(scalar)
    }
}

impl From<CollectionProperty> for Property {
    fn from(collection: CollectionProperty) -> Self {
        Property::Collection(collection)
    }
}

impl From<ListProperty> for Property {
    fn from(list: ListProperty) -> Self {
        Property::List(list)
    }
}

/// A property holding a single value of a declared [`ScalarKind`].
///
/// The serialized text is re-rendered on every value change, so it always
/// reflects the typed value.
///
/// # Examples
///
/// ```rust
/// use easy_markup::ScalarProperty;
///
/// let mut amount = ScalarProperty::typed::<i16>("AmountCrafted");
/// assert_eq!(amount.get::<i16>(), None);
///
/// amount.set(4i16).unwrap();
/// assert_eq!(amount.get::<i16>(), Some(4));
/// assert_eq!(amount.serialized_value(), "4");
/// assert_eq!(amount.to_string(), "AmountCrafted:4;");
/// ```
#[derive(Clone, Debug)]
pub struct ScalarProperty {
    pub(crate) key: String,
    kind: ScalarKind,
    value: Option<ScalarValue>,
    serialized: String,
    pub(crate) required: bool,
}

impl ScalarProperty {
    #[must_use]
    pub fn new(key: &str, kind: ScalarKind) -> Self {
        ScalarProperty {
            key: key.to_string(),
            kind,
            value: None,
            serialized: String::new(),
            required: false,
        }
    }

    #[must_use]
    pub fn typed<T: ScalarType>(key: &str) -> Self {
        ScalarProperty::new(key, T::kind())
    }

    /// Creates a typed scalar holding `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeConversion`] if `value` is not legal for `T`'s kind.
    pub fn with_value<T: ScalarType>(key: &str, value: T) -> Result<Self> {
        let mut scalar = ScalarProperty::typed::<T>(key);
        scalar.set(value)?;
        Ok(scalar)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Returns the decoded value, or `None` if the property is absent or empty.
    #[must_use]
    pub fn value(&self) -> Option<&ScalarValue> {
        self.value.as_ref()
    }

    /// Returns the value as `T`, or `None` if absent or of another type.
    #[must_use]
    pub fn get<T: ScalarType>(&self) -> Option<T> {
        self.value.as_ref().and_then(T::from_scalar)
    }

    #[must_use]
    pub fn serialized_value(&self) -> &str {
        &self.serialized
    }

    /// Sets the value and re-renders the serialized text.
    ///
    /// An empty text value cannot be told apart from an absent one in a
    /// document, so it clears the property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeConversion`] if `value` is not legal for this property's kind.
    pub fn set_value(&mut self, value: ScalarValue) -> Result<()> {
        if !self.kind.accepts(&value) {
            return Err(Error::type_conversion(
                &self.key,
                self.kind.name(),
                &value.render(),
            ));
        }
        if matches!(&value, ScalarValue::Text(s) if s.is_empty()) {
            self.clear();
            return Ok(());
        }
        self.serialized = value.render();
        self.value = Some(value);
        Ok(())
    }

    /// Sets a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeConversion`] if `T` does not fit this property's kind.
    pub fn set<T: ScalarType>(&mut self, value: T) -> Result<()> {
        self.set_value(value.into_scalar())
    }

    /// Decodes `text` with this property's kind and stores the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeConversion`] if `text` does not decode.
    pub fn set_serialized(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            self.clear();
            return Ok(());
        }
        let value = self.kind.decode(&self.key, text)?;
        self.set_value(value)
    }

    pub fn clear(&mut self) {
        self.value = None;
        self.serialized.clear();
    }

    #[must_use]
    pub fn copy(&self) -> Self {
        ScalarProperty {
            key: self.key.clone(),
            kind: self.kind,
            value: None,
            serialized: String::new(),
            required: self.required,
        }
    }
}

impl PartialEq for ScalarProperty {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.kind == other.kind && self.value == other.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_rerenders_serialized_value() {
        let mut scalar = ScalarProperty::typed::<f64>("Ratio");
        scalar.set(0.5).unwrap();
        assert_eq!(scalar.serialized_value(), "0.5");
        scalar.set_serialized("2").unwrap();
        assert_eq!(scalar.get::<f64>(), Some(2.0));
        assert_eq!(scalar.serialized_value(), "2");
    }

    #[test]
    fn test_set_rejects_wrong_kind() {
        let mut scalar = ScalarProperty::typed::<i16>("Amount");
        assert!(matches!(
            scalar.set(70000i32),
            Err(Error::TypeConversion { .. })
        ));
        assert!(scalar.set("x".to_string()).is_err());
        assert_eq!(scalar.value(), None);
    }

    #[test]
    fn test_empty_text_is_absent() {
        let mut scalar = ScalarProperty::with_value("Name", "x".to_string()).unwrap();
        scalar.set(String::new()).unwrap();
        assert_eq!(scalar.value(), None);
        assert_eq!(scalar.serialized_value(), "");
    }

    #[test]
    fn test_copy_drops_value_keeps_shape() {
        let prototype = Property::typed::<i32>("Count").required();
        let mut instance = prototype.copy();
        instance.as_scalar_mut().unwrap().set(3).unwrap();

        let fresh = instance.copy();
        assert_eq!(fresh, prototype);
        assert!(fresh.is_required());
        assert_ne!(fresh, instance);
    }

    #[test]
    fn test_equality_requires_same_variant_key_and_kind() {
        let a = Property::Scalar(ScalarProperty::with_value("N", 1i32).unwrap());
        let b = Property::Scalar(ScalarProperty::with_value("N", 1i64).unwrap());
        let c = Property::Scalar(ScalarProperty::with_value("M", 1i32).unwrap());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Property::scalar_list("N", ScalarKind::Int32));
    }
}
