//! Composite and list properties.
//!
//! This module provides:
//!
//! - [`Schema`]: an ordered list of prototype properties, plus an optional
//!   post-extraction hook
//! - [`CollectionProperty`]: a composite whose children are fixed by a schema
//! - [`ListProperty`]: an ordered, homogeneous sequence of scalars or composites
//!
//! Children live in an [`IndexMap`] so they keep schema order no matter in
//! which order a document lists them. Each child is a *copy* of its
//! prototype; collections never share state with their schema or with each
//! other.
//!
//! ## Examples
//!
//! ```rust
//! use easy_markup::{Property, Schema};
//!
//! let ingredient = Schema::new([
//!     Property::typed::<String>("ItemID").required(),
//!     Property::typed::<i16>("Required"),
//! ]);
//! let recipe = Schema::new([
//!     Property::typed::<String>("ItemID"),
//!     Property::collection_list("Ingredients", "Ingredient", &ingredient),
//! ]);
//!
//! let mut root = Property::collection("Recipe", &recipe);
//! root.parse(
//!     "Recipe:(Ingredients:(Ingredient:(ItemID:Copper;Required:2;););ItemID:Wire;);",
//!     false,
//! )
//! .unwrap();
//!
//! let root = root.as_collection().unwrap();
//! let ingredients = root.list("Ingredients").unwrap();
//! assert_eq!(ingredients.len(), 1);
//! assert_eq!(
//!     ingredients.collections().next().unwrap().value::<i16>("Required"),
//!     Some(2)
//! );
//! ```

use indexmap::IndexMap;
use std::fmt;

use crate::typed::{FromCollection, ValidationError};
use crate::value::{ScalarKind, ScalarType};
use crate::{Error, Property, Result, ScalarProperty};

/// Post-extraction hook run after a composite's children have been parsed.
///
/// A hook sees the fully parsed composite and may reject it. It runs for
/// every composite built from the schema it is attached to, including
/// composites nested deep inside a document.
pub type ExtractHook = fn(&CollectionProperty) -> Result<()>;

/// An ordered set of prototype properties describing a composite.
#[derive(Clone, Default)]
pub struct Schema {
    fields: Vec<Property>,
    on_extracted: Option<ExtractHook>,
}

impl Schema {
    #[must_use]
    pub fn new<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = Property>,
    {
        Schema {
            fields: fields.into_iter().collect(),
            on_extracted: None,
        }
    }

    /// Attaches a post-extraction hook.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use easy_markup::{CollectionProperty, Error, Property, Result, Schema};
    ///
    /// fn positive(range: &CollectionProperty) -> Result<()> {
    ///     match range.value::<i32>("Size") {
    ///         Some(size) if size <= 0 => Err(Error::schema_violation(range.key(), "Size must be positive")),
    ///         _ => Ok(()),
    ///     }
    /// }
    ///
    /// let schema = Schema::new([Property::typed::<i32>("Size")]).on_extracted(positive);
    /// let mut range = Property::collection("Range", &schema);
    /// assert!(range.parse("Range:(Size:3;);", false).is_ok());
    /// assert!(range.parse("Range:(Size:-3;);", false).is_err());
    /// ```
    #[must_use]
    pub fn on_extracted(mut self, hook: ExtractHook) -> Self {
        self.on_extracted = Some(hook);
        self
    }

    #[must_use]
    pub fn fields(&self) -> &[Property] {
        &self.fields
    }
}

/// A composite property whose children are fixed by a [`Schema`].
#[derive(Clone)]
pub struct CollectionProperty {
    pub(crate) key: String,
    pub(crate) properties: IndexMap<String, Property>,
    pub(crate) on_extracted: Option<ExtractHook>,
    pub(crate) required: bool,
}

impl CollectionProperty {
    /// Creates a composite with fresh copies of the schema's prototypes.
    #[must_use]
    pub fn new(key: &str, schema: &Schema) -> Self {
        let mut properties = IndexMap::with_capacity(schema.fields.len());
        for field in &schema.fields {
            properties.insert(field.key().to_string(), field.copy());
        }
        CollectionProperty {
            key: key.to_string(),
            properties,
            on_extracted: schema.on_extracted,
            required: false,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the child with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Property> {
        self.properties.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Property> {
        self.properties.get_mut(key)
    }

    #[must_use]
    pub fn scalar(&self, key: &str) -> Option<&ScalarProperty> {
        self.get(key).and_then(Property::as_scalar)
    }

    #[must_use]
    pub fn collection(&self, key: &str) -> Option<&CollectionProperty> {
        self.get(key).and_then(Property::as_collection)
    }

    pub fn collection_mut(&mut self, key: &str) -> Option<&mut CollectionProperty> {
        self.get_mut(key).and_then(Property::as_collection_mut)
    }

    #[must_use]
    pub fn list(&self, key: &str) -> Option<&ListProperty> {
        self.get(key).and_then(Property::as_list)
    }

    pub fn list_mut(&mut self, key: &str) -> Option<&mut ListProperty> {
        self.get_mut(key).and_then(Property::as_list_mut)
    }

    /// Returns the typed value of the scalar child `key`.
    ///
    /// `None` if there is no such scalar child, it is empty, or it holds another type.
    #[must_use]
    pub fn value<T: ScalarType>(&self, key: &str) -> Option<T> {
        self.scalar(key).and_then(ScalarProperty::get)
    }

    /// Sets the typed value of the scalar child `key`.
    ///
    /// # Errors
    ///
    /// - [`Error::SchemaViolation`] if the schema has no scalar child `key`
    /// - [`Error::TypeConversion`] if `value` does not fit the child's kind
    pub fn set_value<T: ScalarType>(&mut self, key: &str, value: T) -> Result<()> {
        let parent = self.key.clone();
        self.get_mut(key)
            .and_then(Property::as_scalar_mut)
            .ok_or_else(|| Error::schema_violation(&parent, &format!("no scalar child `{key}`")))?
            .set(value)
    }

    /// Iterates over the children in schema order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Property> {
        self.properties.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Projects this composite into a typed view.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] produced by `T`.
    pub fn project<T: FromCollection>(&self) -> std::result::Result<T, ValidationError> {
        T::from_collection(self)
    }

    #[must_use]
    pub fn copy(&self) -> Self {
        CollectionProperty {
            key: self.key.clone(),
            properties: self
                .properties
                .iter()
                .map(|(k, p)| (k.clone(), p.copy()))
                .collect(),
            on_extracted: self.on_extracted,
            required: self.required,
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.fields)
            .field("on_extracted", &self.on_extracted.is_some())
            .finish()
    }
}

impl fmt::Debug for CollectionProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionProperty")
            .field("key", &self.key)
            .field("properties", &self.properties)
            .field("on_extracted", &self.on_extracted.is_some())
            .field("required", &self.required)
            .finish()
    }
}

impl PartialEq for CollectionProperty {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.properties == other.properties
    }
}

/// A variable-length, ordered list of properties built from one item prototype.
///
/// Items are either bare scalars (`Tags:(a,b,c);`) or full composites
/// (`Parts:(Part:(…);,Part:(…););`).
///
/// # Examples
///
/// ```rust
/// use easy_markup::{ListProperty, ScalarKind};
///
/// let mut tags = ListProperty::of_scalars("Tags", ScalarKind::Text);
/// tags.push_value("red".to_string()).unwrap();
/// tags.push_value("dark blue".to_string()).unwrap();
/// assert_eq!(tags.to_string(), "Tags:(red,\"dark blue\");");
/// assert_eq!(tags.values::<String>(), vec!["red", "dark blue"]);
/// ```
#[derive(Clone, Debug)]
pub struct ListProperty {
    pub(crate) key: String,
    pub(crate) item: Box<Property>,
    pub(crate) items: Vec<Property>,
    pub(crate) required: bool,
}

impl ListProperty {
    #[must_use]
    pub fn of_scalars(key: &str, kind: ScalarKind) -> Self {
        ListProperty {
            key: key.to_string(),
            item: Box::new(Property::scalar("", kind)),
            items: Vec::new(),
            required: false,
        }
    }

    #[must_use]
    pub fn of_collections(key: &str, item: CollectionProperty) -> Self {
        ListProperty {
            key: key.to_string(),
            item: Box::new(Property::Collection(item.copy())),
            items: Vec::new(),
            required: false,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the prototype every item is copied from.
    #[must_use]
    pub fn item_prototype(&self) -> &Property {
        &self.item
    }

    #[must_use]
    pub fn items(&self) -> &[Property] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the typed values of a scalar list, skipping items of another type.
    #[must_use]
    pub fn values<T: ScalarType>(&self) -> Vec<T> {
        self.items
            .iter()
            .filter_map(Property::as_scalar)
            .filter_map(ScalarProperty::get)
            .collect()
    }

    /// Iterates over the items of a composite list.
    pub fn collections(&self) -> impl Iterator<Item = &CollectionProperty> {
        self.items.iter().filter_map(Property::as_collection)
    }

    /// Appends a scalar item.
    ///
    /// # Errors
    ///
    /// - [`Error::SchemaViolation`] if this is not a scalar list, or if the
    ///   item would be empty (a list has no way to write an empty item)
    /// - [`Error::TypeConversion`] if `value` does not fit the item kind
    pub fn push_value<T: ScalarType>(&mut self, value: T) -> Result<()> {
        let Property::Scalar(prototype) = self.item.as_ref() else {
            return Err(Error::schema_violation(
                &self.key,
                &format!("not a list of scalars (items are {})", self.item.variant_name()),
            ));
        };
        let mut item = prototype.copy();
        item.set(value)?;
        if item.value().is_none() {
            return Err(Error::schema_violation(&self.key, "empty item"));
        }
        self.items.push(Property::Scalar(item));
        Ok(())
    }

    /// Appends a fresh composite item and returns it for filling in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaViolation`] if this is not a list of composites.
    pub fn push_collection(&mut self) -> Result<&mut CollectionProperty> {
        let Property::Collection(prototype) = self.item.as_ref() else {
            return Err(Error::schema_violation(
                &self.key,
                &format!("not a list of collections (items are {})", self.item.variant_name()),
            ));
        };
        self.items.push(Property::Collection(prototype.copy()));
        self.items
            .last_mut()
            .and_then(Property::as_collection_mut)
            .ok_or_else(|| Error::custom("pushed item vanished"))
    }

    /// Projects every composite item into a typed view, in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] produced by `T`.
    pub fn project<T: FromCollection>(&self) -> std::result::Result<Vec<T>, ValidationError> {
        self.collections().map(T::from_collection).collect()
    }

    #[must_use]
    pub fn copy(&self) -> Self {
        ListProperty {
            key: self.key.clone(),
            item: Box::new(self.item.copy()),
            items: Vec::new(),
            required: self.required,
        }
    }
}

impl PartialEq for ListProperty {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.items == other.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_schema() -> Schema {
        Schema::new([
            Property::typed::<i32>("X"),
            Property::typed::<i32>("Y"),
        ])
    }

    #[test]
    fn test_children_follow_schema_order() {
        let point = CollectionProperty::new("P", &point_schema());
        let keys: Vec<_> = point.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["X", "Y"]);
        assert_eq!(point.len(), 2);
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let schema = point_schema();
        let mut a = CollectionProperty::new("P", &schema);
        let b = CollectionProperty::new("P", &schema);
        a.set_value("X", 5).unwrap();
        assert_eq!(a.value::<i32>("X"), Some(5));
        assert_eq!(b.value::<i32>("X"), None);
        assert_eq!(schema.fields()[0].as_scalar().unwrap().value(), None);
    }

    #[test]
    fn test_set_value_unknown_child() {
        let mut point = CollectionProperty::new("P", &point_schema());
        assert!(matches!(
            point.set_value("Z", 1),
            Err(Error::SchemaViolation { .. })
        ));
    }

    #[test]
    fn test_collection_equality_ignores_order() {
        let mut a = CollectionProperty::new("P", &point_schema());
        a.set_value("X", 1).unwrap();
        a.set_value("Y", 2).unwrap();
        let mut b = CollectionProperty::new("P", &point_schema());
        b.set_value("Y", 2).unwrap();
        b.set_value("X", 1).unwrap();
        assert_eq!(a, b);

        b.set_value("Y", 3).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_list_push_checks_item_variant() {
        let mut scalars = ListProperty::of_scalars("L", ScalarKind::Int32);
        assert!(scalars.push_collection().is_err());
        scalars.push_value(1).unwrap();
        scalars.push_value(1).unwrap();
        assert_eq!(scalars.values::<i32>(), vec![1, 1]);

        let mut points = ListProperty::of_collections(
            "Points",
            CollectionProperty::new("P", &point_schema()),
        );
        assert!(points.push_value(1).is_err());
        points.push_collection().unwrap().set_value("X", 9).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points.collections().next().unwrap().key(), "P");
        assert!(points.item_prototype().as_collection().is_some());
    }

    #[test]
    fn test_list_push_rejects_empty_text() {
        let mut tags = ListProperty::of_scalars("Tags", ScalarKind::Text);
        tags.push_value("a".to_string()).unwrap();
        assert!(matches!(
            tags.push_value(String::new()),
            Err(Error::SchemaViolation { ref msg, .. }) if msg == "empty item"
        ));
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.to_string(), "Tags:(a);");

        let reparsed = crate::from_str(&Property::from(tags.copy()), &tags.to_string()).unwrap();
        assert_eq!(reparsed, Property::from(tags));
    }

    #[test]
    fn test_list_push_names_item_variant() {
        let mut scalars = ListProperty::of_scalars("L", ScalarKind::Int32);
        let Err(Error::SchemaViolation { msg, .. }) = scalars.push_collection() else {
            panic!("expected a schema violation");
        };
        assert!(msg.contains("scalar"), "{msg}");
    }

    #[test]
    fn test_list_equality_is_ordered() {
        let mut a = ListProperty::of_scalars("L", ScalarKind::Int32);
        let mut b = a.copy();
        a.push_value(1).unwrap();
        a.push_value(2).unwrap();
        b.push_value(2).unwrap();
        b.push_value(1).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.copy(), b.copy());
    }
}
