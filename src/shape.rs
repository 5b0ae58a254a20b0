//! Shape descriptors for aggregate types.
//!
//! Rust has no runtime reflection, so every aggregate the crate operates on
//! is described by an explicit [`Shape`]: an ordered list of named, typed
//! fields. Shapes are built once through [`ShapeBuilder`], shared via
//! `Arc`, and never mutated afterwards. Declaration order is the order
//! fields were added and is stable for the lifetime of the shape.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::doc::Doc;
use crate::error::{AccessError, AccessResult};
use crate::record::Record;
use crate::value::{List, Value};

/// Declared type of one attribute slot.
///
/// Aggregate-valued slots come in two flavors: [`FieldType::Record`] holds
/// the sub-aggregate by value, while [`FieldType::OptionalRecord`] is a
/// nullable indirection (the slot holds [`Value::Null`] until allocated).
///
/// # Examples
///
/// ```
/// use shapecast::{FieldType, Value};
///
/// assert_eq!(FieldType::Int.zero_value(), Value::Int(0));
/// assert!(FieldType::Str.accepts(&Value::Str("x".into())));
/// assert!(!FieldType::Str.accepts(&Value::Int(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Boolean scalar.
    Bool,
    /// 64-bit signed integer scalar.
    Int,
    /// 64-bit float scalar.
    Float,
    /// UTF-8 string scalar.
    Str,
    /// UTC timestamp scalar.
    Time,
    /// Sub-aggregate held by value.
    Record(Arc<Shape>),
    /// Nullable indirection to a sub-aggregate.
    OptionalRecord(Arc<Shape>),
    /// Generic insertion-ordered map destination.
    Doc,
    /// Typed sequence of elements.
    List(Box<FieldType>),
}

impl FieldType {
    /// Produces the zero value for this declared type.
    ///
    /// Optional records start out null; value records start out as a fully
    /// zeroed instance of their shape.
    #[must_use]
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::Str => Value::Str(String::new()),
            Self::Time => Value::Time(chrono::DateTime::UNIX_EPOCH),
            Self::Record(shape) => Value::Record(Record::zeroed(Arc::clone(shape))),
            Self::OptionalRecord(_) => Value::Null,
            Self::Doc => Value::Doc(Doc::new()),
            Self::List(elem) => Value::List(List::new((**elem).clone())),
        }
    }

    /// Returns true when `value` is directly storable into a slot of this
    /// type, with no coercion.
    ///
    /// Records must match shape structurally; `Null` is accepted only by
    /// optional-record slots; lists must carry the same element type.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Bool, Value::Bool(_))
            | (Self::Int, Value::Int(_))
            | (Self::Float, Value::Float(_))
            | (Self::Str, Value::Str(_))
            | (Self::Time, Value::Time(_))
            | (Self::Doc, Value::Doc(_))
            | (Self::OptionalRecord(_), Value::Null) => true,
            (Self::Record(shape) | Self::OptionalRecord(shape), Value::Record(record)) => {
                **shape == *record.shape()
            }
            (Self::List(elem), Value::List(list)) => **elem == *list.elem_type(),
            _ => false,
        }
    }

    /// Returns true for the numeric scalar types (`Int`, `Float`).
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    /// Returns the shape behind a record or optional-record type.
    #[must_use]
    pub fn record_shape(&self) -> Option<&Arc<Shape>> {
        match self {
            Self::Record(shape) | Self::OptionalRecord(shape) => Some(shape),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Str => write!(f, "string"),
            Self::Time => write!(f, "time"),
            Self::Record(shape) => write!(f, "record({})", shape.name()),
            Self::OptionalRecord(shape) => write!(f, "record?({})", shape.name()),
            Self::Doc => write!(f, "doc"),
            Self::List(elem) => write!(f, "list({elem})"),
        }
    }
}

/// One named, typed field of a shape, with optional tag aliases.
///
/// Tag aliases override the field's public name under a named tag key, in
/// the manner of struct tags (`ID` aliased to `_id` under the `name` key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    name: String,
    ty: FieldType,
    tags: BTreeMap<String, String>,
}

impl FieldDef {
    /// Creates a field definition with no tag aliases.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            tags: BTreeMap::new(),
        }
    }

    /// Adds a tag alias under `key`.
    #[must_use]
    pub fn tag(mut self, key: impl Into<String>, alias: impl Into<String>) -> Self {
        self.tags.insert(key.into(), alias.into());
        self
    }

    /// The field's declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field's declared type.
    #[must_use]
    pub fn field_type(&self) -> &FieldType {
        &self.ty
    }

    /// The field's public name under `tag_key`: the alias when one is
    /// present and non-empty, the declared name otherwise.
    #[must_use]
    pub fn public_name(&self, tag_key: &str) -> &str {
        if tag_key.is_empty() {
            return &self.name;
        }
        match self.tags.get(tag_key) {
            Some(alias) if !alias.is_empty() => alias,
            _ => &self.name,
        }
    }
}

/// Immutable descriptor of an aggregate type.
///
/// Two shapes are the same aggregate type when they compare equal
/// structurally (same name, same fields in the same order).
///
/// # Examples
///
/// ```
/// use shapecast::{FieldType, Shape};
///
/// let person = Shape::builder("Person")
///     .field("Name", FieldType::Str)
///     .field("Salutation", FieldType::Str)
///     .build()
///     .unwrap();
/// assert_eq!(person.field_count(), 2);
/// assert!(person.field("Name").is_some());
/// assert!(person.field("name").is_none()); // case-sensitive
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    name: String,
    fields: Vec<FieldDef>,
}

impl Shape {
    /// Starts building a shape with the given type name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ShapeBuilder {
        ShapeBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// The shape's type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Number of declared fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Looks up a field by exact, case-sensitive name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Declaration-order position of a field, by exact name.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Public field names in declaration order, aliased under `tag_key`.
    ///
    /// An empty `tag_key` yields the raw declared names.
    #[must_use]
    pub fn field_names(&self, tag_key: &str) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| f.public_name(tag_key).to_string())
            .collect()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Builder for [`Shape`] descriptors.
///
/// # Examples
///
/// ```
/// use shapecast::{FieldDef, FieldType, Shape};
///
/// let shape = Shape::builder("Obj")
///     .field_def(FieldDef::new("ID", FieldType::Str).tag("name", "_id"))
///     .field("Int", FieldType::Int)
///     .build()
///     .unwrap();
/// assert_eq!(shape.field_names("name"), vec!["_id", "Int"]);
/// ```
#[derive(Debug, Clone)]
pub struct ShapeBuilder {
    name: String,
    fields: Vec<FieldDef>,
}

impl ShapeBuilder {
    /// Appends a field with no tag aliases.
    #[must_use]
    pub fn field(self, name: impl Into<String>, ty: FieldType) -> Self {
        self.field_def(FieldDef::new(name, ty))
    }

    /// Appends a fully specified field definition.
    #[must_use]
    pub fn field_def(mut self, def: FieldDef) -> Self {
        self.fields.push(def);
        self
    }

    /// Validates and finalizes the shape.
    ///
    /// Rejects an empty shape name, empty field names, and duplicate field
    /// names.
    pub fn build(self) -> AccessResult<Arc<Shape>> {
        if self.name.trim().is_empty() {
            return Err(AccessError::InvalidShape {
                shape: self.name,
                reason: "shape name cannot be empty".to_string(),
            });
        }
        for (i, def) in self.fields.iter().enumerate() {
            if def.name.is_empty() {
                return Err(AccessError::InvalidShape {
                    shape: self.name.clone(),
                    reason: format!("field {i} has an empty name"),
                });
            }
            if self.fields[..i].iter().any(|prev| prev.name == def.name) {
                return Err(AccessError::InvalidShape {
                    shape: self.name.clone(),
                    reason: format!("duplicate field name '{}'", def.name),
                });
            }
        }
        Ok(Arc::new(Shape {
            name: self.name,
            fields: self.fields,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> Arc<Shape> {
        Shape::builder("Person")
            .field("Name", FieldType::Str)
            .field("Salutation", FieldType::Str)
            .build()
            .unwrap()
    }

    #[test]
    fn test_field_lookup_is_case_sensitive() {
        let shape = person();
        assert!(shape.field("Name").is_some());
        assert!(shape.field("name").is_none());
        assert_eq!(shape.field_index("Salutation"), Some(1));
        assert_eq!(shape.field_index("salutation"), None);
    }

    #[test]
    fn test_declaration_order_is_stable() {
        let shape = Shape::builder("Obj")
            .field("ID", FieldType::Str)
            .field("Name", FieldType::Str)
            .field("Int", FieldType::Int)
            .field("Dec", FieldType::Float)
            .field("Date", FieldType::Time)
            .build()
            .unwrap();
        assert_eq!(
            shape.field_names(""),
            vec!["ID", "Name", "Int", "Dec", "Date"]
        );
    }

    #[test]
    fn test_tag_aliasing() {
        let shape = Shape::builder("Obj")
            .field_def(FieldDef::new("ID", FieldType::Str).tag("name", "_id"))
            .field("Name", FieldType::Str)
            .field_def(FieldDef::new("Dec", FieldType::Float).tag("name", "decimal"))
            .build()
            .unwrap();
        assert_eq!(shape.field_names(""), vec!["ID", "Name", "Dec"]);
        assert_eq!(shape.field_names("name"), vec!["_id", "Name", "decimal"]);
        // Unknown tag key falls back to raw names.
        assert_eq!(shape.field_names("json"), vec!["ID", "Name", "Dec"]);
    }

    #[test]
    fn test_empty_alias_falls_back_to_raw_name() {
        let def = FieldDef::new("ID", FieldType::Str).tag("name", "");
        assert_eq!(def.public_name("name"), "ID");
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let err = Shape::builder("Obj")
            .field("ID", FieldType::Str)
            .field("ID", FieldType::Int)
            .build()
            .unwrap_err();
        assert!(err.is_invalid_shape());
    }

    #[test]
    fn test_builder_rejects_empty_names() {
        assert!(Shape::builder("").field("A", FieldType::Int).build().is_err());
        assert!(Shape::builder("Obj").field("", FieldType::Int).build().is_err());
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(FieldType::Bool.zero_value(), Value::Bool(false));
        assert_eq!(FieldType::Int.zero_value(), Value::Int(0));
        assert_eq!(FieldType::Float.zero_value(), Value::Float(0.0));
        assert_eq!(FieldType::Str.zero_value(), Value::Str(String::new()));
        assert_eq!(
            FieldType::OptionalRecord(person()).zero_value(),
            Value::Null
        );

        let zero_rec = FieldType::Record(person()).zero_value();
        let Value::Record(rec) = zero_rec else {
            panic!("expected record zero value");
        };
        assert_eq!(rec.get("Name"), Some(&Value::Str(String::new())));
    }

    #[test]
    fn test_accepts_exact_types_only() {
        assert!(FieldType::Int.accepts(&Value::Int(1)));
        assert!(!FieldType::Int.accepts(&Value::Float(1.0)));
        assert!(!FieldType::Float.accepts(&Value::Int(1)));
        assert!(FieldType::Doc.accepts(&Value::Doc(Doc::new())));
        assert!(!FieldType::Str.accepts(&Value::Null));
    }

    #[test]
    fn test_accepts_records_by_structural_shape() {
        let a = person();
        let b = person(); // distinct Arc, same structure
        let rec = Record::zeroed(b);
        assert!(FieldType::Record(Arc::clone(&a)).accepts(&Value::Record(rec.clone())));
        assert!(FieldType::OptionalRecord(Arc::clone(&a)).accepts(&Value::Record(rec)));
        assert!(FieldType::OptionalRecord(a).accepts(&Value::Null));

        let other = Shape::builder("Other")
            .field("X", FieldType::Int)
            .build()
            .unwrap();
        let other_rec = Record::zeroed(other);
        assert!(!FieldType::Record(person()).accepts(&Value::Record(other_rec)));
    }

    #[test]
    fn test_accepts_lists_by_element_type() {
        let ints = FieldType::List(Box::new(FieldType::Int));
        assert!(ints.accepts(&Value::List(List::new(FieldType::Int))));
        assert!(!ints.accepts(&Value::List(List::new(FieldType::Str))));
    }

    #[test]
    fn test_field_type_display() {
        assert_eq!(format!("{}", FieldType::Float), "float");
        assert_eq!(format!("{}", FieldType::Record(person())), "record(Person)");
        assert_eq!(
            format!("{}", FieldType::List(Box::new(FieldType::Int))),
            "list(int)"
        );
        assert_eq!(
            format!("{}", FieldType::OptionalRecord(person())),
            "record?(Person)"
        );
    }
}
