//! Runtime values that attribute slots can hold.
//!
//! [`Value`] mirrors the declared [`FieldType`](crate::FieldType) set:
//! scalars, timestamps, records, generic docs, and typed lists. A `Null`
//! value is only ever legal inside an optional-record slot.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::doc::Doc;
use crate::error::{AccessError, AccessResult};
use crate::record::Record;
use crate::shape::FieldType;

/// Possible runtime values of an attribute slot.
///
/// # Examples
///
/// ```
/// use shapecast::Value;
///
/// let int_val = Value::Int(42);
/// let str_val = Value::from("hello");
///
/// assert!(int_val.is_int());
/// assert_eq!(int_val.as_float(), Some(42.0));
/// assert_eq!(str_val.type_name(), "string");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent optional record.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// 64-bit signed integer scalar.
    Int(i64),
    /// 64-bit float scalar.
    Float(f64),
    /// UTF-8 string scalar.
    Str(String),
    /// UTC timestamp.
    Time(DateTime<Utc>),
    /// Aggregate instance.
    Record(Record),
    /// Generic insertion-ordered map.
    Doc(Doc),
    /// Typed sequence.
    List(List),
}

impl Value {
    /// Returns true if this is `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if this is a boolean.
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Returns true if this is an integer.
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Returns true if this is a float.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Returns true if this is a string.
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// Returns true if this is a timestamp.
    #[must_use]
    pub const fn is_time(&self) -> bool {
        matches!(self, Self::Time(_))
    }

    /// Returns true if this is a record.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Returns true if this is a doc.
    #[must_use]
    pub const fn is_doc(&self) -> bool {
        matches!(self, Self::Doc(_))
    }

    /// Returns true if this is a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Extracts a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Extracts an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Extracts a float; integers widen.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Extracts a string slice.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Extracts a timestamp.
    #[must_use]
    pub const fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Time(v) => Some(*v),
            _ => None,
        }
    }

    /// Borrows the contained record.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    /// Mutably borrows the contained record.
    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    /// Borrows the contained doc.
    #[must_use]
    pub const fn as_doc(&self) -> Option<&Doc> {
        match self {
            Self::Doc(v) => Some(v),
            _ => None,
        }
    }

    /// Borrows the contained list.
    #[must_use]
    pub const fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Returns a human-readable type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Time(_) => "time",
            Self::Record(_) => "record",
            Self::Doc(_) => "doc",
            Self::List(_) => "list",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
            Self::Time(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Record(v) => write!(f, "record({})", v.shape().name()),
            Self::Doc(v) => write!(f, "doc[{}]", v.len()),
            Self::List(v) => write!(f, "list[{}]", v.len()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Str(v) => serializer.serialize_str(v),
            Self::Time(v) => v.serialize(serializer),
            Self::Record(v) => v.serialize(serializer),
            Self::Doc(v) => v.serialize(serializer),
            Self::List(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for item in v.items() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

// Convenient From implementations
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Time(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Self::Record(v)
    }
}

impl From<Doc> for Value {
    fn from(v: Doc) -> Self {
        Self::Doc(v)
    }
}

impl From<List> for Value {
    fn from(v: List) -> Self {
        Self::List(v)
    }
}

/// A typed sequence of values.
///
/// A list carries its element type so that an empty sequence still knows
/// what shape a new element must take (append-at-end upsert constructs a
/// zero element before populating it).
///
/// # Examples
///
/// ```
/// use shapecast::{FieldType, List, Value};
///
/// let mut list = List::new(FieldType::Int);
/// list.push(Value::Int(10)).unwrap();
/// assert!(list.push(Value::Str("no".into())).is_err());
/// assert_eq!(list.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    elem: FieldType,
    items: Vec<Value>,
}

impl List {
    /// Creates an empty list with the given element type.
    #[must_use]
    pub const fn new(elem: FieldType) -> Self {
        Self {
            elem,
            items: Vec::new(),
        }
    }

    /// Creates a list from existing items, validating each against the
    /// element type.
    pub fn with_items(elem: FieldType, items: Vec<Value>) -> AccessResult<Self> {
        for item in &items {
            if !elem.accepts(item) {
                return Err(AccessError::UnassignableType {
                    target: format!("list({elem}) element"),
                    expected: elem.to_string(),
                    actual: item.type_name(),
                });
            }
        }
        Ok(Self { elem, items })
    }

    /// The declared element type.
    #[must_use]
    pub const fn elem_type(&self) -> &FieldType {
        &self.elem
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrows the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// All items in order.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Appends an item, validating it against the element type.
    pub fn push(&mut self, item: Value) -> AccessResult<()> {
        if !self.elem.accepts(&item) {
            return Err(AccessError::UnassignableType {
                target: format!("list({}) element", self.elem),
                expected: self.elem.to_string(),
                actual: item.type_name(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Replaces the item at `index`, validating type and bounds.
    pub fn replace(&mut self, index: usize, item: Value) -> AccessResult<()> {
        if index >= self.items.len() {
            return Err(AccessError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        if !self.elem.accepts(&item) {
            return Err(AccessError::UnassignableType {
                target: format!("list({}) element", self.elem),
                expected: self.elem.to_string(),
                actual: item.type_name(),
            });
        }
        self.items[index] = item;
        Ok(())
    }

    /// Drops all items, keeping the element type.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Typed extraction from a [`Value`], used by
/// [`Accessor::get_to`](crate::Accessor::get_to).
///
/// Implementations match the runtime type exactly: no numeric widening, no
/// coercion. A mismatch yields `None` and the destination is left alone.
pub trait FromValue: Sized {
    /// Extracts a value of this type on an exact runtime-type match.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_int()
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(ToString::to_string)
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_time()
    }
}

impl FromValue for Record {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_record().cloned()
    }
}

impl FromValue for Doc {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_doc().cloned()
    }
}

impl FromValue for List {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_list().cloned()
    }
}
