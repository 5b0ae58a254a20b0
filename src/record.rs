//! Aggregate instances.
//!
//! A [`Record`] pairs a shared [`Shape`] descriptor with one value slot per
//! declared field, parallel to declaration order. Every public mutation
//! type-checks against the declared field type, so a record's slots always
//! satisfy its shape.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{AccessError, AccessResult};
use crate::shape::{FieldDef, Shape};
use crate::value::Value;

/// An aggregate instance: a shape plus one value per field.
///
/// # Examples
///
/// ```
/// use shapecast::{FieldType, Record, Shape, Value};
///
/// let shape = Shape::builder("Person")
///     .field("Name", FieldType::Str)
///     .build()
///     .unwrap();
/// let mut person = Record::zeroed(shape);
/// person.set("Name", Value::from("Arief D")).unwrap();
/// assert_eq!(person.get("Name"), Some(&Value::Str("Arief D".into())));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    shape: Arc<Shape>,
    slots: Vec<Value>,
}

impl Record {
    /// Creates a record with every slot at its declared zero value.
    #[must_use]
    pub fn zeroed(shape: Arc<Shape>) -> Self {
        let slots = shape
            .fields()
            .iter()
            .map(|f| f.field_type().zero_value())
            .collect();
        Self { shape, slots }
    }

    /// The record's shape descriptor.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The shared handle to the record's shape.
    #[must_use]
    pub fn shape_arc(&self) -> &Arc<Shape> {
        &self.shape
    }

    /// Borrows the value of a field by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.shape.field_index(name).map(|i| &self.slots[i])
    }

    /// Borrows the value at a declaration-order position.
    #[must_use]
    pub fn get_at(&self, index: usize) -> Option<&Value> {
        self.slots.get(index)
    }

    /// Stores `value` into the named field after checking it against the
    /// declared type.
    ///
    /// # Errors
    ///
    /// *unknown-attribute* when the name does not exist on the shape,
    /// *unassignable-type* when the value's runtime type does not match the
    /// slot's declared type exactly.
    pub fn set(&mut self, name: &str, value: Value) -> AccessResult<()> {
        let Some(index) = self.shape.field_index(name) else {
            return Err(AccessError::UnknownAttribute {
                shape: self.shape.name().to_string(),
                name: name.to_string(),
            });
        };
        self.set_at(index, value)
    }

    /// Stores `value` at a declaration-order position, type-checked.
    /// Callers must hold a valid index for this record's shape.
    pub(crate) fn set_at(&mut self, index: usize, value: Value) -> AccessResult<()> {
        let field = &self.shape.fields()[index];
        if !field.field_type().accepts(&value) {
            return Err(AccessError::UnassignableType {
                target: field.name().to_string(),
                expected: field.field_type().to_string(),
                actual: value.type_name(),
            });
        }
        self.slots[index] = value;
        Ok(())
    }

    /// Iterates fields and their current values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldDef, &Value)> {
        self.shape.fields().iter().zip(self.slots.iter())
    }

    /// Raw mutable slot access for the resolver and the engine.
    ///
    /// Callers must preserve the slot's declared type themselves.
    pub(crate) fn slot_mut_at(&mut self, index: usize) -> &mut Value {
        &mut self.slots[index]
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::FieldType;

    fn obj_shape() -> Arc<Shape> {
        Shape::builder("Obj")
            .field("ID", FieldType::Str)
            .field("Int", FieldType::Int)
            .field("Dec", FieldType::Float)
            .build()
            .unwrap()
    }

    #[test]
    fn test_zeroed_record() {
        let rec = Record::zeroed(obj_shape());
        assert_eq!(rec.get("ID"), Some(&Value::Str(String::new())));
        assert_eq!(rec.get("Int"), Some(&Value::Int(0)));
        assert_eq!(rec.get("Dec"), Some(&Value::Float(0.0)));
        assert_eq!(rec.get("Missing"), None);
    }

    #[test]
    fn test_set_type_checked() {
        let mut rec = Record::zeroed(obj_shape());
        rec.set("Int", Value::Int(10)).unwrap();
        assert_eq!(rec.get("Int"), Some(&Value::Int(10)));

        let err = rec.set("Int", Value::Float(1.5)).unwrap_err();
        assert!(err.is_unassignable_type());
        // Failed set leaves the slot untouched.
        assert_eq!(rec.get("Int"), Some(&Value::Int(10)));
    }

    #[test]
    fn test_set_unknown_attribute() {
        let mut rec = Record::zeroed(obj_shape());
        let err = rec.set("Nope", Value::Int(1)).unwrap_err();
        assert!(err.is_unknown_attribute());
    }

    #[test]
    fn test_nested_zero_record() {
        let inner = Shape::builder("Sub")
            .field("Random", FieldType::Str)
            .build()
            .unwrap();
        let outer = Shape::builder("Outer")
            .field("Sub", FieldType::Record(inner))
            .field("Opt", FieldType::OptionalRecord(obj_shape()))
            .build()
            .unwrap();
        let rec = Record::zeroed(outer);
        assert!(rec.get("Sub").unwrap().is_record());
        assert!(rec.get("Opt").unwrap().is_null());
    }

    #[test]
    fn test_iter_declaration_order() {
        let mut rec = Record::zeroed(obj_shape());
        rec.set("ID", Value::from("ID01")).unwrap();
        let names: Vec<&str> = rec.iter().map(|(f, _)| f.name()).collect();
        assert_eq!(names, vec!["ID", "Int", "Dec"]);
    }

    #[test]
    fn test_record_serializes_as_ordered_object() {
        let mut rec = Record::zeroed(obj_shape());
        rec.set("ID", Value::from("ID01")).unwrap();
        rec.set("Int", Value::Int(7)).unwrap();
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"ID":"ID01","Int":7,"Dec":0.0}"#);
    }
}
