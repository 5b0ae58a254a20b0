//! Best-effort value assignment across differently-shaped destinations.
//!
//! The engine copies a source value into a destination slot, matching
//! record fields by name and converting between the numeric scalar types.
//! Per-field incompatibilities inside a record-to-record copy degrade to
//! "field skipped"; only structural mismatches (a non-aggregate source
//! feeding a record, a scalar feeding a list) are terminal. A terminal
//! error leaves the destination untouched.

use std::sync::Arc;

use crate::doc::Doc;
use crate::error::{AccessError, AccessResult};
use crate::record::Record;
use crate::shape::FieldType;
use crate::value::{List, Value};

/// Assigns `source` into `dest`, by destination kind.
///
/// - a record destination pulls same-named fields from a record or doc
///   source, converting numerics and skipping incompatible fields
/// - a doc destination receives entries in source declaration order
/// - a list destination is rebuilt to the source length, each element
///   converted recursively to the destination's element shape
/// - a scalar destination copies an identical type or converts a numeric
///
/// # Examples
///
/// ```
/// use shapecast::{assign_value, FieldType, Record, Shape, Value};
///
/// let src_shape = Shape::builder("Src")
///     .field("Name", FieldType::Str)
///     .field("Value", FieldType::Int)
///     .build()
///     .unwrap();
/// let dst_shape = Shape::builder("Dst")
///     .field("Name", FieldType::Str)
///     .field("Value", FieldType::Float)
///     .build()
///     .unwrap();
///
/// let mut src = Record::zeroed(src_shape);
/// src.set("Name", Value::from("x")).unwrap();
/// src.set("Value", Value::Int(100)).unwrap();
///
/// let mut dst = Value::Record(Record::zeroed(dst_shape));
/// assign_value(&Value::Record(src), &mut dst).unwrap();
/// let dst = dst.as_record().unwrap();
/// assert_eq!(dst.get("Value"), Some(&Value::Float(100.0)));
/// ```
///
/// # Errors
///
/// *not-an-aggregate* when a record or doc destination is fed from a
/// non-aggregate source; *shape-mismatch* when a list destination is fed
/// from a non-list source; *unassignable-type* for non-convertible scalar
/// pairs.
pub fn assign_value(source: &Value, dest: &mut Value) -> AccessResult<()> {
    match dest {
        Value::Record(record) => assign_record(source, record),
        Value::Doc(doc) => assign_doc(source, doc),
        Value::List(list) => assign_list(source, list),
        scalar => assign_scalar(source, scalar),
    }
}

fn assign_record(source: &Value, dest: &mut Record) -> AccessResult<()> {
    if !matches!(source, Value::Record(_) | Value::Doc(_)) {
        return Err(AccessError::NotAnAggregate {
            kind: source.type_name(),
        });
    }
    for index in 0..dest.shape().field_count() {
        let field = &dest.shape().fields()[index];
        let (name, ty) = (field.name().to_string(), field.field_type().clone());
        if let Some(src_val) = source_attr(source, &name) {
            if let Some(converted) = convert_compatible(src_val, &ty) {
                dest.set_at(index, converted)?;
            }
        }
    }
    Ok(())
}

fn source_attr<'v>(source: &'v Value, name: &str) -> Option<&'v Value> {
    match source {
        Value::Record(record) => record.get(name),
        Value::Doc(doc) => doc.get(name),
        _ => None,
    }
}

fn assign_doc(source: &Value, dest: &mut Doc) -> AccessResult<()> {
    match source {
        Value::Record(src) => {
            for (field, value) in src.iter() {
                dest.set(field.name(), value.clone());
            }
            Ok(())
        }
        Value::Doc(src) => {
            for (key, value) in src.iter() {
                dest.set(key, value.clone());
            }
            Ok(())
        }
        other => Err(AccessError::NotAnAggregate {
            kind: other.type_name(),
        }),
    }
}

fn assign_list(source: &Value, dest: &mut List) -> AccessResult<()> {
    let Value::List(src) = source else {
        return Err(AccessError::ShapeMismatch {
            location: "sequence destination".to_string(),
            expected: "list source".to_string(),
            found: source.type_name().to_string(),
        });
    };
    let elem = dest.elem_type().clone();
    let mut items = Vec::with_capacity(src.len());
    for item in src.items() {
        items.push(convert_to_element(item, &elem)?);
    }
    *dest = List::with_items(elem, items)?;
    Ok(())
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn assign_scalar(source: &Value, dest: &mut Value) -> AccessResult<()> {
    match (source, &*dest) {
        (src, dst) if src.type_name() == dst.type_name() => {
            *dest = src.clone();
            Ok(())
        }
        (Value::Int(v), Value::Float(_)) => {
            *dest = Value::Float(*v as f64);
            Ok(())
        }
        (Value::Float(v), Value::Int(_)) => {
            *dest = Value::Int(*v as i64);
            Ok(())
        }
        _ => Err(AccessError::UnassignableType {
            target: "destination".to_string(),
            expected: dest.type_name().to_string(),
            actual: source.type_name(),
        }),
    }
}

/// Converts one source item into a fresh element of a sequence's declared
/// shape: records and optional records are materialized from zero and
/// populated, docs are filled, scalars convert. A null item stays null for
/// an optional-record element.
pub(crate) fn convert_to_element(item: &Value, elem: &FieldType) -> AccessResult<Value> {
    if item.is_null() && matches!(elem, FieldType::OptionalRecord(_)) {
        return Ok(Value::Null);
    }
    let mut element = match elem {
        FieldType::OptionalRecord(shape) => Value::Record(Record::zeroed(Arc::clone(shape))),
        other => other.zero_value(),
    };
    assign_value(item, &mut element)?;
    Ok(element)
}

/// Lenient per-field conversion: identical types pass through, numeric
/// pairs convert, anything else is `None` (caller skips the field).
pub(crate) fn convert_compatible(src_val: &Value, ty: &FieldType) -> Option<Value> {
    if ty.accepts(src_val) {
        return Some(src_val.clone());
    }
    numeric_cast(src_val, ty)
}

/// Strict per-field conversion for attribute-set copies: same pairs as
/// [`convert_compatible`], but a mismatch is a terminal error.
pub(crate) fn convert_strict(
    src_val: &Value,
    ty: &FieldType,
    field_name: &str,
) -> AccessResult<Value> {
    convert_compatible(src_val, ty).ok_or_else(|| AccessError::UnassignableType {
        target: field_name.to_string(),
        expected: ty.to_string(),
        actual: src_val.type_name(),
    })
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn numeric_cast(value: &Value, ty: &FieldType) -> Option<Value> {
    match (value, ty) {
        (Value::Int(v), FieldType::Float) => Some(Value::Float(*v as f64)),
        (Value::Float(v), FieldType::Int) => Some(Value::Int(*v as i64)),
        _ => None,
    }
}
