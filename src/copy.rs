//! Attribute-set copies between records, and record construction.

use std::sync::Arc;

use crate::assign::convert_strict;
use crate::error::{AccessError, AccessResult};
use crate::record::Record;
use crate::value::Value;

/// Copies every attribute from `source` into the same-named attribute of
/// `dest`, except the names in `excluded`.
///
/// Fields that exist only on one side are skipped. Fields present on both
/// sides copy strictly: identical types pass through, numeric pairs
/// convert, and any other pairing is a terminal *unassignable-type* error.
///
/// # Examples
///
/// ```
/// use shapecast::{copy_attributes, FieldType, Record, Shape, Value};
///
/// let shape = Shape::builder("Obj")
///     .field("ID", FieldType::Str)
///     .field("Name", FieldType::Str)
///     .build()
///     .unwrap();
/// let mut src = Record::zeroed(shape.clone());
/// src.set("ID", Value::from("ID01")).unwrap();
/// src.set("Name", Value::from("Test Saja")).unwrap();
///
/// let mut dst = Value::Record(Record::zeroed(shape));
/// copy_attributes(&Value::Record(src), &mut dst, &["ID"]).unwrap();
/// let dst = dst.as_record().unwrap();
/// assert_eq!(dst.get("ID"), Some(&Value::Str(String::new())));
/// assert_eq!(dst.get("Name"), Some(&Value::Str("Test Saja".into())));
/// ```
///
/// # Errors
///
/// *not-an-aggregate* when either side does not hold a record; the first
/// terminal per-field error otherwise.
pub fn copy_attributes(source: &Value, dest: &mut Value, excluded: &[&str]) -> AccessResult<()> {
    let (src, dst) = both_records(source, dest)?;
    for index in 0..src.shape().field_count() {
        let field = &src.shape().fields()[index];
        if excluded.contains(&field.name()) {
            continue;
        }
        copy_field(src, dst, field.name())?;
    }
    Ok(())
}

/// The inverse of [`copy_attributes`]: copies only the attributes named in
/// `included`. Names missing on either side are skipped silently.
pub fn copy_attributes_by_name(
    source: &Value,
    dest: &mut Value,
    included: &[&str],
) -> AccessResult<()> {
    let (src, dst) = both_records(source, dest)?;
    for name in included {
        if src.shape().field_index(name).is_none() {
            continue;
        }
        copy_field(src, dst, name)?;
    }
    Ok(())
}

/// Builds a fresh record of the same shape as `source`.
///
/// With `copy_value`, every top-level attribute value is duplicated into
/// the new instance; without it, the instance stays at its zero values.
///
/// # Errors
///
/// *not-an-aggregate* when `source` does not hold a record.
pub fn create_from(source: &Value, copy_value: bool) -> AccessResult<Value> {
    let Value::Record(src) = source else {
        return Err(AccessError::NotAnAggregate {
            kind: source.type_name(),
        });
    };
    let mut out = Record::zeroed(Arc::clone(src.shape_arc()));
    if copy_value {
        for (index, (_, value)) in src.iter().enumerate() {
            out.set_at(index, value.clone())?;
        }
    }
    Ok(Value::Record(out))
}

fn both_records<'a, 'b>(
    source: &'a Value,
    dest: &'b mut Value,
) -> AccessResult<(&'a Record, &'b mut Record)> {
    let Value::Record(src) = source else {
        return Err(AccessError::NotAnAggregate {
            kind: source.type_name(),
        });
    };
    let dest_kind = dest.type_name();
    let Value::Record(dst) = dest else {
        return Err(AccessError::NotAnAggregate { kind: dest_kind });
    };
    Ok((src, dst))
}

fn copy_field(src: &Record, dst: &mut Record, name: &str) -> AccessResult<()> {
    let Some(dst_index) = dst.shape().field_index(name) else {
        return Ok(());
    };
    let Some(src_val) = src.get(name) else {
        return Ok(());
    };
    let ty = dst.shape().fields()[dst_index].field_type().clone();
    let converted = convert_strict(src_val, &ty, name)?;
    dst.set_at(dst_index, converted)
}
