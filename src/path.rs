//! Dotted attribute path resolution.
//!
//! Turns a name like `"Person.Salutation"` into a concrete, addressable
//! slot inside a root record. Mutable resolution allocates missing
//! intermediate optional records on the way down, so callers can write into
//! previously-null nested aggregates without pre-initializing them.

use std::sync::Arc;

use crate::error::{AccessError, AccessResult};
use crate::record::Record;
use crate::shape::FieldType;
use crate::value::Value;

/// A resolved, addressable attribute slot.
#[derive(Debug)]
pub(crate) struct SlotMut<'a> {
    /// The slot's declared type.
    pub ty: FieldType,
    /// The slot's current value, writable in place.
    pub value: &'a mut Value,
}

/// Resolves `path` against `root` for writing.
///
/// Intermediate segments must name record or optional-record fields; a null
/// optional record is allocated as a zeroed instance of its shape and
/// traversal continues through it.
pub(crate) fn resolve_mut<'a>(root: &'a mut Record, path: &str) -> AccessResult<SlotMut<'a>> {
    let (head, leaf) = match path.rsplit_once('.') {
        Some((head, leaf)) => (Some(head), leaf),
        None => (None, path),
    };

    let mut current = root;
    if let Some(head) = head {
        for segment in head.split('.') {
            current = descend_mut(current, segment, path)?;
        }
    }

    let Some(index) = current.shape().field_index(leaf) else {
        return Err(AccessError::UnknownAttribute {
            shape: current.shape().name().to_string(),
            name: leaf.to_string(),
        });
    };
    let ty = current.shape().fields()[index].field_type().clone();
    Ok(SlotMut {
        ty,
        value: current.slot_mut_at(index),
    })
}

/// Resolves `path` against `root` for reading. No allocation occurs; a null
/// intermediate is a shape-mismatch error.
pub(crate) fn resolve<'a>(root: &'a Record, path: &str) -> AccessResult<&'a Value> {
    let (head, leaf) = match path.rsplit_once('.') {
        Some((head, leaf)) => (Some(head), leaf),
        None => (None, path),
    };

    let mut current = root;
    if let Some(head) = head {
        for segment in head.split('.') {
            current = descend(current, segment, path)?;
        }
    }

    match current.get(leaf) {
        Some(value) => Ok(value),
        None => Err(AccessError::UnknownAttribute {
            shape: current.shape().name().to_string(),
            name: leaf.to_string(),
        }),
    }
}

fn descend_mut<'a>(
    current: &'a mut Record,
    segment: &str,
    path: &str,
) -> AccessResult<&'a mut Record> {
    let Some(index) = current.shape().field_index(segment) else {
        return Err(AccessError::UnknownAttribute {
            shape: current.shape().name().to_string(),
            name: segment.to_string(),
        });
    };
    let ty = current.shape().fields()[index].field_type().clone();
    match ty {
        FieldType::Record(_) | FieldType::OptionalRecord(_) => {
            let slot = current.slot_mut_at(index);
            if slot.is_null() {
                if let Some(shape) = ty.record_shape() {
                    *slot = Value::Record(Record::zeroed(Arc::clone(shape)));
                }
            }
            match slot {
                Value::Record(next) => Ok(next),
                other => Err(shape_mismatch(path, segment, other.type_name())),
            }
        }
        other => Err(shape_mismatch(path, segment, &other.to_string())),
    }
}

fn descend<'a>(current: &'a Record, segment: &str, path: &str) -> AccessResult<&'a Record> {
    let Some(value) = current.get(segment) else {
        return Err(AccessError::UnknownAttribute {
            shape: current.shape().name().to_string(),
            name: segment.to_string(),
        });
    };
    match value {
        Value::Record(next) => Ok(next),
        other => Err(shape_mismatch(path, segment, other.type_name())),
    }
}

fn shape_mismatch(path: &str, segment: &str, found: &str) -> AccessError {
    AccessError::ShapeMismatch {
        location: path.to_string(),
        expected: format!("aggregate at segment '{segment}'"),
        found: found.to_string(),
    }
}
