//! Sequence item upsert by index.

use crate::assign::convert_to_element;
use crate::error::{AccessError, AccessResult};
use crate::value::Value;

/// Writes `item` into the sequence held by `dest` at `index`.
///
/// An index inside the current bounds replaces that element; an index equal
/// to the length appends a new element. Either way the item is first
/// converted to the sequence's declared element shape (record,
/// optional-record, or doc) through the assignment engine.
///
/// # Examples
///
/// ```
/// use shapecast::{assign_slice_item, FieldType, List, Value};
///
/// let mut dest = Value::List(List::new(FieldType::Int));
/// assign_slice_item(&Value::Int(10), 0, &mut dest).unwrap();
/// assign_slice_item(&Value::Int(99), 0, &mut dest).unwrap(); // overwrite
/// assert_eq!(dest.as_list().unwrap().items(), &[Value::Int(99)]);
/// ```
///
/// # Errors
///
/// *shape-mismatch* when `dest` does not hold a list,
/// *index-out-of-range* when `index` exceeds the current length, and any
/// terminal conversion error from the engine.
pub fn assign_slice_item(item: &Value, index: usize, dest: &mut Value) -> AccessResult<()> {
    let Value::List(list) = dest else {
        return Err(AccessError::ShapeMismatch {
            location: "sequence destination".to_string(),
            expected: "list".to_string(),
            found: dest.type_name().to_string(),
        });
    };
    let len = list.len();
    if index > len {
        return Err(AccessError::IndexOutOfRange { index, len });
    }
    let element = convert_to_element(item, &list.elem_type().clone())?;
    if index == len {
        list.push(element)
    } else {
        list.replace(index, element)
    }
}
