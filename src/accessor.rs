//! Scoped accessor sessions.
//!
//! An [`Accessor`] binds to one root value for its lifetime, buffers named
//! writes against a detached working copy, and commits the whole copy back
//! through the root on [`flush`](Accessor::flush). The original is mutated
//! if and only if `flush` runs with no sticky error; a dropped session
//! leaves the original untouched.

use crate::assign::assign_value;
use crate::error::{AccessError, AccessResult};
use crate::path;
use crate::record::Record;
use crate::value::{FromValue, Value};

/// A builder-style write session over one root aggregate.
///
/// Failed `set` calls are swallowed by design: a write to an unresolvable
/// field or with a non-assignable value does not stop the chain and does
/// not error on its own. Only session-creation failures (a non-record
/// root) stick, and those surface from `flush`, `get`, `get_to`, and
/// `field_names`.
///
/// # Examples
///
/// ```
/// use shapecast::{Accessor, FieldType, Record, Shape, Value};
///
/// let shape = Shape::builder("Obj")
///     .field("ID", FieldType::Str)
///     .field("Int", FieldType::Int)
///     .build()
///     .unwrap();
/// let mut root = Value::Record(Record::zeroed(shape));
///
/// Accessor::from_root(&mut root)
///     .set("ID", "Obj1")
///     .set("Int", 10i64)
///     .flush()
///     .unwrap();
///
/// let rec = root.as_record().unwrap();
/// assert_eq!(rec.get("Int"), Some(&Value::Int(10)));
/// ```
#[derive(Debug)]
pub struct Accessor<'a> {
    root: &'a mut Value,
    state: State,
}

#[derive(Debug)]
enum State {
    /// Detached working copy; all writes land here until flush.
    Ready(Record),
    /// Sticky error from session creation; every later call no-ops or
    /// reports it.
    Failed(AccessError),
}

impl<'a> Accessor<'a> {
    /// Opens a session over `root`.
    ///
    /// A root that does not hold a record produces a failed session: the
    /// `set` chain stays callable but inert, and the error comes back from
    /// `flush`.
    #[must_use]
    pub fn from_root(root: &'a mut Value) -> Self {
        let state = match &*root {
            Value::Record(record) => State::Ready(record.clone()),
            other => State::Failed(AccessError::NotAnAggregate {
                kind: other.type_name(),
            }),
        };
        Self { root, state }
    }

    /// Buffers a write of `value` into the attribute named by `name`
    /// (dotted paths supported) on the working copy.
    ///
    /// The value is stored only when its runtime type matches the slot's
    /// declared type exactly; there is no numeric coercion at this layer.
    /// Failures are silent; see the type-level docs.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        if let State::Ready(work) = &mut self.state {
            let value = value.into();
            if let Ok(slot) = path::resolve_mut(work, name) {
                if slot.ty.accepts(&value) {
                    *slot.value = value;
                }
            }
        }
        self
    }

    /// Reads the attribute named by `name` (dotted paths supported) from
    /// the session's current view, verbatim.
    ///
    /// # Errors
    ///
    /// The sticky error for a failed session; *unknown-attribute* or
    /// *shape-mismatch* for an unresolvable path.
    pub fn get(&self, name: &str) -> AccessResult<Value> {
        match &self.state {
            State::Failed(err) => Err(err.clone()),
            State::Ready(work) => path::resolve(work, name).cloned(),
        }
    }

    /// Like [`get`](Self::get), but writes the value through `dest` only
    /// when the attribute's runtime type matches `T` exactly. On any error
    /// `dest` is left unmodified.
    ///
    /// # Errors
    ///
    /// Resolution errors as for `get`; *unassignable-type* when the
    /// attribute's type does not match `T`.
    pub fn get_to<T: FromValue>(&self, name: &str, dest: &mut T) -> AccessResult<()> {
        match &self.state {
            State::Failed(err) => Err(err.clone()),
            State::Ready(work) => {
                let value = path::resolve(work, name)?;
                match T::from_value(value) {
                    Some(extracted) => {
                        *dest = extracted;
                        Ok(())
                    }
                    None => Err(AccessError::UnassignableType {
                        target: name.to_string(),
                        expected: std::any::type_name::<T>().to_string(),
                        actual: value.type_name(),
                    }),
                }
            }
        }
    }

    /// Top-level attribute names of the root shape in declaration order,
    /// aliased under `tag_key` (empty key = raw names).
    ///
    /// # Errors
    ///
    /// The sticky error for a failed session.
    pub fn field_names(&self, tag_key: &str) -> AccessResult<Vec<String>> {
        match &self.state {
            State::Failed(err) => Err(err.clone()),
            State::Ready(work) => Ok(work.shape().field_names(tag_key)),
        }
    }

    /// Commits the working copy into the original root and ends the
    /// session.
    ///
    /// The commit re-enters the assignment engine's record path, so the
    /// original is replaced field-by-field in a single pass.
    ///
    /// # Errors
    ///
    /// The sticky error when session creation failed; the original is left
    /// untouched in that case.
    pub fn flush(self) -> AccessResult<()> {
        match self.state {
            State::Failed(err) => Err(err),
            State::Ready(work) => assign_value(&Value::Record(work), self.root),
        }
    }
}
