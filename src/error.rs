//! Error types for shapecast.
//!
//! All errors are strongly typed using thiserror. This enables pattern
//! matching on specific failure conditions and keeps messages uniform
//! across the resolver, the accessor, and the assignment engine.

use thiserror::Error;

/// Failure conditions surfaced by attribute access and conversion.
///
/// Per-field incompatibilities inside a whole-record assignment are not
/// errors at all; they degrade to "field skipped". Only the structural
/// conditions below are reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The root (or source) value is not a record.
    #[error("value of type {kind} is not an aggregate record")]
    NotAnAggregate {
        /// Runtime type name of the offending value.
        kind: &'static str,
    },

    /// An attribute name did not resolve on the shape it was looked up against.
    #[error("unknown attribute '{name}' on shape '{shape}'")]
    UnknownAttribute {
        /// Name of the shape the lookup ran against.
        shape: String,
        /// The attribute name that failed to resolve.
        name: String,
    },

    /// A path segment or assignment pairing is structurally incompatible.
    #[error("shape mismatch at {location}: expected {expected}, found {found}")]
    ShapeMismatch {
        /// The dotted path or operation where the mismatch occurred.
        location: String,
        /// What the structure required at that position.
        expected: String,
        /// What was actually found.
        found: String,
    },

    /// A value's runtime type cannot be stored into a slot without coercion.
    #[error("value of type {actual} is not assignable to '{target}' (declared {expected})")]
    UnassignableType {
        /// The slot or destination being written.
        target: String,
        /// The slot's declared type.
        expected: String,
        /// The value's runtime type.
        actual: &'static str,
    },

    /// A sequence upsert index points past the end of the sequence.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The sequence length at the time of the call.
        len: usize,
    },

    /// A shape descriptor failed validation at build time.
    #[error("invalid shape '{shape}': {reason}")]
    InvalidShape {
        /// Name of the shape being built.
        shape: String,
        /// Why the descriptor was rejected.
        reason: String,
    },
}

impl AccessError {
    /// Returns true if this is a not-an-aggregate error.
    #[must_use]
    pub const fn is_not_an_aggregate(&self) -> bool {
        matches!(self, Self::NotAnAggregate { .. })
    }

    /// Returns true if this is an unknown-attribute error.
    #[must_use]
    pub const fn is_unknown_attribute(&self) -> bool {
        matches!(self, Self::UnknownAttribute { .. })
    }

    /// Returns true if this is a shape-mismatch error.
    #[must_use]
    pub const fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }

    /// Returns true if this is an unassignable-type error.
    #[must_use]
    pub const fn is_unassignable_type(&self) -> bool {
        matches!(self, Self::UnassignableType { .. })
    }

    /// Returns true if this is an index-out-of-range error.
    #[must_use]
    pub const fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    /// Returns true if this is an invalid-shape error.
    #[must_use]
    pub const fn is_invalid_shape(&self) -> bool {
        matches!(self, Self::InvalidShape { .. })
    }
}

/// Result type alias for shapecast operations.
pub type AccessResult<T> = Result<T, AccessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_attribute_message() {
        let err = AccessError::UnknownAttribute {
            shape: "Person".to_string(),
            name: "Age".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("Age"));
        assert!(msg.contains("Person"));
        assert!(err.is_unknown_attribute());
        assert!(!err.is_shape_mismatch());
    }

    #[test]
    fn test_shape_mismatch_message() {
        let err = AccessError::ShapeMismatch {
            location: "Person.Salutation".to_string(),
            expected: "aggregate at segment 'Person'".to_string(),
            found: "string".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("Person.Salutation"));
        assert!(msg.contains("string"));
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn test_unassignable_type_message() {
        let err = AccessError::UnassignableType {
            target: "Dec".to_string(),
            expected: "float".to_string(),
            actual: "string",
        };
        let msg = format!("{err}");
        assert!(msg.contains("Dec"));
        assert!(msg.contains("float"));
        assert!(msg.contains("string"));
        assert!(err.is_unassignable_type());
    }

    #[test]
    fn test_index_out_of_range_message() {
        let err = AccessError::IndexOutOfRange { index: 5, len: 3 };
        let msg = format!("{err}");
        assert!(msg.contains('5'));
        assert!(msg.contains('3'));
        assert!(err.is_index_out_of_range());
    }

    #[test]
    fn test_not_an_aggregate_message() {
        let err = AccessError::NotAnAggregate { kind: "int" };
        assert!(format!("{err}").contains("int"));
        assert!(err.is_not_an_aggregate());
        assert!(!err.is_index_out_of_range());
    }
}
