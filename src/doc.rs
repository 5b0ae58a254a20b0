//! Generic ordered map destination.
//!
//! [`Doc`] is the shape-agnostic fallback destination for conversions: an
//! insertion-ordered mapping from attribute name to [`Value`]. The rest of
//! the crate consumes it only through the minimal capability surface below:
//! set-by-key, get (with default), numeric-coercing retrieval, and ordered
//! iteration.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::Value;

/// Insertion-ordered map from attribute name to value.
///
/// # Examples
///
/// ```
/// use shapecast::{Doc, Value};
///
/// let mut doc = Doc::new();
/// doc.set("Value", Value::Float(99.6));
/// assert_eq!(doc.get_int("Value"), 100); // auto rounding
/// assert_eq!(doc.get_int("Missing"), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Doc {
    entries: IndexMap<String, Value>,
}

impl Doc {
    /// Creates an empty doc.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`. Re-inserting an existing key overwrites
    /// the value but keeps the key's original position.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Borrows the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns the value stored under `key`, or `default` when absent.
    #[must_use]
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.entries.get(key).cloned().unwrap_or(default)
    }

    /// Integer retrieval with automatic coercion.
    ///
    /// Floats round half away from zero; numeric strings are parsed.
    /// Anything else (including a missing key) yields `0`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn get_int(&self, key: &str) -> i64 {
        match self.entries.get(key) {
            Some(Value::Int(v)) => *v,
            Some(Value::Float(v)) => v.round() as i64,
            Some(Value::Str(s)) => s
                .parse::<i64>()
                .or_else(|_| s.parse::<f64>().map(|f| f.round() as i64))
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Float retrieval with automatic coercion.
    ///
    /// Integers widen; numeric strings are parsed. Anything else yields
    /// `0.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn get_float(&self, key: &str) -> f64 {
        match self.entries.get(key) {
            Some(Value::Float(v)) => *v,
            Some(Value::Int(v)) => *v as f64,
            Some(Value::Str(s)) => s.parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// String retrieval: strings come back verbatim, other present values
    /// through their display form, missing keys as the empty string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(Value::Str(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the doc holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Serialize for Doc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut doc = Doc::new();
        doc.set("b", Value::Int(1));
        doc.set("a", Value::Int(2));
        doc.set("c", Value::Int(3));
        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);

        // Overwrite keeps position.
        doc.set("b", Value::Int(9));
        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(doc.get_int("b"), 9);
    }

    #[test]
    fn test_get_or_default() {
        let mut doc = Doc::new();
        doc.set("x", Value::Int(5));
        assert_eq!(doc.get_or("x", Value::Null), Value::Int(5));
        assert_eq!(doc.get_or("y", Value::Int(-1)), Value::Int(-1));
    }

    #[test]
    fn test_get_int_coercion() {
        let mut doc = Doc::new();
        doc.set("int", Value::Int(400));
        doc.set("up", Value::Float(99.6));
        doc.set("down", Value::Float(99.4));
        doc.set("neg", Value::Float(-2.5));
        doc.set("text", Value::Str("123".into()));
        doc.set("ftext", Value::Str("1.9".into()));
        doc.set("junk", Value::Str("nope".into()));
        doc.set("flag", Value::Bool(true));

        assert_eq!(doc.get_int("int"), 400);
        assert_eq!(doc.get_int("up"), 100);
        assert_eq!(doc.get_int("down"), 99);
        assert_eq!(doc.get_int("neg"), -3); // half away from zero
        assert_eq!(doc.get_int("text"), 123);
        assert_eq!(doc.get_int("ftext"), 2);
        assert_eq!(doc.get_int("junk"), 0);
        assert_eq!(doc.get_int("flag"), 0);
        assert_eq!(doc.get_int("missing"), 0);
    }

    #[test]
    fn test_get_float_coercion() {
        let mut doc = Doc::new();
        doc.set("f", Value::Float(0.85));
        doc.set("i", Value::Int(3));
        doc.set("s", Value::Str("2.5".into()));
        assert!((doc.get_float("f") - 0.85).abs() < f64::EPSILON);
        assert!((doc.get_float("i") - 3.0).abs() < f64::EPSILON);
        assert!((doc.get_float("s") - 2.5).abs() < f64::EPSILON);
        assert!((doc.get_float("missing")).abs() < f64::EPSILON);
    }

    #[test]
    fn test_get_str() {
        let mut doc = Doc::new();
        doc.set("ID", Value::Str("ID04".into()));
        doc.set("n", Value::Int(42));
        assert_eq!(doc.get_str("ID"), "ID04");
        assert_eq!(doc.get_str("n"), "42");
        assert_eq!(doc.get_str("missing"), "");
    }

    #[test]
    fn test_doc_serializes_in_order() {
        let mut doc = Doc::new();
        doc.set("z", Value::Int(1));
        doc.set("a", Value::Str("two".into()));
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"z":1,"a":"two"}"#);
    }
}
