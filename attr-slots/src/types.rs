//! Core types for the attribute slot library
//!
//! This module defines the dynamically typed values that live in instance
//! storage, the kinds used by slot validation predicates, and the error type
//! shared by every slot operation.

use serde::Serialize;
use std::fmt;

/// Result type for slot operations
pub type Result<T> = std::result::Result<T, SlotError>;

/// Errors raised by slot and object operations
///
/// Errors are always surfaced to the immediate caller; nothing in this crate
/// retries or suppresses them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SlotError {
    /// A write through a validated slot received a value failing its predicate
    #[error("Expected {expected} for attribute '{attribute}', got {found}")]
    TypeValidation {
        attribute: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// Read or delete of an attribute that was never set
    #[error("'{owner}' object has no attribute '{attribute}'")]
    MissingAttribute { owner: String, attribute: String },
}

impl SlotError {
    pub(crate) fn missing(owner: impl Into<String>, attribute: impl Into<String>) -> Self {
        SlotError::MissingAttribute {
            owner: owner.into(),
            attribute: attribute.into(),
        }
    }
}

/// A value held in instance storage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Signed integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// Boolean value (never treated as an integer)
    Boolean(bool),
    /// Text value
    Text(String),
}

/// The variant of a [`Value`], used by slot validation predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Float,
    Boolean,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Integer => write!(f, "an int"),
            ValueKind::Float => write!(f, "a float"),
            ValueKind::Boolean => write!(f, "a bool"),
            ValueKind::Text => write!(f, "a str"),
        }
    }
}

impl ValueKind {
    /// Check whether a value satisfies this kind
    pub fn accepts(&self, value: &Value) -> bool {
        value.kind() == *self
    }
}

impl Value {
    /// Get the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Get the integer payload, if this is an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Convert numeric values to f64 (integers widen, others are rejected)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            // Whole floats keep a trailing `.0` so they read as floats
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", if *v { "True" } else { "False" }),
            Value::Text(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        let int_val = Value::from(42);
        assert_eq!(int_val.kind(), ValueKind::Integer);
        assert_eq!(int_val.as_i64(), Some(42));
        assert_eq!(int_val.as_f64(), Some(42.0));

        let float_val = Value::from(2.5);
        assert_eq!(float_val.as_i64(), None);
        assert_eq!(float_val.as_f64(), Some(2.5));

        assert_eq!(Value::from(true).as_i64(), None);
        assert_eq!(Value::from("x").as_f64(), None);
    }

    #[test]
    fn test_bool_is_not_integer() {
        assert!(!ValueKind::Integer.accepts(&Value::Boolean(true)));
        assert!(ValueKind::Integer.accepts(&Value::Integer(0)));
    }

    #[test]
    fn test_error_display() {
        let err = SlotError::TypeValidation {
            attribute: "x".to_string(),
            expected: ValueKind::Integer,
            found: ValueKind::Float,
        };
        assert_eq!(err.to_string(), "Expected an int for attribute 'x', got a float");

        let err = SlotError::missing("Point", "y");
        assert_eq!(err.to_string(), "'Point' object has no attribute 'y'");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Float(4.0).to_string(), "4.0");
        assert_eq!(Value::Float(-2.0).to_string(), "-2.0");
        assert_eq!(Value::Float(4.5).to_string(), "4.5");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Integer(4).to_string(), "4");
        assert_eq!(Value::Boolean(false).to_string(), "False");
    }

    #[test]
    fn test_value_serializes_untagged() {
        assert_eq!(serde_json::to_string(&Value::Integer(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Value::Text("a".into())).unwrap(), "\"a\"");
    }
}
