//! Example types built on slots
//!
//! `Point` uses validated integer slots; `Circle` uses lazy slots for values
//! derived from its radius. Each type definition is created once and shared by
//! every instance.

pub mod circle;
pub mod point;

// Re-export shape types
pub use circle::Circle;
pub use point::Point;

use crate::types::{Result, SlotError, Value, ValueKind};

/// Narrow a stored value to f64 or report what was found instead
pub(crate) fn expect_f64(name: &str, value: &Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| SlotError::TypeValidation {
        attribute: name.to_string(),
        expected: ValueKind::Float,
        found: value.kind(),
    })
}
