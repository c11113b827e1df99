//! Attribute Slots Library
//!
//! Explicit, per-field attribute interception for dynamically typed objects,
//! plus a small synchronous callback invoker.
//!
//! # Architecture
//!
//! - [`NamedSlot`] is a data descriptor: it validates writes against a
//!   [`ValueKind`] and always governs its attribute name.
//! - [`LazySlot`] is a non-data descriptor: it computes a value on first read
//!   and stores it in the instance, after which the instance value wins.
//! - [`TypeDef`] groups the slots of one type; [`Object`] pairs a shared
//!   `TypeDef` with per-instance storage and applies the lookup order.
//! - [`invoke`] and [`CallCounter`] run a function and pass its result to a
//!   counting callback.
//!
//! # Example Usage
//!
//! ```
//! use attr_slots::{Circle, Point, SlotError};
//!
//! let mut p = Point::new(3, 4).unwrap();
//! p.set_y(5).unwrap();
//! assert_eq!(p.y().unwrap(), 5);
//! assert!(matches!(p.set_x(1.5), Err(SlotError::TypeValidation { .. })));
//!
//! let mut c = Circle::new(4.0).unwrap();
//! let area = c.area().unwrap(); // computed once, then cached on `c`
//! assert_eq!(c.area().unwrap(), area);
//! ```

// Public modules
pub mod callback;
pub mod descriptor;
pub mod lazy;
pub mod object;
pub mod shapes;
pub mod storage;
pub mod types;

// Re-export main types for convenience
pub use callback::{invoke, CallCounter, Callback};
pub use descriptor::{DataDescriptor, Lookup, NamedSlot};
pub use lazy::{ComputeFn, LazySlot, LazyState, NonDataDescriptor};
pub use object::{ClassAttr, Object, TypeDef, TypeDefBuilder};
pub use shapes::{Circle, Point};
pub use storage::InstanceStorage;
pub use types::{Result, SlotError, Value, ValueKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a fresh object has no attributes
        let ty = TypeDef::builder("Empty").build();
        let obj = Object::new(ty);
        assert!(obj.vars().is_empty());
    }
}
