//! A point with integer-validated coordinates

use crate::descriptor::{DataDescriptor, NamedSlot};
use crate::object::{Object, TypeDef};
use crate::storage::InstanceStorage;
use crate::types::{Result, SlotError, Value, ValueKind};
use std::sync::{Arc, OnceLock};

static POINT_TYPE: OnceLock<Arc<TypeDef>> = OnceLock::new();

/// A 2D point whose `x` and `y` only accept integers
#[derive(Debug, Clone)]
pub struct Point {
    object: Object,
}

impl Point {
    /// The shared `Point` type definition
    pub fn type_def() -> &'static Arc<TypeDef> {
        POINT_TYPE.get_or_init(|| {
            TypeDef::builder("Point")
                .with_slot(NamedSlot::integer("x"))
                .with_slot(NamedSlot::integer("y"))
                .build()
        })
    }

    /// Class-level access to the slot for `name`
    pub fn slot(name: &str) -> Result<&'static NamedSlot> {
        let attr = Self::type_def().attr(name)?;
        attr.as_data()
            .ok_or_else(|| SlotError::missing("type Point", name))
    }

    /// Create a point; both coordinates are validated by their slots
    pub fn new(x: impl Into<Value>, y: impl Into<Value>) -> Result<Self> {
        let mut object = Object::new(Arc::clone(Self::type_def()));
        object.set("x", x)?;
        object.set("y", y)?;
        Ok(Self { object })
    }

    pub fn x(&self) -> Result<i64> {
        self.coordinate("x")
    }

    pub fn y(&self) -> Result<i64> {
        self.coordinate("y")
    }

    pub fn set_x(&mut self, value: impl Into<Value>) -> Result<()> {
        self.object.set("x", value)
    }

    pub fn set_y(&mut self, value: impl Into<Value>) -> Result<()> {
        self.object.set("y", value)
    }

    /// The instance's own storage
    pub fn vars(&self) -> &InstanceStorage {
        self.object.vars()
    }

    pub fn as_object(&self) -> &Object {
        &self.object
    }

    pub fn as_object_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    fn coordinate(&self, name: &str) -> Result<i64> {
        let value = Self::slot(name)?.read("Point", self.object.vars())?;
        value.as_i64().ok_or_else(|| SlotError::TypeValidation {
            attribute: name.to_string(),
            expected: ValueKind::Integer,
            found: value.kind(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Lookup;

    #[test]
    fn test_construct_and_read() {
        let mut p = Point::new(3, 4).unwrap();
        assert_eq!(p.x().unwrap(), 3);
        assert_eq!(p.y().unwrap(), 4);

        p.set_y(5).unwrap();
        assert_eq!(p.y().unwrap(), 5);
        assert_eq!(p.x().unwrap(), 3);
    }

    #[test]
    fn test_rejects_non_integer_coordinates() {
        let err = Point::new(1.5, 2).unwrap_err();
        assert!(matches!(err, SlotError::TypeValidation { ref attribute, .. } if attribute == "x"));

        let mut p = Point::new(1, 2).unwrap();
        assert!(p.set_y("5").is_err());
        assert_eq!(p.y().unwrap(), 2);
    }

    #[test]
    fn test_type_def_is_shared() {
        let a = Point::new(0, 1).unwrap();
        let b = Point::new(2, 3).unwrap();
        assert!(Arc::ptr_eq(a.as_object().type_def(), b.as_object().type_def()));
    }

    #[test]
    fn test_class_access_vs_instance_access() {
        let p = Point::new(7, 8).unwrap();
        let slot = Point::slot("x").unwrap();

        match slot.get(None, "Point").unwrap() {
            Lookup::Descriptor(d) => assert!(std::ptr::eq(d, slot)),
            Lookup::Value(v) => panic!("expected descriptor, got {}", v),
        }
        assert_eq!(
            slot.get(Some(p.vars()), "Point").unwrap().value(),
            Some(Value::Integer(7))
        );
    }

    #[test]
    fn test_delete_then_read_is_missing() {
        let mut p = Point::new(1, 2).unwrap();
        p.as_object_mut().delete("x").unwrap();
        assert_eq!(p.x().unwrap_err(), SlotError::missing("Point", "x"));
        assert!(p.as_object_mut().delete("x").is_err());
    }
}
