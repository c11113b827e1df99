//! Validated named slots
//!
//! A [`NamedSlot`] is a data descriptor: it owns the read, write and delete
//! path for one attribute name on every instance of its type. Writes are
//! checked against the slot's [`ValueKind`] before they reach instance
//! storage.

use crate::storage::InstanceStorage;
use crate::types::{Result, SlotError, Value, ValueKind};
use std::fmt;

/// Outcome of reading a descriptor
///
/// Reading through the owner type (no instance) yields the descriptor itself,
/// so callers can inspect slot metadata at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a, D: ?Sized> {
    /// Accessed via the owner type: the descriptor object
    Descriptor(&'a D),
    /// Accessed via an instance: the attribute value
    Value(Value),
}

impl<'a, D: ?Sized> Lookup<'a, D> {
    /// Get the value, if this lookup went through an instance
    pub fn value(self) -> Option<Value> {
        match self {
            Lookup::Value(v) => Some(v),
            Lookup::Descriptor(_) => None,
        }
    }

    /// Get the descriptor, if this lookup went through the owner type
    pub fn descriptor(&self) -> Option<&'a D> {
        match self {
            Lookup::Descriptor(d) => Some(*d),
            Lookup::Value(_) => None,
        }
    }
}

/// Read/write/delete interception for one attribute
///
/// A data descriptor takes precedence over a same-named entry in instance
/// storage: every access to its name is routed through these methods.
pub trait DataDescriptor {
    /// Attribute name this descriptor governs
    fn name(&self) -> &str;

    /// Read the attribute from `storage` of an instance of `owner`
    fn read(&self, owner: &str, storage: &InstanceStorage) -> Result<Value>;

    /// Validate and store `value` in `storage`
    fn write(&self, storage: &mut InstanceStorage, value: Value) -> Result<()>;

    /// Remove the attribute from `storage` of an instance of `owner`
    fn delete(&self, owner: &str, storage: &mut InstanceStorage) -> Result<()>;
}

/// A named slot enforcing a type predicate on write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSlot {
    name: String,
    kind: ValueKind,
}

impl NamedSlot {
    /// Create a slot accepting values of `kind`
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a slot accepting only integers
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Integer)
    }

    /// The kind every stored value must have
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Descriptor-style access: `None` means access via the owner type
    pub fn get(&self, instance: Option<&InstanceStorage>, owner: &str) -> Result<Lookup<'_, Self>> {
        match instance {
            None => Ok(Lookup::Descriptor(self)),
            Some(storage) => self.read(owner, storage).map(Lookup::Value),
        }
    }
}

impl fmt::Display for NamedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<slot '{}' accepting {}>", self.name, self.kind)
    }
}

impl DataDescriptor for NamedSlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self, owner: &str, storage: &InstanceStorage) -> Result<Value> {
        storage
            .get(&self.name)
            .cloned()
            .ok_or_else(|| SlotError::missing(owner, &self.name))
    }

    fn write(&self, storage: &mut InstanceStorage, value: Value) -> Result<()> {
        if !self.kind.accepts(&value) {
            log::debug!(
                "Rejected write to '{}': expected {}, got {}",
                self.name,
                self.kind,
                value.kind()
            );
            return Err(SlotError::TypeValidation {
                attribute: self.name.clone(),
                expected: self.kind,
                found: value.kind(),
            });
        }
        storage.insert(self.name.clone(), value);
        Ok(())
    }

    fn delete(&self, owner: &str, storage: &mut InstanceStorage) -> Result<()> {
        storage
            .remove(&self.name)
            .map(|_| ())
            .ok_or_else(|| SlotError::missing(owner, &self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let slot = NamedSlot::integer("x");
        let mut storage = InstanceStorage::new();

        for v in [i64::MIN, -1, 0, 7, i64::MAX] {
            slot.write(&mut storage, Value::Integer(v)).unwrap();
            assert_eq!(slot.read("Point", &storage).unwrap(), Value::Integer(v));
        }
    }

    #[test]
    fn test_write_rejects_non_integers() {
        let slot = NamedSlot::integer("x");
        let mut storage = InstanceStorage::new();

        for value in [Value::Float(1.0), Value::Boolean(true), Value::from("1")] {
            let found = value.kind();
            let err = slot.write(&mut storage, value).unwrap_err();
            assert_eq!(
                err,
                SlotError::TypeValidation {
                    attribute: "x".to_string(),
                    expected: ValueKind::Integer,
                    found,
                }
            );
        }
        // Failed writes leave storage untouched
        assert!(storage.is_empty());
    }

    #[test]
    fn test_read_and_delete_missing() {
        let slot = NamedSlot::integer("y");
        let mut storage = InstanceStorage::new();

        assert!(matches!(
            slot.read("Point", &storage),
            Err(SlotError::MissingAttribute { .. })
        ));
        assert!(matches!(
            slot.delete("Point", &mut storage),
            Err(SlotError::MissingAttribute { .. })
        ));

        slot.write(&mut storage, Value::Integer(1)).unwrap();
        slot.delete("Point", &mut storage).unwrap();
        assert!(!storage.contains("y"));
    }

    #[test]
    fn test_get_without_instance_returns_descriptor() {
        let slot = NamedSlot::integer("x");
        let lookup = slot.get(None, "Point").unwrap();
        let descriptor = lookup.descriptor().unwrap();
        assert!(std::ptr::eq(descriptor, &slot));
        assert_eq!(descriptor.name(), "x");
        assert_eq!(descriptor.kind(), ValueKind::Integer);
        assert_eq!(descriptor.to_string(), "<slot 'x' accepting an int>");
    }

    #[test]
    fn test_get_with_instance_returns_value() {
        let slot = NamedSlot::integer("x");
        let mut storage = InstanceStorage::new();
        slot.write(&mut storage, Value::Integer(3)).unwrap();

        let lookup = slot.get(Some(&storage), "Point").unwrap();
        assert_eq!(lookup.value(), Some(Value::Integer(3)));
    }
}
