//! Type definitions and instances
//!
//! A [`TypeDef`] holds the class-level attributes shared by all of its
//! instances. An [`Object`] pairs a shared `TypeDef` with its own
//! [`InstanceStorage`] and resolves attribute access in a fixed order:
//!
//! 1. a data slot on the type ([`NamedSlot`]) always wins;
//! 2. otherwise an entry in instance storage;
//! 3. otherwise a lazy slot on the type ([`LazySlot`]) computes and caches;
//! 4. otherwise the attribute is missing.
//!
//! Writes and deletes go through a data slot when one exists for the name and
//! hit instance storage directly otherwise.

use crate::descriptor::{DataDescriptor, NamedSlot};
use crate::lazy::{LazySlot, LazyState, NonDataDescriptor};
use crate::storage::InstanceStorage;
use crate::types::{Result, SlotError, Value};
use std::sync::Arc;

/// A class-level attribute
#[derive(Debug, Clone)]
pub enum ClassAttr {
    /// Validated slot; takes precedence over instance storage
    Data(NamedSlot),
    /// Lazily computed slot; instance storage takes precedence over it
    Lazy(LazySlot),
}

impl ClassAttr {
    pub fn name(&self) -> &str {
        match self {
            ClassAttr::Data(slot) => slot.name(),
            ClassAttr::Lazy(slot) => slot.name(),
        }
    }

    pub fn as_data(&self) -> Option<&NamedSlot> {
        match self {
            ClassAttr::Data(slot) => Some(slot),
            ClassAttr::Lazy(_) => None,
        }
    }

    pub fn as_lazy(&self) -> Option<&LazySlot> {
        match self {
            ClassAttr::Lazy(slot) => Some(slot),
            ClassAttr::Data(_) => None,
        }
    }
}

/// The owner type: a name and its class-level attributes
#[derive(Debug, Clone)]
pub struct TypeDef {
    name: String,
    attrs: Vec<ClassAttr>,
}

impl TypeDef {
    /// Start defining a type called `name`
    pub fn builder(name: impl Into<String>) -> TypeDefBuilder {
        TypeDefBuilder {
            def: TypeDef {
                name: name.into(),
                attrs: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class-level access: the slot object itself, not an instance value
    pub fn attr(&self, name: &str) -> Result<&ClassAttr> {
        self.attrs
            .iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| SlotError::missing(format!("type {}", self.name), name))
    }

    /// All class-level attributes in definition order
    pub fn attrs(&self) -> &[ClassAttr] {
        &self.attrs
    }

    fn find(&self, name: &str) -> Option<&ClassAttr> {
        self.attrs.iter().find(|a| a.name() == name)
    }
}

/// Builder for [`TypeDef`]
#[derive(Debug)]
pub struct TypeDefBuilder {
    def: TypeDef,
}

impl TypeDefBuilder {
    /// Builder method: add a validated slot (replaces a same-named attribute)
    pub fn with_slot(self, slot: NamedSlot) -> Self {
        self.with_attr(ClassAttr::Data(slot))
    }

    /// Builder method: add a lazy slot (replaces a same-named attribute)
    pub fn with_lazy(self, slot: LazySlot) -> Self {
        self.with_attr(ClassAttr::Lazy(slot))
    }

    fn with_attr(mut self, attr: ClassAttr) -> Self {
        self.def.attrs.retain(|a| a.name() != attr.name());
        self.def.attrs.push(attr);
        self
    }

    pub fn build(self) -> Arc<TypeDef> {
        Arc::new(self.def)
    }
}

/// An instance of a [`TypeDef`]
#[derive(Debug, Clone)]
pub struct Object {
    type_def: Arc<TypeDef>,
    storage: InstanceStorage,
}

impl Object {
    /// Create an instance with empty storage
    pub fn new(type_def: Arc<TypeDef>) -> Self {
        Self {
            type_def,
            storage: InstanceStorage::new(),
        }
    }

    pub fn type_def(&self) -> &Arc<TypeDef> {
        &self.type_def
    }

    /// Read an attribute following the lookup order described in the module docs
    pub fn get(&mut self, name: &str) -> Result<Value> {
        let type_def = Arc::clone(&self.type_def);
        let class_attr = type_def.find(name);

        if let Some(ClassAttr::Data(slot)) = class_attr {
            return slot.read(type_def.name(), &self.storage);
        }
        if let Some(value) = self.storage.get(name) {
            return Ok(value.clone());
        }
        if let Some(ClassAttr::Lazy(slot)) = class_attr {
            log::debug!("{}.{}: computing lazy value", type_def.name(), name);
            return slot.read(&mut self.storage);
        }
        Err(SlotError::missing(type_def.name(), name))
    }

    /// Write an attribute; validated when a data slot governs `name`
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        match self.type_def.find(name) {
            Some(ClassAttr::Data(slot)) => slot.write(&mut self.storage, value),
            _ => {
                self.storage.insert(name, value);
                Ok(())
            }
        }
    }

    /// Delete an attribute; deleting a cached lazy value re-arms computation
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let owner = self.type_def.name();
        match self.type_def.find(name) {
            Some(ClassAttr::Data(slot)) => slot.delete(owner, &mut self.storage),
            _ => self
                .storage
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| SlotError::missing(owner, name)),
        }
    }

    /// Report the per-instance state of the lazy attribute `name`
    pub fn lazy_state(&self, name: &str) -> Option<LazyState<'_>> {
        self.type_def
            .find(name)
            .and_then(ClassAttr::as_lazy)
            .map(|slot| slot.state(&self.storage))
    }

    /// The instance's own storage
    pub fn vars(&self) -> &InstanceStorage {
        &self.storage
    }
}
