//! Lazily computed, instance-cached attributes
//!
//! A [`LazySlot`] is a non-data descriptor. On the first read through an
//! instance it runs its compute function and stores the result in that
//! instance's storage under the slot name. From then on the instance entry
//! shadows the slot, so the compute function is not consulted again until the
//! entry is deleted.
//!
//! # Per-instance state
//!
//! ```text
//! Uncomputed --first read--> Computed --delete entry--> Uncomputed
//! ```
//!
//! # Limitations
//!
//! - Assigning to the attribute after it was computed overwrites the cached
//!   value with no validation and no recomputation hook.
//! - Changing the inputs a value was derived from (e.g. a radius) does not
//!   invalidate the cached value.
//! - Compute-then-store is not atomic. Objects require `&mut` access for
//!   lazy reads, so this only matters if an object is shared behind a lock
//!   that is released between the check and the store.

use crate::descriptor::Lookup;
use crate::storage::InstanceStorage;
use crate::types::{Result, Value};
use std::fmt;
use std::sync::Arc;

/// Compute function of a lazy slot: a pure function of the owning instance
pub type ComputeFn = Arc<dyn Fn(&InstanceStorage) -> Result<Value> + Send + Sync>;

/// Read interception that yields to instance storage once a value exists
pub trait NonDataDescriptor {
    /// Attribute name this descriptor serves
    fn name(&self) -> &str;

    /// Produce the attribute value for an instance that has no entry for it
    fn read(&self, storage: &mut InstanceStorage) -> Result<Value>;
}

/// Whether a lazy attribute has been computed for a given instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LazyState<'a> {
    Uncomputed,
    Computed(&'a Value),
}

/// A derived attribute computed on first read
#[derive(Clone)]
pub struct LazySlot {
    name: String,
    compute: ComputeFn,
}

impl fmt::Debug for LazySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySlot").field("name", &self.name).finish_non_exhaustive()
    }
}

impl LazySlot {
    /// Create a lazy slot named `name`
    pub fn new<F>(name: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&InstanceStorage) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            compute: Arc::new(compute),
        }
    }

    /// Descriptor-style access: `None` means access via the owner type
    pub fn get(&self, instance: Option<&mut InstanceStorage>) -> Result<Lookup<'_, Self>> {
        match instance {
            None => Ok(Lookup::Descriptor(self)),
            Some(storage) => self.read(storage).map(Lookup::Value),
        }
    }

    /// Report whether `storage` currently holds a computed value for this slot
    pub fn state<'s>(&self, storage: &'s InstanceStorage) -> LazyState<'s> {
        match storage.get(&self.name) {
            Some(value) => LazyState::Computed(value),
            None => LazyState::Uncomputed,
        }
    }
}

impl NonDataDescriptor for LazySlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self, storage: &mut InstanceStorage) -> Result<Value> {
        log::trace!("Computing lazy attribute '{}'", self.name);
        let value = (self.compute)(storage)?;
        storage.insert(self.name.clone(), value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SlotError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn doubling_slot(calls: Arc<AtomicUsize>) -> LazySlot {
        LazySlot::new("double", move |storage| {
            calls.fetch_add(1, Ordering::SeqCst);
            let n = storage
                .get("n")
                .and_then(Value::as_i64)
                .ok_or_else(|| SlotError::missing("Thing", "n"))?;
            Ok(Value::Integer(n * 2))
        })
    }

    #[test]
    fn test_read_stores_into_instance() {
        let calls = Arc::new(AtomicUsize::new(0));
        let slot = doubling_slot(calls.clone());
        let mut storage = InstanceStorage::new();
        storage.insert("n", Value::Integer(21));

        assert_eq!(slot.state(&storage), LazyState::Uncomputed);
        assert_eq!(slot.read(&mut storage).unwrap(), Value::Integer(42));
        assert_eq!(slot.state(&storage), LazyState::Computed(&Value::Integer(42)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_compute_error_stores_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let slot = doubling_slot(calls);
        let mut storage = InstanceStorage::new();

        let err = slot.read(&mut storage).unwrap_err();
        assert_eq!(err, SlotError::missing("Thing", "n"));
        assert_eq!(slot.state(&storage), LazyState::Uncomputed);
    }

    #[test]
    fn test_get_without_instance_returns_descriptor() {
        let calls = Arc::new(AtomicUsize::new(0));
        let slot = doubling_slot(calls.clone());

        let lookup = slot.get(None).unwrap();
        assert_eq!(lookup.descriptor().map(|d| d.name()), Some("double"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
