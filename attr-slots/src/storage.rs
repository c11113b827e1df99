//! Per-instance attribute storage
//!
//! Every object owns one `InstanceStorage`: a plain name → value map with no
//! validation of its own. Type-level slots decide what may be written here.

use crate::types::Value;
use serde::Serialize;
use std::collections::BTreeMap;

/// The per-object mapping from attribute name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InstanceStorage {
    entries: BTreeMap<String, Value>,
}

impl InstanceStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored under `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Store `value` under `name`, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(name.into(), value)
    }

    /// Remove the value stored under `name`
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    /// Check whether `name` has an entry
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render the storage as a JSON object
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
