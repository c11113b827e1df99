//! Rendering of instance snapshots
//!
//! Text output mirrors a mapping literal (`{radius: 4}`); JSON output is a
//! plain object keyed by attribute name.

use anyhow::{Context, Result};
use attr_slots::InstanceStorage;

/// Render the attributes held directly by an instance
pub fn render_vars(storage: &InstanceStorage, json: bool) -> Result<String> {
    if json {
        return storage
            .to_json()
            .context("Failed to serialize instance storage");
    }

    let entries: Vec<String> = storage
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect();
    Ok(format!("{{{}}}", entries.join(", ")))
}
