//! Whole-registry snapshot persistence.
//!
//! The snapshot holds the four entity collections plus the config; derived
//! indices are rebuilt on load. [`restore`] never fails: an absent,
//! unreadable, or inconsistent snapshot yields an empty registry, so callers
//! never need to check for a missing result.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::config::RegistryConfig;
use crate::core::invariants::validate_invariants;
use crate::core::registry::Registry;
use crate::fleet::{Car, Driver, Model, RentRecord};

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    config: RegistryConfig,
    models: Vec<Model>,
    cars: Vec<Car>,
    drivers: Vec<Driver>,
    records: Vec<RentRecord>,
}

/// Serialize the registry state sorted by entity key, for stable output.
/// Records keep their per-car insertion order.
fn snapshot_of(registry: &Registry) -> Snapshot {
    let mut models: Vec<Model> = registry.models.values().cloned().collect();
    models.sort_by(|a, b| a.name.cmp(&b.name));
    let mut cars: Vec<Car> = registry.cars.values().cloned().collect();
    cars.sort_by(|a, b| a.reg_number.cmp(&b.reg_number));
    let mut drivers: Vec<Driver> = registry.drivers.values().cloned().collect();
    drivers.sort_by_key(|driver| driver.license_id);

    let mut regs: Vec<&String> = registry.histories.keys().collect();
    regs.sort();
    let records = regs
        .into_iter()
        .flat_map(|reg| registry.histories[reg].iter().cloned())
        .collect();

    Snapshot {
        config: registry.config.clone(),
        models,
        cars,
        drivers,
        records,
    }
}

/// Write the whole registry to `path` (pretty JSON, temp file + rename).
pub fn save(registry: &Registry, path: &Path) -> Result<()> {
    let snapshot = snapshot_of(registry);
    let mut buf =
        serde_json::to_string_pretty(&snapshot).context("serialize registry snapshot")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

/// Restore a registry from `path`.
///
/// Absent or unparseable sources, and snapshots that fail the engine's
/// consistency invariants, all degrade to an empty registry with default
/// config.
pub fn restore(path: &Path) -> Registry {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            debug!(path = %path.display(), %err, "no snapshot, starting empty");
            return Registry::default();
        }
    };
    let snapshot: Snapshot = match serde_json::from_str(&contents) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(path = %path.display(), %err, "unreadable snapshot, starting empty");
            return Registry::default();
        }
    };
    let registry = Registry::from_parts(
        snapshot.config,
        snapshot.models,
        snapshot.cars,
        snapshot.drivers,
        snapshot.records,
    );
    let violations = validate_invariants(&registry);
    if !violations.is_empty() {
        warn!(
            path = %path.display(),
            "snapshot violates invariants, starting empty: {}",
            violations.join("; ")
        );
        return Registry::default();
    }
    debug!(path = %path.display(), "snapshot restored");
    registry
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("snapshot path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp snapshot {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace snapshot {}", path.display()))?;
    Ok(())
}
