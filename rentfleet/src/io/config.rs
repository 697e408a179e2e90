//! Loading and writing the registry tunables as TOML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::config::RegistryConfig;

/// Load config from a TOML file.
///
/// If the file is missing, returns `RegistryConfig::default()`.
pub fn load_config(path: &Path) -> Result<RegistryConfig> {
    if !path.exists() {
        let cfg = RegistryConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RegistryConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &RegistryConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, buf)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, RegistryConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("fleet.toml");
        let cfg = RegistryConfig {
            fuel_price: 12,
            fine_percent: 20,
            ..RegistryConfig::default()
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn invalid_thresholds_are_rejected_on_load() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("fleet.toml");
        fs::write(&path, "good_threshold = 40\nbad_threshold = 30\n").expect("write raw");
        assert!(load_config(&path).is_err());
    }
}
