//! Registry tunables: pricing constants and damage thresholds.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Pricing and condition policy for the registry.
///
/// Loaded from human-edited TOML by `io::config`; missing fields default to
/// the values below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Price per litre charged for fuel missing at return.
    pub fuel_price: u32,

    /// Percent of the base rental price charged per 100% of damage.
    pub fine_percent: u32,

    /// Damage at or below this keeps the car in `Excellent` condition.
    pub good_threshold: u32,

    /// Damage above `good_threshold` and at or below this maps to `Good`.
    pub bad_threshold: u32,

    /// Damage at or above this removes the car instead of degrading it.
    pub remove_threshold: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            fuel_price: 10,
            fine_percent: 15,
            good_threshold: 10,
            bad_threshold: 30,
            remove_threshold: 60,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.good_threshold >= self.bad_threshold {
            return Err(anyhow!("good_threshold must be below bad_threshold"));
        }
        if self.bad_threshold >= self.remove_threshold {
            return Err(anyhow!("bad_threshold must be below remove_threshold"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        RegistryConfig::default().validate().expect("valid");
    }

    #[test]
    fn overlapping_thresholds_are_rejected() {
        let cfg = RegistryConfig {
            good_threshold: 30,
            bad_threshold: 30,
            ..RegistryConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = RegistryConfig {
            bad_threshold: 60,
            remove_threshold: 60,
            ..RegistryConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
