//! Engine configuration loader.
//!
//! Reads an [`EngineConfig`] from a TOML file. Distances appear in the file
//! as fractional tiles and are converted to the engine's fixed-point scalar;
//! absent keys keep their engine defaults.

use std::path::Path;

use engine_core::{EngineConfig, Phys};
use serde::Deserialize;

use crate::loaders::{read_file, LoadResult};

/// On-disk shape of the engine configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigSpec {
    show_debug: Option<bool>,
    repath_attempts: Option<u32>,
    /// Tiles.
    adjacent_range: Option<f64>,
    /// Tiles per tick squared.
    projectile_gravity: Option<f64>,
    idle_scan_interval: Option<u32>,
    /// Tiles.
    idle_scan_radius: Option<f64>,
}

fn tiles(value: f64) -> Phys {
    Phys::from_raw((value * Phys::ONE.0 as f64) as i64)
}

/// Loader for the engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load an engine configuration from a TOML file.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::load_str(&content)
    }

    /// Load an engine configuration from TOML text.
    pub fn load_str(content: &str) -> LoadResult<EngineConfig> {
        let spec: ConfigSpec = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse engine config TOML: {}", e))?;
        let mut config = EngineConfig::new();
        if let Some(show_debug) = spec.show_debug {
            config.show_debug = show_debug;
        }
        if let Some(attempts) = spec.repath_attempts {
            config.repath_attempts = attempts;
        }
        if let Some(range) = spec.adjacent_range {
            config.adjacent_range = tiles(range);
        }
        if let Some(gravity) = spec.projectile_gravity {
            config.projectile_gravity = tiles(gravity);
        }
        if let Some(interval) = spec.idle_scan_interval {
            config.idle_scan_interval = interval;
        }
        if let Some(radius) = spec.idle_scan_radius {
            config.idle_scan_radius = tiles(radius);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let config = ConfigLoader::load_str("repath_attempts = 3\nidle_scan_radius = 2.5\n")
            .unwrap();
        assert_eq!(config.repath_attempts, 3);
        assert_eq!(config.idle_scan_radius, Phys::from_raw(Phys::ONE.0 * 5 / 2));
        assert_eq!(
            config.idle_scan_interval,
            EngineConfig::DEFAULT_IDLE_SCAN_INTERVAL
        );
        assert!(!config.show_debug);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ConfigLoader::load_str("warp_speed = true\n").is_err());
    }
}
