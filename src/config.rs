//! Gameplay tuning
//!
//! Externally supplied scalars, loaded from a JSON file. A missing or
//! malformed file falls back to the defaults below; the core performs no
//! further validation.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Scalar configuration surface for a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Force scale applied to the input axes each physics step
    pub player_speed: f32,
    /// Round time budget in seconds
    pub time_allowed: f32,
    /// Spawn delay window in seconds, before difficulty scaling
    pub min_spawn_delay: f32,
    pub max_spawn_delay: f32,
    /// Campaign length
    pub num_levels: u32,
    /// Half-extent of the square spawn region on the two horizontal axes
    pub spawn_half_extent: f32,
    /// Vertical offset spawned pickups keep (the prefab's default)
    pub pickup_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player_speed: 10.0,
            time_allowed: 30.0,
            min_spawn_delay: 5.0,
            max_spawn_delay: 10.0,
            num_levels: 5,
            spawn_half_extent: 5.0,
            pickup_height: 0.5,
        }
    }
}

impl Config {
    /// Load config from a JSON file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Malformed config {}: {err}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::info!("No config at {} ({err}); using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write config as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
