//! Configuration
//!
//! Process-wide settings, loaded once at startup and read-only after:
//! `main` loads a `Config` and hands it down, nothing mutates it later.
//! Looks for `wildmere.ron` in the working directory first, then in the
//! platform config directory. A missing or malformed file falls back to
//! defaults with a logged warning rather than aborting.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Virtual screen width in pixels
    pub screen_width: u32,
    /// Virtual screen height in pixels
    pub screen_height: u32,
    /// Target frames per second for the game loop
    pub frame_rate: u32,
    /// World map width in tiles
    pub map_width: i32,
    /// World map height in tiles
    pub map_height: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            frame_rate: 60,
            map_width: 48,
            map_height: 21,
        }
    }
}

impl Config {
    /// Load configuration from the first config file found, or defaults
    pub fn load() -> Self {
        for path in Self::search_paths() {
            if !path.exists() {
                continue;
            }
            match fs::read_to_string(&path) {
                Ok(content) => match ron::from_str(&content) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        log::warn!(
                            "Failed to parse {}: {}. Using defaults.",
                            path.display(),
                            e
                        );
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                }
            }
        }
        log::info!("No config file found, using defaults");
        Self::default()
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("wildmere.ron")];
        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "wildmere", "Wildmere") {
            paths.push(proj_dirs.config_dir().join("wildmere.ron"));
        }
        paths
    }

    /// Per-frame time budget for the loop
    pub fn frame_time(&self) -> Duration {
        Duration::from_millis(1000 / self.frame_rate.max(1) as u64)
    }
}
