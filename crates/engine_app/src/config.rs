//! Application configuration.
//!
//! Loaded from a JSON file whose path is the first command-line argument or
//! the `ENGINE_CONFIG` environment variable. Every field is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use engine_ecs::WorldConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "ENGINE_CONFIG";

/// Configuration for the tick loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
        }
    }
}

/// The scene built at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub name: String,
    /// Number of cubes to place.
    pub cubes: usize,
    /// Number of spheres to place.
    pub spheres: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            cubes: 1,
            spheres: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub tick: TickConfig,
    pub scene: SceneConfig,
}

impl AppConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid app config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in config file {}", path.display()))
    }

    /// Load from the first CLI argument, else `ENGINE_CONFIG`, else defaults.
    pub fn load() -> Result<Self> {
        match config_path(std::env::args().nth(1), std::env::var(CONFIG_ENV).ok()) {
            Some(path) => {
                info!(path = %path.display(), "loading config");
                Self::from_path(&path)
            }
            None => {
                info!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        anyhow::ensure!(
            self.tick.tick_rate.is_finite() && self.tick.tick_rate > 0.0,
            "tick_rate must be a positive number, got {}",
            self.tick.tick_rate
        );
        let Some(placed) = self.scene.cubes.checked_add(self.scene.spheres) else {
            anyhow::bail!(
                "scene entity count overflows: {} cubes plus {} spheres",
                self.scene.cubes,
                self.scene.spheres
            );
        };
        anyhow::ensure!(
            placed <= self.world.max_entities,
            "scene places {placed} entities but max_entities is {}",
            self.world.max_entities
        );
        Ok(())
    }
}

fn config_path(arg: Option<String>, env: Option<String>) -> Option<PathBuf> {
    arg.or(env).filter(|s| !s.is_empty()).map(PathBuf::from)
}
