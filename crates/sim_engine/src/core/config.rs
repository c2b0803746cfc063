//! Configuration system
//!
//! File-backed configuration with format selected by extension (TOML or
//! RON), plus the simulation-loop settings the engine itself consumes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("serialize error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Loadable, savable configuration.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file.
    ///
    /// # Errors
    /// `Io` when the file cannot be read, `Parse` on malformed content,
    /// `UnsupportedFormat` for other extensions.
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            let contents = std::fs::read_to_string(path)?;
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to a `.toml` or `.ron` file.
    ///
    /// # Errors
    /// `Serialize` when encoding fails, `Io` when the file cannot be
    /// written, `UnsupportedFormat` for other extensions.
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Simulation-loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound applied to measured frame deltas, in seconds. Keeps a
    /// stall (debugger pause, window drag) from turning into one giant
    /// simulation step.
    pub max_delta_time: f32,

    /// Fixed timestep in seconds; when set, `Engine::step` ignores measured
    /// time entirely. Useful for deterministic and headless runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_delta_time: Option<f32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_delta_time: 0.25,
            fixed_delta_time: None,
        }
    }
}

impl Config for EngineConfig {}
