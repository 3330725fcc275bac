//! Engine Configuration
//!
//! Startup settings loaded from a RON file. A missing or malformed file is
//! not fatal: the loader logs what went wrong and the engine runs on
//! defaults.
//!
//! Debug render toggles live here as explicit configuration handed into the
//! render step, not as process-wide mutable flags.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::timing::FpsLimit;

/// Default config location next to the executable
pub const CONFIG_PATH: &str = "minnow.ron";

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    /// File I/O error
    Io(String),
    /// RON parse error
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}

/// Debug rendering toggles, passed into the render step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugOptions {
    /// Draw entity textures
    pub render_textures: bool,
    /// Draw rectangle outlines around entities
    pub render_outlines: bool,
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            render_textures: true,
            render_outlines: false,
        }
    }
}

/// Startup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window size in pixels
    pub window_width: u32,
    pub window_height: u32,
    /// Pixels one world unit occupies at zoom 1.0
    pub pixels_per_unit: f32,
    /// Entity pool capacity, fixed for the run
    pub entity_capacity: usize,
    /// Sprite atlas image path
    pub atlas_path: String,
    /// Background image path
    pub background_path: String,
    /// Frame rate cap
    pub fps_limit: FpsLimit,
    pub debug: DebugOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            pixels_per_unit: 64.0,
            entity_capacity: 4096,
            atlas_path: "assets/tiny_dungeon_packed.png".to_string(),
            background_path: "assets/texture_03.png".to_string(),
            fps_limit: FpsLimit::default(),
            debug: DebugOptions::default(),
        }
    }
}

impl Config {
    /// Parse a config from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Load the default config file, falling back to defaults with a logged
    /// warning when it is missing or malformed.
    pub fn load_or_default() -> Self {
        match Self::load(Path::new(CONFIG_PATH)) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Config {} not usable ({}), using defaults", CONFIG_PATH, e);
                Self::default()
            }
        }
    }
}
