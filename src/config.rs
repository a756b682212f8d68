//! Game configuration.
//!
//! Settings are read from a RON file whose path comes from `SPRITE_HERO_CONFIG`
//! (default `config/game.ron`). Every field is optional; anything left out takes
//! the built-in default. A missing file means "all defaults", while a file that
//! fails to parse or validate is reported as an error.

use glam::Vec2;
use image::Rgba;
use log::info;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::engine::renderer::Color;
use crate::game::characters::{AnimationState, CharacterStats};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "SPRITE_HERO_CONFIG";

/// Config file used when the environment variable is unset
pub const DEFAULT_CONFIG_PATH: &str = "config/game.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Sprite Hero".to_string(),
        }
    }
}

/// Drawing surface size and clear colour
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Opaque RGB background
    pub background: [u8; 3],
}

impl CanvasConfig {
    pub fn background_color(&self) -> Color {
        let [r, g, b] = self.background;
        Rgba([r, g, b, 255])
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 576,
            background: [0, 0, 0],
        }
    }
}

/// One animation clip: which sheet to show for a state and how to time it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClipConfig {
    pub state: AnimationState,
    /// Sheet path relative to the asset root
    pub path: String,
    pub frames: usize,
    pub cadence: u32,
}

impl ClipConfig {
    fn new(state: AnimationState, frames: usize) -> Self {
        Self {
            state,
            path: format!("hero/sprites/{}.png", state.name()),
            frames,
            cadence: DEFAULT_CADENCE,
        }
    }
}

const DEFAULT_CADENCE: u32 = 10;

/// The hero's clip table: 8-frame ground loops, 2-frame air loops
pub fn default_clips() -> Vec<ClipConfig> {
    AnimationState::ALL
        .iter()
        .map(|&state| {
            let frames = if state.is_airborne() { 2 } else { 8 };
            ClipConfig::new(state, frames)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Top-left corner at startup
    pub spawn: [f32; 2],
    pub stats: CharacterStats,
    pub clips: Vec<ClipConfig>,
}

impl CharacterConfig {
    pub fn spawn_position(&self) -> Vec2 {
        Vec2::from(self.spawn)
    }
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            spawn: [1.0, 0.0],
            stats: CharacterStats::default(),
            clips: default_clips(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub canvas: CanvasConfig,
    /// Directory sprite sheet paths are resolved against
    pub asset_root: String,
    /// Block the first tick until every sheet has loaded or failed
    pub wait_for_assets: bool,
    pub character: CharacterConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            canvas: CanvasConfig::default(),
            asset_root: "assets".to_string(),
            wait_for_assets: false,
            character: CharacterConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a RON document
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file at `path`, or the defaults if it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let source = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&source)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the path in `SPRITE_HERO_CONFIG`, falling back to `config/game.ron`
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_or_default(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas size must be non-zero, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }

        let stats = &self.character.stats;
        if !(stats.weight > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "weight must be positive, got {}",
                stats.weight
            )));
        }

        for clip in &self.character.clips {
            if clip.frames == 0 || clip.cadence == 0 {
                return Err(ConfigError::Invalid(format!(
                    "clip {} needs at least one frame and a cadence of at least 1",
                    clip.state
                )));
            }
        }

        for state in AnimationState::ALL {
            if !self.character.clips.iter().any(|clip| clip.state == state) {
                return Err(ConfigError::Invalid(format!("missing clip for {}", state)));
            }
        }

        Ok(())
    }
}
