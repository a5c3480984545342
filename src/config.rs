//! Player configuration
//!
//! Defaults match the shipped game's layout and timing. A JSON file may
//! override any subset of fields, and a few environment variables are
//! applied on top for quick experiments.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::{Speed, Viewport};

/// Environment variable overriding the save file path
pub const ENV_SAVE: &str = "BIRINGAN_SAVE";
/// Environment variable overriding the typewriter speed (1x/2x/3x)
pub const ENV_SPEED: &str = "BIRINGAN_SPEED";
/// Environment variable overriding the asset directory
pub const ENV_ASSETS: &str = "BIRINGAN_ASSETS";
/// Environment variable enabling debug logging
pub const ENV_DEBUG: &str = "BIRINGAN_DEBUG";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Window size used for layout
    pub viewport: Viewport,
    /// Typewriter settings
    pub text: TextConfig,
    /// Save ledger settings
    pub save: SaveConfig,
    /// Asset lookup settings
    pub assets: AssetConfig,
}

/// Typewriter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Characters revealed per second at 1x
    pub chars_per_second: f32,
    /// Initial speed multiplier
    pub speed: Speed,
    /// Start with auto-advance enabled
    pub auto_advance: bool,
    /// Seconds a fully revealed line stays before auto-advance
    pub auto_advance_delay: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            chars_per_second: 50.0,
            speed: Speed::Normal,
            auto_advance: false,
            auto_advance_delay: 1.0,
        }
    }
}

/// Save ledger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Path of the progress file
    pub path: PathBuf,
    /// Write a snapshot on every frame with visible dialogue
    pub autosave: bool,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("savegame.dat"),
            autosave: true,
        }
    }
}

/// Asset lookup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory searched for images and sounds
    pub dir: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl GameConfig {
    /// Parse a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Apply `BIRINGAN_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup, used by tests
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_SAVE) {
            self.save.path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_ASSETS) {
            self.assets.dir = PathBuf::from(dir);
        }
        if let Some(speed) = lookup(ENV_SPEED) {
            self.text.speed =
                Speed::parse(&speed).ok_or(ConfigError::InvalidSpeed { value: speed })?;
        }
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.text.chars_per_second.is_nan() || self.text.chars_per_second <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "chars_per_second must be positive, got {}",
                self.text.chars_per_second
            )));
        }
        if self.text.auto_advance_delay < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "auto_advance_delay must not be negative, got {}",
                self.text.auto_advance_delay
            )));
        }
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(ConfigError::Invalid("viewport must have a positive size".into()));
        }
        Ok(())
    }
}

/// Whether debug logging was requested through the environment
pub fn debug_requested() -> bool {
    std::env::var(ENV_DEBUG).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_constants() {
        let config = GameConfig::default();
        assert_eq!(config.text.chars_per_second, 50.0);
        assert_eq!(config.text.auto_advance_delay, 1.0);
        assert_eq!(config.save.path, PathBuf::from("savegame.dat"));
        assert!(config.save.autosave);
        assert_eq!(config.viewport, Viewport::new(1600.0, 900.0));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "text": { "speed": "fast" } }"#).unwrap();
        assert_eq!(config.text.speed, Speed::Fast);
        assert_eq!(config.text.chars_per_second, 50.0);
        assert_eq!(config.save, SaveConfig::default());
    }

    #[test]
    fn rejects_non_positive_rate() {
        let err = GameConfig::from_json(r#"{ "text": { "chars_per_second": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn overrides_apply_on_top() {
        let config = GameConfig::default()
            .with_overrides(|key| match key {
                ENV_SAVE => Some("/tmp/progress.dat".to_string()),
                ENV_SPEED => Some("3x".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.save.path, PathBuf::from("/tmp/progress.dat"));
        assert_eq!(config.text.speed, Speed::Fastest);
        assert_eq!(config.assets.dir, PathBuf::from("."));
    }

    #[test]
    fn invalid_speed_override_is_reported() {
        let err = GameConfig::default()
            .with_overrides(|key| (key == ENV_SPEED).then(|| "warp".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("warp"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = GameConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
