//! Plaza settings with persistence
//!
//! Settings are saved to `~/.config/plaza/settings.toml`

use std::fs;
use std::path::PathBuf;

use plaza_game::CharacterConfig;
use plaza_physics::CharacterColliderConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All plaza settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub controls: CharacterConfig,
    pub collider: CharacterColliderConfig,
    pub walkthrough: WalkthroughSettings,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("plaza"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse settings from TOML; missing fields take their defaults
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        // Create config directory if it doesn't exist
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Headless walkthrough settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkthroughSettings {
    /// Simulated frames per second
    pub frame_rate: u32,
    /// Total simulated frames
    pub frames: u32,
    /// Write the effective settings back to disk after the run
    pub save_settings: bool,
}

impl Default for WalkthroughSettings {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            frames: 600,
            save_settings: false,
        }
    }
}

impl WalkthroughSettings {
    /// Frame delta in seconds
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = GameSettings::parse("").unwrap();
        assert_eq!(settings.walkthrough.frame_rate, 60);
        assert_eq!(settings.controls.movement.walk_speed, 6.0);
        assert_eq!(settings.controls.world_half_extent, 25.0);
        assert_eq!(settings.collider.half_extents.y, 0.9);
    }

    #[test]
    fn partial_override() {
        let settings = GameSettings::parse(
            r#"
            [controls]
            world_half_extent = 40.0

            [controls.movement]
            walk_speed = 3.5

            [walkthrough]
            frames = 10
            "#,
        )
        .unwrap();
        assert_eq!(settings.controls.world_half_extent, 40.0);
        assert_eq!(settings.controls.movement.walk_speed, 3.5);
        assert!(settings.controls.movement.normalize_diagonal);
        assert_eq!(settings.walkthrough.frames, 10);
        assert_eq!(settings.walkthrough.frame_rate, 60);
    }

    #[test]
    fn round_trips_through_toml() {
        let settings = GameSettings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed = GameSettings::parse(&text).unwrap();
        assert_eq!(parsed.controls.rotation.turn_step, settings.controls.rotation.turn_step);
    }

    #[test]
    fn frame_delta_never_divides_by_zero() {
        let walkthrough = WalkthroughSettings {
            frame_rate: 0,
            ..Default::default()
        };
        assert_eq!(walkthrough.frame_delta(), 1.0);
    }
}
