//! Camera configuration

use plaza_core::ConfigError;
use serde::{Deserialize, Serialize};

/// Follow camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Horizontal distance behind the character
    pub follow_distance: f32,
    /// Height of the camera above the character's origin
    pub follow_height: f32,
    /// Height above the character's origin the camera looks at when pitch is zero
    pub look_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_distance: 6.0,
            follow_height: 3.0,
            look_height: 1.0,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // With no horizontal offset the view direction can line up with the up axis
        if !self.follow_distance.is_finite() || self.follow_distance <= 0.0 {
            return Err(ConfigError::InvalidCamera {
                field: "follow_distance",
                value: self.follow_distance,
            });
        }
        let heights = [
            ("follow_height", self.follow_height),
            ("look_height", self.look_height),
        ];
        for (field, value) in heights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidCamera { field, value });
            }
        }
        Ok(())
    }
}
