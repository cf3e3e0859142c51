//! Movement configuration and direction resolution

use glam::Vec3;
use plaza_core::ConfigError;
use serde::{Deserialize, Serialize};

use crate::input::ControlState;

/// Movement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed in world units per second
    pub walk_speed: f32,
    /// Keep diagonal movement at walking speed instead of sqrt(2) times it
    pub normalize_diagonal: bool,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 6.0,
            normalize_diagonal: true,
        }
    }
}

impl MovementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.walk_speed.is_finite() || self.walk_speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(self.walk_speed));
        }
        Ok(())
    }

    /// Local-space direction for the held movement keys.
    ///
    /// Forward is -Z and right is +X. Opposite keys cancel out.
    pub fn local_direction(&self, controls: &ControlState) -> Vec3 {
        let mut direction = Vec3::ZERO;
        if controls.forward {
            direction.z -= 1.0;
        }
        if controls.backward {
            direction.z += 1.0;
        }
        if controls.left {
            direction.x -= 1.0;
        }
        if controls.right {
            direction.x += 1.0;
        }
        if self.normalize_diagonal {
            direction.normalize_or_zero()
        } else {
            direction
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputAction;

    #[test]
    fn test_forward_is_negative_z() {
        let config = MovementConfig::default();
        let direction = config.local_direction(&ControlState::with(InputAction::MoveForward));
        assert_eq!(direction, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_diagonal_normalized() {
        let config = MovementConfig::default();
        let controls = ControlState {
            forward: true,
            right: true,
            ..Default::default()
        };
        let direction = config.local_direction(&controls);
        assert!((direction.length() - 1.0).abs() < 1e-5);

        let raw = MovementConfig {
            normalize_diagonal: false,
            ..Default::default()
        };
        assert_eq!(raw.local_direction(&controls), Vec3::new(1.0, 0.0, -1.0));
    }

    #[test]
    fn test_nothing_held_is_zero() {
        let config = MovementConfig::default();
        assert_eq!(config.local_direction(&ControlState::default()), Vec3::ZERO);
    }

    #[test]
    fn test_speed_validation() {
        let config = MovementConfig {
            walk_speed: -2.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpeed(-2.0)));
        assert!(MovementConfig::default().validate().is_ok());
    }
}
