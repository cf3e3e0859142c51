//! Keyboard-driven yaw and pitch

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Quat;
use plaza_core::ConfigError;
use serde::{Deserialize, Serialize};

use crate::input::ControlState;

/// Rotation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Yaw change per frame while a turn key is held (radians)
    pub turn_step: f32,
    /// Pitch change per frame while a look key is held (radians)
    pub look_step: f32,
    /// Lowest allowed pitch (radians)
    pub pitch_min: f32,
    /// Highest allowed pitch (radians)
    pub pitch_max: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            turn_step: 0.03,
            look_step: 0.03,
            pitch_min: -FRAC_PI_4,
            pitch_max: FRAC_PI_4,
        }
    }
}

impl RotationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for step in [self.turn_step, self.look_step] {
            if !step.is_finite() || step < 0.0 {
                return Err(ConfigError::InvalidRotationStep(step));
            }
        }
        // The follow camera tilts its target by tan(pitch), so stay clear of vertical
        let ordered = self.pitch_min > -FRAC_PI_2
            && self.pitch_min < self.pitch_max
            && self.pitch_max < FRAC_PI_2;
        if !ordered {
            return Err(ConfigError::InvalidPitchRange {
                min: self.pitch_min,
                max: self.pitch_max,
            });
        }
        Ok(())
    }
}

/// Facing of the character. Yaw is unbounded; pitch is kept in range by
/// [`RotationController`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    /// Rotation about the vertical axis in radians (positive turns left)
    pub yaw: f32,
    /// Look up/down angle in radians (positive looks up)
    pub pitch: f32,
}

impl Rotation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Back to the default facing
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Body orientation (yaw only, the body never tilts)
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }
}

/// Integrates held turn/look keys into a [`Rotation`], one fixed step per frame
#[derive(Debug, Clone)]
pub struct RotationController {
    config: RotationConfig,
}

impl RotationController {
    pub fn new(config: RotationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Apply one frame of held keys
    pub fn apply(&self, rotation: &mut Rotation, controls: &ControlState) {
        if controls.turn_left {
            rotation.yaw += self.config.turn_step;
        }
        if controls.turn_right {
            rotation.yaw -= self.config.turn_step;
        }
        if controls.look_up {
            rotation.pitch += self.config.look_step;
        }
        if controls.look_down {
            rotation.pitch -= self.config.look_step;
        }
        rotation.pitch = self.clamp_pitch(rotation.pitch);
    }

    /// Clamp a pitch value into the configured range
    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(self.config.pitch_min, self.config.pitch_max)
    }
}

impl Default for RotationController {
    fn default() -> Self {
        Self {
            config: RotationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputAction;

    #[test]
    fn test_turn_accumulates_per_frame() {
        let controller = RotationController::default();
        let mut rotation = Rotation::default();
        let controls = ControlState::with(InputAction::TurnLeft);

        for _ in 0..10 {
            controller.apply(&mut rotation, &controls);
        }
        assert!((rotation.yaw - 0.3).abs() < 1e-5);

        // Releasing freezes the value
        controller.apply(&mut rotation, &ControlState::default());
        assert!((rotation.yaw - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let controller = RotationController::default();
        let mut rotation = Rotation::new(1.0, 0.1);
        let controls = ControlState {
            turn_left: true,
            turn_right: true,
            look_up: true,
            look_down: true,
            ..Default::default()
        };
        controller.apply(&mut rotation, &controls);
        assert!((rotation.yaw - 1.0).abs() < 1e-6);
        assert!((rotation.pitch - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_stays_clamped() {
        let controller = RotationController::default();
        let config = controller.config().clone();
        let mut rotation = Rotation::default();

        let up = ControlState::with(InputAction::LookUp);
        for _ in 0..200 {
            controller.apply(&mut rotation, &up);
            assert!(rotation.pitch <= config.pitch_max);
        }
        assert_eq!(rotation.pitch, config.pitch_max);

        let down = ControlState::with(InputAction::LookDown);
        for _ in 0..200 {
            controller.apply(&mut rotation, &down);
            assert!(rotation.pitch >= config.pitch_min);
        }
        assert_eq!(rotation.pitch, config.pitch_min);
    }

    #[test]
    fn test_out_of_range_pitch_is_pulled_back() {
        let controller = RotationController::default();
        let mut rotation = Rotation::new(0.0, 3.0);
        controller.apply(&mut rotation, &ControlState::default());
        assert_eq!(rotation.pitch, FRAC_PI_4);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let inverted = RotationConfig {
            pitch_min: 0.5,
            pitch_max: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            RotationController::new(inverted),
            Err(ConfigError::InvalidPitchRange { .. })
        ));

        let negative = RotationConfig {
            turn_step: -0.1,
            ..Default::default()
        };
        assert_eq!(
            RotationController::new(negative).err(),
            Some(ConfigError::InvalidRotationStep(-0.1))
        );

        let past_vertical = RotationConfig {
            pitch_max: 2.0,
            ..Default::default()
        };
        assert_eq!(
            RotationController::new(past_vertical).err(),
            Some(ConfigError::InvalidPitchRange {
                min: -FRAC_PI_4,
                max: 2.0
            })
        );

        let straight_down = RotationConfig {
            pitch_min: -FRAC_PI_2,
            ..Default::default()
        };
        assert!(RotationController::new(straight_down).is_err());

        let not_a_number = RotationConfig {
            pitch_max: f32::NAN,
            ..Default::default()
        };
        assert!(RotationController::new(not_a_number).is_err());
    }

    #[test]
    fn test_look_up_never_tilts_target_down() {
        let controller = RotationController::new(RotationConfig {
            pitch_min: -1.5,
            pitch_max: 1.5,
            ..Default::default()
        })
        .unwrap();
        let camera = crate::camera::CameraController::default();
        let mut rotation = Rotation::default();
        let up = ControlState::with(InputAction::LookUp);

        let mut last = camera.look_target(glam::Vec3::ZERO, &rotation).y;
        for _ in 0..100 {
            controller.apply(&mut rotation, &up);
            let height = camera.look_target(glam::Vec3::ZERO, &rotation).y;
            assert!(height >= last);
            last = height;
        }
    }
}
