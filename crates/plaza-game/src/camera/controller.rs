//! Third-person follow camera

use glam::{Mat4, Quat, Vec3};
use plaza_core::ConfigError;

use crate::rotation::Rotation;

use super::CameraConfig;

/// The scene camera as seen by the controller: a position and a look target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Orientation derived from position and target
    pub rotation: Quat,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Camera {
    /// Point the camera at `target`. A target on top of the camera keeps the
    /// previous orientation.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        if (target - self.position).length_squared() <= f32::EPSILON {
            return;
        }
        let world = Mat4::look_at_rh(self.position, target, Vec3::Y).inverse();
        self.rotation = Quat::from_mat4(&world).normalize();
    }

    /// Get the camera's forward direction
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }
}

/// Places a [`Camera`] behind and above the character every frame.
///
/// There is no smoothing: the camera is a pure function of the character's
/// position and rotation.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Configuration
    config: CameraConfig,
}

impl CameraController {
    /// Create a camera controller with custom config
    pub fn new(config: CameraConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Camera position for a character at `anchor` facing `rotation`
    pub fn follow_position(&self, anchor: Vec3, rotation: &Rotation) -> Vec3 {
        let offset = Vec3::new(0.0, self.config.follow_height, self.config.follow_distance);
        anchor + rotation.body_rotation() * offset
    }

    /// Look target for a character at `anchor`; pitch raises or lowers it
    pub fn look_target(&self, anchor: Vec3, rotation: &Rotation) -> Vec3 {
        let tilt = self.config.follow_distance * rotation.pitch.tan();
        anchor + Vec3::Y * (self.config.look_height + tilt)
    }

    /// Reposition `camera` for this frame
    pub fn update(&self, camera: &mut Camera, anchor: Vec3, rotation: &Rotation) {
        camera.position = self.follow_position(anchor, rotation);
        camera.look_at(self.look_target(anchor, rotation));
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            config: CameraConfig::default(),
        }
    }
}
