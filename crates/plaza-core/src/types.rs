//! Core types shared by the plaza crates

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Identifier for an interactable zone, unique within one registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(pub u64);

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "zone#{}", self.0)
    }
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Same transform moved to another position
    pub fn with_position(self, position: Vec3) -> Self {
        Self { position, ..self }
    }

    /// Compute the model matrix for this transform
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Decompose a world matrix back into a transform
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}

/// A node of the render scene owned by a single entity.
///
/// The renderer reads `world_matrix`; gameplay code mutates `transform` and
/// calls [`SceneNode::update_world_matrix`] once per frame so that anything
/// derived from the world transform (colliders, camera targets) stays in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Local transform (nodes are parented to the scene root)
    pub transform: Transform,
    world_matrix: Mat4,
    dirty: bool,
}

impl SceneNode {
    /// Create a node whose world matrix already reflects `transform`
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            world_matrix: transform.matrix(),
            dirty: false,
        }
    }

    /// Create a node at the given position
    pub fn at(position: Vec3) -> Self {
        Self::new(Transform::from_position(position))
    }

    /// Move the node. The world matrix is refreshed on the next update.
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.dirty = true;
    }

    /// Rotate the node. The world matrix is refreshed on the next update.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
        self.dirty = true;
    }

    /// Whether the transform changed since the last matrix refresh
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recompute the world matrix from the local transform
    pub fn update_world_matrix(&mut self) {
        self.world_matrix = self.transform.matrix();
        self.dirty = false;
    }

    /// World matrix as of the last refresh
    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    /// World transform as of the last refresh
    pub fn world_transform(&self) -> Transform {
        Transform::from_matrix(&self.world_matrix)
    }
}

impl Default for SceneNode {
    fn default() -> Self {
        Self::new(Transform::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_matrix() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let matrix = transform.matrix();
        let translation = matrix.col(3).truncate();
        assert_eq!(translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_forward_follows_rotation() {
        let transform =
            Transform::from_position_rotation(Vec3::ZERO, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        // A quarter turn to the left faces -X
        assert!((transform.forward() - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_scene_node_matrix_lags_until_refresh() {
        let mut node = SceneNode::at(Vec3::ZERO);
        node.set_position(Vec3::new(4.0, 0.0, 0.0));
        assert!(node.is_dirty());
        assert_eq!(node.world_transform().position, Vec3::ZERO);

        node.update_world_matrix();
        assert!(!node.is_dirty());
        assert!((node.world_transform().position - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_zone_id_display() {
        assert_eq!(ZoneId(7).to_string(), "zone#7");
    }
}
