//! Box collider carried by the player character

use glam::Vec3;
use plaza_core::{ConfigError, SceneNode, Transform};
use rapier3d::parry::bounding_volume::Aabb;
use serde::{Deserialize, Serialize};

use crate::bounds::{cuboid_bounds, validate_half_extents};

/// Character collider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterColliderConfig {
    /// Half width (X), half height (Y) and half depth (Z) of the body box
    pub half_extents: Vec3,
}

impl Default for CharacterColliderConfig {
    fn default() -> Self {
        Self {
            half_extents: Vec3::new(0.4, 0.9, 0.4),
        }
    }
}

/// Collider of the character: a box following the character's render node.
///
/// The collider caches the bounds of the node's last world transform. Until
/// it is first synced there are no bounds, and callers treat that as
/// "cannot move".
#[derive(Debug, Clone)]
pub struct CharacterCollider {
    half_extents: Vec3,
    bounds: Option<Aabb>,
}

impl CharacterCollider {
    /// Create a collider from its configuration
    pub fn new(config: &CharacterColliderConfig) -> Result<Self, ConfigError> {
        validate_half_extents(config.half_extents)?;
        Ok(Self {
            half_extents: config.half_extents,
            bounds: None,
        })
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Bounds the collider would occupy at `transform`, without committing
    pub fn bounds_at(&self, transform: &Transform) -> Aabb {
        cuboid_bounds(self.half_extents, transform)
    }

    /// Recompute the committed bounds from a node's world transform
    pub fn sync_to_node(&mut self, node: &SceneNode) {
        self.bounds = Some(self.bounds_at(&node.world_transform()));
    }

    /// Committed bounds, if the collider has been placed yet
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }
}
