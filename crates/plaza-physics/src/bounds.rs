//! Bounding volumes and the obstacle abstraction
//!
//! Everything here is expressed in terms of parry's [`Aabb`] so that the
//! overlap math is the same one rapier uses for its broad phase.

use glam::Vec3;
use nalgebra::{Quaternion, Translation3, UnitQuaternion};
use plaza_core::{ConfigError, SceneNode, Transform};
use rapier3d::math::{Isometry, Point, Real, Vector};
use rapier3d::parry::bounding_volume::Aabb;
use rapier3d::parry::shape::Cuboid;

/// Convert a transform into a rapier isometry (scale is dropped)
pub fn to_isometry(transform: &Transform) -> Isometry<Real> {
    let p = transform.position;
    let q = transform.rotation;
    Isometry::from_parts(
        Translation3::new(p.x, p.y, p.z),
        UnitQuaternion::new_normalize(Quaternion::new(q.w, q.x, q.y, q.z)),
    )
}

/// Build an axis-aligned box from its center and half extents
pub fn aabb_from_center(center: Vec3, half_extents: Vec3) -> Aabb {
    Aabb::from_half_extents(
        Point::new(center.x, center.y, center.z),
        Vector::new(half_extents.x, half_extents.y, half_extents.z),
    )
}

/// Center of an axis-aligned box
pub fn aabb_center(aabb: &Aabb) -> Vec3 {
    let c = aabb.center();
    Vec3::new(c.x, c.y, c.z)
}

/// Check that every half extent is a positive finite number
pub(crate) fn validate_half_extents(half_extents: Vec3) -> Result<(), ConfigError> {
    let valid = half_extents.is_finite() && half_extents.min_element() > 0.0;
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidColliderExtents {
            x: half_extents.x,
            y: half_extents.y,
            z: half_extents.z,
        })
    }
}

/// Box-shaped world bounds of a transform, scaled by the transform's scale
pub(crate) fn cuboid_bounds(half_extents: Vec3, transform: &Transform) -> Aabb {
    let scaled = half_extents * transform.scale.abs();
    let cuboid = Cuboid::new(Vector::new(scaled.x, scaled.y, scaled.z));
    cuboid.aabb(&to_isometry(transform))
}

/// Anything the character can bump into.
///
/// Obstacles belong to the scene; collision code only ever reads them. An
/// obstacle that cannot produce a volume yet (e.g. still loading) returns
/// `None` and is ignored.
pub trait Obstacle {
    fn bounding_volume(&self) -> Option<Aabb>;
}

impl Obstacle for Aabb {
    fn bounding_volume(&self) -> Option<Aabb> {
        Some(*self)
    }
}

impl<T: Obstacle + ?Sized> Obstacle for &T {
    fn bounding_volume(&self) -> Option<Aabb> {
        (**self).bounding_volume()
    }
}

impl<T: Obstacle + ?Sized> Obstacle for Box<T> {
    fn bounding_volume(&self) -> Option<Aabb> {
        (**self).bounding_volume()
    }
}

/// A static scene node with a box-shaped extent (walls, crates, benches)
#[derive(Debug, Clone)]
pub struct BoxObstacle {
    /// The scene node this obstacle is attached to
    pub node: SceneNode,
    /// Half extents of the box in local space
    half_extents: Vec3,
}

impl BoxObstacle {
    /// Create an obstacle for a node with the given half extents
    pub fn new(node: SceneNode, half_extents: Vec3) -> Result<Self, ConfigError> {
        validate_half_extents(half_extents)?;
        Ok(Self { node, half_extents })
    }

    /// Axis-aligned obstacle centered at `center`
    pub fn axis_aligned(center: Vec3, half_extents: Vec3) -> Result<Self, ConfigError> {
        Self::new(SceneNode::at(center), half_extents)
    }

    /// Half extents in local space
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }
}

impl Obstacle for BoxObstacle {
    fn bounding_volume(&self) -> Option<Aabb> {
        Some(cuboid_bounds(self.half_extents, &self.node.world_transform()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_axis_aligned_obstacle_bounds() {
        let obstacle =
            BoxObstacle::axis_aligned(Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0)).unwrap();
        let aabb = obstacle.bounding_volume().unwrap();
        assert!((aabb.mins.x - 1.0).abs() < 1e-5);
        assert!((aabb.maxs.z - 3.0).abs() < 1e-5);
        assert!((aabb_center(&aabb) - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_rotated_obstacle_bounds_grow() {
        let node = SceneNode::new(Transform::from_position_rotation(
            Vec3::ZERO,
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_4),
        ));
        let obstacle = BoxObstacle::new(node, Vec3::new(1.0, 1.0, 1.0)).unwrap();
        let aabb = obstacle.bounding_volume().unwrap();
        // A 45 degree turn widens the footprint to sqrt(2)
        assert!((aabb.maxs.x - std::f32::consts::SQRT_2).abs() < 1e-4);
        assert!((aabb.maxs.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_degenerate_extents() {
        let result = BoxObstacle::axis_aligned(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidColliderExtents { .. })
        ));
    }
}
