//! Plaza Core - Core types and utilities for the plaza world
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Mathematical primitives (re-exported from glam)
//! - Transform and scene node types for entity positioning
//! - The shared configuration error type

pub mod error;
pub mod types;

pub use error::ConfigError;
pub use glam::{Mat4, Quat, Vec3};
pub use types::{SceneNode, Transform, ZoneId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn math_reexports_cover_the_transform_api() {
        let transform = Transform::from_position_rotation(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY);
        let matrix: Mat4 = transform.matrix();
        assert_eq!(matrix.col(3).truncate(), Vec3::new(1.0, 0.0, 0.0));
    }
}
