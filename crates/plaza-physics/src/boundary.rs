//! Playable world extent

use glam::Vec3;
use plaza_core::ConfigError;

/// Default half extent of the playable area, in world units
pub const DEFAULT_WORLD_HALF_EXTENT: f32 = 25.0;

/// Cube-shaped playable area centered on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    half_extent: f32,
}

impl WorldBounds {
    /// Create bounds with the given half extent
    pub fn new(half_extent: f32) -> Result<Self, ConfigError> {
        if !half_extent.is_finite() || half_extent <= 0.0 {
            return Err(ConfigError::InvalidHalfExtent(half_extent));
        }
        Ok(Self { half_extent })
    }

    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }

    /// True if any coordinate of `position` lies beyond the half extent
    pub fn is_out_of_bounds(&self, position: Vec3) -> bool {
        is_out_of_bounds(position, self.half_extent)
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            half_extent: DEFAULT_WORLD_HALF_EXTENT,
        }
    }
}

/// True if any coordinate magnitude of `position` exceeds `half_extent`
pub fn is_out_of_bounds(position: Vec3, half_extent: f32) -> bool {
    position.abs().max_element() > half_extent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_on_x() {
        let bounds = WorldBounds::new(25.0).unwrap();
        assert!(bounds.is_out_of_bounds(Vec3::new(30.0, 0.0, 0.0)));
        assert!(!bounds.is_out_of_bounds(Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_negative_coordinates_use_magnitude() {
        let bounds = WorldBounds::default();
        assert!(bounds.is_out_of_bounds(Vec3::new(0.0, 0.0, -25.5)));
        assert!(!bounds.is_out_of_bounds(Vec3::new(-24.0, 3.0, 24.9)));
    }

    #[test]
    fn test_edge_is_inside() {
        assert!(!is_out_of_bounds(Vec3::new(25.0, 0.0, 0.0), 25.0));
    }

    #[test]
    fn test_rejects_non_positive_extent() {
        assert_eq!(WorldBounds::new(0.0), Err(ConfigError::InvalidHalfExtent(0.0)));
        assert!(WorldBounds::new(f32::NAN).is_err());
    }
}
