//! Boolean overlap test between a candidate volume and the scene's obstacles

use rapier3d::parry::bounding_volume::{Aabb, BoundingVolume};

use crate::bounds::Obstacle;

/// Returns true if `candidate` overlaps the bounding volume of any obstacle.
///
/// Touching faces count as overlap. Obstacles without a volume are skipped,
/// so an empty (or not yet loaded) obstacle set never blocks.
pub fn intersects<O: Obstacle>(candidate: &Aabb, obstacles: &[O]) -> bool {
    obstacles
        .iter()
        .filter_map(Obstacle::bounding_volume)
        .any(|bounds| candidate.intersects(&bounds))
}

/// Index of the first obstacle overlapping `candidate`, if any
pub fn first_hit<O: Obstacle>(candidate: &Aabb, obstacles: &[O]) -> Option<usize> {
    obstacles.iter().position(|obstacle| {
        obstacle
            .bounding_volume()
            .is_some_and(|bounds| candidate.intersects(&bounds))
    })
}
