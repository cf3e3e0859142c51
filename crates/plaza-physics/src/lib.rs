//! Plaza Physics - Collision gating built on rapier3d's geometry
//!
//! Provides bounding volumes, the obstacle abstraction, the character's box
//! collider and the playable world extent. There is no simulation step here:
//! collisions only accept or reject a tentative move.

mod boundary;
mod bounds;
mod character_controller;
mod collision;

pub use boundary::{is_out_of_bounds, WorldBounds, DEFAULT_WORLD_HALF_EXTENT};
pub use bounds::{aabb_center, aabb_from_center, to_isometry, BoxObstacle, Obstacle};
pub use character_controller::{CharacterCollider, CharacterColliderConfig};
pub use collision::{first_hit, intersects};

pub use rapier3d::parry::bounding_volume::Aabb;
