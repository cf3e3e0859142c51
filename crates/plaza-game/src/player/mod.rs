//! Player character module
//!
//! Keyboard movement relative to the character's facing, gated by collision.

mod controller;
mod movement;

pub use controller::{Character, CharacterConfig, MoveOutcome};
pub use movement::MovementConfig;
