//! Camera system module
//!
//! Provides the third-person follow camera driven by the character's facing.

mod config;
mod controller;

pub use config::CameraConfig;
pub use controller::{Camera, CameraController};
