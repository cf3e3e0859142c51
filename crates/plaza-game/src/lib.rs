//! Plaza Game - Character control and proximity interactions
//!
//! Provides keyboard input tracking, the player character with collision
//! gated movement, the follow camera, and announcement zones.

pub mod camera;
pub mod input;
pub mod interaction;
pub mod player;
pub mod rotation;
pub mod session;

pub use camera::{Camera, CameraConfig, CameraController};
pub use input::{
    ControlState, InputAction, InputBindings, InputSource, InputSubscription, InputTracker,
    ListenerId, SharedInput,
};
pub use interaction::{
    check_interactions, Announcement, InteractableZone, InteractionEvent, LogMessaging, Messaging,
    ProximityInteractionManager, ZoneKind, ZoneRegistry, ZoneState,
};
pub use player::{Character, CharacterConfig, MoveOutcome, MovementConfig};
pub use rotation::{Rotation, RotationConfig, RotationController};
pub use session::{FrameReport, WorldSession};
