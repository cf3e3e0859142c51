//! Player character: keyboard movement gated by collision, plus look control

use glam::Vec3;
use plaza_core::{ConfigError, SceneNode, Transform};
use plaza_physics::{
    first_hit, Aabb, CharacterCollider, CharacterColliderConfig, Obstacle, WorldBounds,
    DEFAULT_WORLD_HALF_EXTENT,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::camera::{Camera, CameraConfig, CameraController};
use crate::input::{ControlState, InputBindings, InputSource, InputSubscription, SharedInput};
use crate::rotation::{Rotation, RotationConfig, RotationController};

use super::MovementConfig;

/// Tunables of a character
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Half extent of the playable area
    pub world_half_extent: f32,
    pub movement: MovementConfig,
    pub rotation: RotationConfig,
    pub camera: CameraConfig,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            world_half_extent: DEFAULT_WORLD_HALF_EXTENT,
            movement: MovementConfig::default(),
            rotation: RotationConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

/// What happened to the character's position during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// No movement key held
    Idle,
    /// The move passed the collision test and was committed
    Moved { displacement: Vec3 },
    /// The candidate position overlapped the obstacle at this index
    Blocked { obstacle: usize },
    /// No render node or collider yet, nothing can move
    Unavailable,
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// The player-controlled character.
///
/// Built from independently injected parts: a collider, a starting
/// [`Rotation`] and the shared input tracker. The render node is created by
/// [`Character::spawn`] (or handed over with [`Character::with_node`]); until
/// then every frame operation is a no-op.
pub struct Character {
    movement: MovementConfig,
    rotation_controller: RotationController,
    camera_controller: CameraController,
    bounds: WorldBounds,
    bindings: InputBindings,
    input: SharedInput,
    subscription: Option<InputSubscription>,
    rotation: Rotation,
    position: Vec3,
    velocity: Vec3,
    node: Option<SceneNode>,
    collider: CharacterCollider,
}

impl Character {
    /// Create a character from its configuration and collaborators
    pub fn new(
        config: &CharacterConfig,
        collider: CharacterCollider,
        rotation: Rotation,
        input: SharedInput,
    ) -> Result<Self, ConfigError> {
        config.movement.validate()?;
        let rotation_controller = RotationController::new(config.rotation.clone())?;
        let rotation = Rotation::new(rotation.yaw, rotation_controller.clamp_pitch(rotation.pitch));

        Ok(Self {
            movement: config.movement.clone(),
            rotation_controller,
            camera_controller: CameraController::new(config.camera.clone())?,
            bounds: WorldBounds::new(config.world_half_extent)?,
            bindings: InputBindings::default(),
            input,
            subscription: None,
            rotation,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            node: None,
            collider,
        })
    }

    /// Create a character with default collider and facing
    pub fn with_defaults(config: &CharacterConfig, input: SharedInput) -> Result<Self, ConfigError> {
        let collider = CharacterCollider::new(&CharacterColliderConfig::default())?;
        Self::new(config, collider, Rotation::default(), input)
    }

    /// Replace the key bindings
    pub fn with_bindings(mut self, bindings: InputBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Take ownership of an existing render node and place the character on it
    pub fn with_node(mut self, node: SceneNode) -> Self {
        self.install_node(node);
        self
    }

    /// Create the render node at `position`
    pub fn spawn(&mut self, position: Vec3) {
        let node = SceneNode::new(Transform::from_position_rotation(
            position,
            self.rotation.body_rotation(),
        ));
        self.install_node(node);
    }

    fn install_node(&mut self, mut node: SceneNode) {
        node.set_rotation(self.rotation.body_rotation());
        node.update_world_matrix();
        self.position = node.transform.position;
        self.velocity = Vec3::ZERO;
        self.collider.sync_to_node(&node);
        self.node = Some(node);
    }

    /// Subscribe to key events. Attaching twice keeps the first subscription.
    pub fn attach(&mut self, source: &InputSource) -> bool {
        if self.subscription.is_some() {
            return false;
        }
        self.subscription = Some(source.subscribe(&self.input));
        info!("Character attached to input");
        true
    }

    /// Unsubscribe from key events. Detaching an unattached character does nothing.
    pub fn detach(&mut self) -> bool {
        let Some(subscription) = self.subscription.take() else {
            return false;
        };
        drop(subscription);
        // Keys held at detach time would otherwise stay down forever
        self.input.borrow_mut().release_all();
        info!("Character detached from input");
        true
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Advance one frame: read input once, rotate, then move
    pub fn update<O: Obstacle>(&mut self, obstacles: &[O], dt: f32) -> MoveOutcome {
        let controls = self.input.borrow().controls(&self.bindings);
        self.rotate(&controls);
        self.move_character(&controls, obstacles, dt)
    }

    /// Apply one frame of turn/look keys
    pub fn rotate(&mut self, controls: &ControlState) {
        self.rotation_controller.apply(&mut self.rotation, controls);
    }

    /// Move for one frame, committing only if the candidate position is free.
    ///
    /// The render node's world matrix is refreshed whether or not the move is
    /// committed, and the collider is re-derived from it.
    pub fn move_character<O: Obstacle>(
        &mut self,
        controls: &ControlState,
        obstacles: &[O],
        dt: f32,
    ) -> MoveOutcome {
        let Some(node) = self.node.as_mut() else {
            self.velocity = Vec3::ZERO;
            return MoveOutcome::Unavailable;
        };

        let facing = self.rotation.body_rotation();
        node.set_rotation(facing);

        let local = self.movement.local_direction(controls);
        let outcome = if local == Vec3::ZERO || !dt.is_finite() || dt <= 0.0 {
            MoveOutcome::Idle
        } else if self.collider.bounds().is_none() {
            MoveOutcome::Unavailable
        } else {
            let displacement = facing * local * self.movement.walk_speed * dt;
            let candidate = self.position + displacement;
            let candidate_bounds = self
                .collider
                .bounds_at(&node.transform.with_position(candidate));

            match first_hit(&candidate_bounds, obstacles) {
                Some(obstacle) => {
                    debug!(?candidate, obstacle, "Move blocked");
                    MoveOutcome::Blocked { obstacle }
                }
                None => {
                    self.position = candidate;
                    node.set_position(candidate);
                    MoveOutcome::Moved { displacement }
                }
            }
        };

        node.update_world_matrix();
        self.collider.sync_to_node(node);

        self.velocity = match outcome {
            MoveOutcome::Moved { displacement } => displacement / dt,
            _ => Vec3::ZERO,
        };
        outcome
    }

    /// Place the follow camera for this frame
    pub fn update_camera(&self, camera: &mut Camera) {
        if self.node.is_none() {
            return;
        }
        self.camera_controller
            .update(camera, self.position, &self.rotation);
    }

    /// Face the default direction and level the view
    pub fn reset_camera_view(&mut self) {
        self.rotation.reset();
        if let Some(node) = self.node.as_mut() {
            node.set_rotation(self.rotation.body_rotation());
            node.update_world_matrix();
            self.collider.sync_to_node(node);
        }
        info!("Camera view reset");
    }

    /// Move the character without a collision test
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        if let Some(node) = self.node.as_mut() {
            node.set_position(position);
            node.update_world_matrix();
            self.collider.sync_to_node(node);
        }
    }

    /// Whether the character stands outside the playable area
    pub fn is_out_of_bounds(&self) -> bool {
        self.bounds.is_out_of_bounds(self.position)
    }

    /// Get the character's current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Velocity of the last committed move (zero if it did not move)
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.rotation.pitch
    }

    /// Direction the body faces
    pub fn forward(&self) -> Vec3 {
        self.rotation.body_rotation() * -Vec3::Z
    }

    pub fn node(&self) -> Option<&SceneNode> {
        self.node.as_ref()
    }

    /// Collider bounds as of the last frame
    pub fn collider_bounds(&self) -> Option<Aabb> {
        self.collider.bounds()
    }

    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }
}

impl Drop for Character {
    fn drop(&mut self) {
        self.detach();
    }
}
