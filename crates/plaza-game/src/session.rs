//! One running world: character, obstacles, zones and the follow camera,
//! advanced in a fixed order once per rendered frame.

use plaza_physics::Obstacle;
use tracing::{info, warn};

use crate::camera::Camera;
use crate::input::InputSource;
use crate::interaction::{InteractionEvent, Messaging, ProximityInteractionManager};
use crate::player::{Character, MoveOutcome};

/// Summary of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frame number, starting at 1
    pub frame: u64,
    pub movement: MoveOutcome,
    pub interaction: Option<InteractionEvent>,
    /// Whether the character ended the frame outside the playable area
    pub out_of_bounds: bool,
}

/// A world session
pub struct WorldSession<M: Messaging> {
    character: Character,
    interactions: ProximityInteractionManager<M>,
    obstacles: Vec<Box<dyn Obstacle>>,
    camera: Camera,
    input: InputSource,
    was_out_of_bounds: bool,
    frame: u64,
}

impl<M: Messaging> WorldSession<M> {
    pub fn new(
        character: Character,
        interactions: ProximityInteractionManager<M>,
        input: InputSource,
    ) -> Self {
        Self {
            character,
            interactions,
            obstacles: Vec::new(),
            camera: Camera::default(),
            input,
            was_out_of_bounds: false,
            frame: 0,
        }
    }

    /// Add a static obstacle to the scene
    pub fn add_obstacle(&mut self, obstacle: impl Obstacle + 'static) {
        self.obstacles.push(Box::new(obstacle));
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Start listening to the keyboard
    pub fn attach(&mut self) -> bool {
        let attached = self.character.attach(&self.input);
        if attached {
            info!(
                obstacles = self.obstacles.len(),
                zones = self.interactions.registry().len(),
                "World session attached"
            );
        }
        attached
    }

    /// Stop listening to the keyboard and close any open announcement
    pub fn detach(&mut self) {
        self.character.detach();
        self.interactions.end_all();
    }

    /// Advance one frame: rotation and movement, camera, then interactions
    pub fn frame(&mut self, dt: f32) -> FrameReport {
        self.frame += 1;

        let movement = self.character.update(&self.obstacles, dt);
        self.character.update_camera(&mut self.camera);

        let interaction = if self.character.node().is_some() {
            self.interactions.update(self.character.position())
        } else {
            None
        };

        let out_of_bounds = self.character.is_out_of_bounds();
        if out_of_bounds && !self.was_out_of_bounds {
            warn!(position = ?self.character.position(), "Character left the playable area");
        }
        self.was_out_of_bounds = out_of_bounds;

        FrameReport {
            frame: self.frame,
            movement,
            interaction,
            out_of_bounds,
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn interactions(&self) -> &ProximityInteractionManager<M> {
        &self.interactions
    }

    pub fn interactions_mut(&mut self) -> &mut ProximityInteractionManager<M> {
        &mut self.interactions
    }

    /// The keyboard event stream feeding this session
    pub fn input(&self) -> &InputSource {
        &self.input
    }
}

impl<M: Messaging> Drop for WorldSession<M> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputTracker;
    use crate::interaction::{InteractableZone, LogMessaging};
    use crate::player::CharacterConfig;
    use glam::Vec3;
    use plaza_physics::BoxObstacle;
    use winit::keyboard::KeyCode;

    const DT: f32 = 1.0 / 60.0;

    fn session() -> WorldSession<LogMessaging> {
        let mut character =
            Character::with_defaults(&CharacterConfig::default(), InputTracker::shared()).unwrap();
        character.spawn(Vec3::ZERO);
        WorldSession::new(
            character,
            ProximityInteractionManager::new(LogMessaging::new()),
            InputSource::new(),
        )
    }

    #[test]
    fn test_walk_into_announcement() {
        let mut session = session();
        let board = session
            .interactions_mut()
            .add_zone(InteractableZone::board(Vec3::new(0.0, 0.0, -5.0), "Notice", "Hello"));
        session.attach();
        session.input().key_down(KeyCode::KeyW);

        let mut started = None;
        for _ in 0..60 {
            let report = session.frame(DT);
            assert!(report.movement.is_moved());
            if let Some(event) = report.interaction {
                started = Some((event, report.frame));
                break;
            }
        }

        let (event, frame) = started.unwrap();
        assert_eq!(event, InteractionEvent::Started(board));
        // 6 units/s: the 3 unit radius around z = -5 is entered after 2 units
        assert!(frame > 15 && frame < 25);
        assert_eq!(session.interactions().messaging().visible(), Some("Notice\n\nHello"));

        // The camera trails the character
        assert!(session.camera().position.z > session.character().position().z);
    }

    #[test]
    fn test_obstacle_stops_the_walk() {
        let mut session = session();
        session.add_obstacle(
            BoxObstacle::axis_aligned(Vec3::new(0.0, 0.0, -2.0), Vec3::new(2.0, 2.0, 0.5)).unwrap(),
        );
        session.attach();
        session.input().key_down(KeyCode::KeyW);

        let mut blocked = false;
        for _ in 0..120 {
            if matches!(session.frame(DT).movement, MoveOutcome::Blocked { .. }) {
                blocked = true;
            }
        }
        assert!(blocked);
        // The body box (half depth 0.4) never crosses the wall face at z = -1.5
        assert!(session.character().position().z > -1.1);
    }

    #[test]
    fn test_detached_session_ignores_keys() {
        let mut session = session();
        session.attach();
        session.detach();
        assert_eq!(session.input().listener_count(), 0);

        session.input().key_down(KeyCode::KeyW);
        assert_eq!(session.frame(DT).movement, MoveOutcome::Idle);
    }

    #[test]
    fn test_detach_ends_active_interaction() {
        let mut session = session();
        session
            .interactions_mut()
            .add_zone(InteractableZone::board(Vec3::ZERO, "Notice", "Hello"));
        session.attach();
        session.frame(DT);
        assert!(session.interactions().active().is_some());

        session.detach();
        assert!(session.interactions().active().is_none());
        assert_eq!(session.interactions().messaging().visible(), None);
    }

    #[test]
    fn test_out_of_bounds_reported() {
        let mut session = session();
        session.character_mut().teleport(Vec3::new(30.0, 0.0, 0.0));
        assert!(session.frame(DT).out_of_bounds);

        session.character_mut().teleport(Vec3::new(10.0, 0.0, 0.0));
        assert!(!session.frame(DT).out_of_bounds);
    }

    #[test]
    fn test_reattach_keeps_two_listeners() {
        let mut session = session();
        for _ in 0..3 {
            session.attach();
            session.attach();
            assert_eq!(session.input().listener_count(), 2);
            session.detach();
            assert_eq!(session.input().listener_count(), 0);
        }
        session.attach();
        assert_eq!(session.input().listener_count(), 2);
    }
}
