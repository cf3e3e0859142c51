//! Headless plaza scene and a scripted keyboard walkthrough

use anyhow::Result;
use glam::{Quat, Vec3};
use plaza_core::{SceneNode, Transform};
use plaza_game::{
    Character, InputSource, InputTracker, InteractableZone, InteractionEvent, LogMessaging,
    MoveOutcome, ProximityInteractionManager, Rotation, WorldSession,
};
use plaza_physics::{BoxObstacle, CharacterCollider};
use tracing::{debug, info};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::settings::{GameSettings, WalkthroughSettings};

/// A scripted input event
#[derive(Debug, Clone, Copy)]
enum Cue {
    Press(KeyCode),
    Release(KeyCode),
    ResetCamera,
}

/// Frame-stamped cues, sorted by frame
const SCRIPT: &[(u32, Cue)] = &[
    // Up the main path, past the notice board, until the fountain stops us
    (0, Cue::Press(KeyCode::KeyW)),
    (140, Cue::Release(KeyCode::KeyW)),
    // Step back off the fountain before turning
    (140, Cue::Press(KeyCode::KeyS)),
    (145, Cue::Release(KeyCode::KeyS)),
    // A little more than a quarter turn to the right, so the walk drifts
    // away from the fountain
    (145, Cue::Press(KeyCode::ArrowRight)),
    (198, Cue::Release(KeyCode::ArrowRight)),
    // Over to the townsfolk
    (198, Cue::Press(KeyCode::KeyW)),
    (260, Cue::Press(KeyCode::ArrowUp)),
    (280, Cue::Release(KeyCode::ArrowUp)),
    // Facing back up the plaza, keep walking until past its edge
    (300, Cue::ResetCamera),
    (480, Cue::Release(KeyCode::KeyW)),
];

/// Build the plaza: a notice board, one NPC, a fountain and a couple of benches
pub fn build_session(settings: &GameSettings) -> Result<WorldSession<LogMessaging>> {
    let collider = CharacterCollider::new(&settings.collider)?;
    let mut character = Character::new(
        &settings.controls,
        collider,
        Rotation::default(),
        InputTracker::shared(),
    )?;
    character.spawn(Vec3::ZERO);

    let mut interactions = ProximityInteractionManager::new(LogMessaging::new());
    interactions.add_zone(InteractableZone::board(
        Vec3::new(0.0, 0.0, -8.0),
        "Town Notice",
        "The market opens at dawn. Mind the fountain.",
    ));
    interactions.add_zone(
        InteractableZone::npc(
            Vec3::new(6.0, 0.0, -12.0),
            "Mara",
            "Townsfolk",
            "Welcome to the plaza, traveller!",
        )
        .with_ranges(2.5, 3.5)?,
    );

    let mut session = WorldSession::new(character, interactions, InputSource::new());

    // Fountain
    session.add_obstacle(BoxObstacle::axis_aligned(
        Vec3::new(0.0, 0.5, -14.0),
        Vec3::new(1.5, 1.0, 1.5),
    )?);

    // Benches, one of them turned towards the fountain
    session.add_obstacle(BoxObstacle::axis_aligned(
        Vec3::new(-4.0, 0.25, -6.0),
        Vec3::new(1.0, 0.25, 0.4),
    )?);
    session.add_obstacle(BoxObstacle::new(
        SceneNode::new(Transform::from_position_rotation(
            Vec3::new(-4.0, 0.25, -18.0),
            Quat::from_rotation_y(0.6),
        )),
        Vec3::new(1.0, 0.25, 0.4),
    )?);

    Ok(session)
}

/// Summary of a finished walkthrough
#[derive(Debug, Default, Clone, Copy)]
pub struct WalkthroughSummary {
    pub frames: u32,
    pub moved_frames: u32,
    pub blocked_frames: u32,
    pub interactions_started: u32,
    pub out_of_bounds_frames: u32,
}

/// Replay the script against `session`
pub fn run(
    session: &mut WorldSession<LogMessaging>,
    settings: &WalkthroughSettings,
) -> WalkthroughSummary {
    let dt = settings.frame_delta();
    let mut summary = WalkthroughSummary::default();
    let mut cues = SCRIPT.iter().peekable();

    session.attach();

    for frame in 0..settings.frames {
        while let Some(&&(at, cue)) = cues.peek() {
            if at > frame {
                break;
            }
            apply_cue(session, cue);
            cues.next();
        }

        let report = session.frame(dt);
        summary.frames += 1;

        match report.movement {
            MoveOutcome::Moved { .. } => summary.moved_frames += 1,
            MoveOutcome::Blocked { obstacle } => {
                summary.blocked_frames += 1;
                debug!(frame = report.frame, obstacle, "Walk blocked");
            }
            MoveOutcome::Idle | MoveOutcome::Unavailable => {}
        }

        match report.interaction {
            Some(InteractionEvent::Started(zone)) => {
                summary.interactions_started += 1;
                info!(frame = report.frame, %zone, "Interaction started");
            }
            Some(InteractionEvent::Ended(zone)) => {
                info!(frame = report.frame, %zone, "Interaction ended");
            }
            None => {}
        }

        if report.out_of_bounds {
            summary.out_of_bounds_frames += 1;
        }
    }

    let position = session.character().position();
    info!(
        x = position.x,
        y = position.y,
        z = position.z,
        yaw = session.character().yaw(),
        "Walkthrough finished"
    );

    session.detach();
    summary
}

fn apply_cue(session: &mut WorldSession<LogMessaging>, cue: Cue) {
    match cue {
        Cue::Press(key) => session
            .input()
            .handle_keyboard(PhysicalKey::Code(key), ElementState::Pressed),
        Cue::Release(key) => session
            .input()
            .handle_keyboard(PhysicalKey::Code(key), ElementState::Released),
        Cue::ResetCamera => session.character_mut().reset_camera_view(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_is_sorted() {
        assert!(SCRIPT.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn scene_builds_from_defaults() {
        let session = build_session(&GameSettings::default()).unwrap();
        assert_eq!(session.obstacle_count(), 3);
        assert_eq!(session.interactions().registry().len(), 2);
        assert!(session.character().node().is_some());
    }

    #[test]
    fn walkthrough_visits_both_zones() {
        let mut session = build_session(&GameSettings::default()).unwrap();
        let summary = run(&mut session, &WalkthroughSettings::default());

        assert_eq!(summary.frames, 600);
        assert_eq!(summary.interactions_started, 2);
        assert!(summary.blocked_frames > 0);
        assert!(summary.out_of_bounds_frames > 0);

        // Detached at the end: no listeners, nothing on screen
        assert_eq!(session.input().listener_count(), 0);
        assert!(session.interactions().active().is_none());
    }

    #[test]
    fn fountain_holds_the_character_back() {
        let mut session = build_session(&GameSettings::default()).unwrap();
        let settings = WalkthroughSettings {
            frames: 140,
            ..Default::default()
        };
        run(&mut session, &settings);

        // Fountain face at z = -12.5, body half depth 0.4
        let z = session.character().position().z;
        assert!(z > -12.1 && z < -11.9, "z = {z}");
    }
}
