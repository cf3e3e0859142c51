//! Plaza - a walkable 3D plaza with announcement boards and townsfolk
//!
//! Runs the character controller headless: settings are loaded, the plaza
//! scene is built and a scripted keyboard walkthrough is replayed through it.

mod settings;
mod walkthrough;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use settings::GameSettings;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting plaza...");

    let settings = GameSettings::load();

    let mut session =
        walkthrough::build_session(&settings).context("Failed to build the plaza scene")?;
    info!(
        obstacles = session.obstacle_count(),
        zones = session.interactions().registry().len(),
        "Plaza ready"
    );

    let summary = walkthrough::run(&mut session, &settings.walkthrough);
    info!(
        frames = summary.frames,
        moved = summary.moved_frames,
        blocked = summary.blocked_frames,
        interactions = summary.interactions_started,
        out_of_bounds = summary.out_of_bounds_frames,
        "Walkthrough summary"
    );

    if settings.walkthrough.save_settings {
        if let Err(e) = settings.save() {
            warn!("Failed to save settings: {}", e);
        }
    }

    info!("Plaza shut down");
    Ok(())
}
