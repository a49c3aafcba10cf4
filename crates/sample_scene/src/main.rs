//! Sample scene
//!
//! A floor, a cow spawner and a nesting script run headless for a fixed
//! number of ticks. Input is replayed from a prepared sequence and the
//! renderer only logs.
//!
//! Usage: `sample_scene [config.toml|config.ron]`

mod renderer;
mod scripts;

use scene_runtime::foundation::logging;
use scene_runtime::prelude::*;

use renderer::LoggingRenderer;
use scripts::{CowSpawner, Nester};

const TICKS: usize = 300;
const TICK_SECONDS: f32 = 1.0 / 30.0;

/// Assets the scene refers to, served from memory
fn sample_assets() -> MemoryLoader {
    MemoryLoader::new()
        .with_mesh("floor", b"floor".to_vec())
        .with_mesh("cow1", b"cow1".to_vec())
        .with_mesh("monkey", b"monkey".to_vec())
        .with_texture("tex1.png", b"tex1".to_vec())
}

/// Taps `key` for a few ticks twice during the run
fn sample_input(key: KeyCode) -> ScriptedInput {
    let samples = (0..TICKS).map(|tick| {
        if (120..125).contains(&tick) || (200..203).contains(&tick) {
            InputSample::new().with_key(key)
        } else {
            InputSample::new()
        }
    });
    ScriptedInput::new(samples)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_scene.toml".to_string());
    let config = RuntimeConfig::load_or_default(&config_path)?;
    logging::init_with_filter(&config.logging.filter);

    log::info!("Initializing world");
    let toggle_key: KeyCode = "A".parse()?;

    let mut scheduler = FrameScheduler::new(sample_assets())
        .with_config(config)
        .with_clock(FixedStepClock::new(TICK_SECONDS))
        .with_input(sample_input(toggle_key))
        .with_renderer(LoggingRenderer::new(30));
    scheduler
        .resources()
        .preload(&["floor", "cow1", "monkey"], &["tex1.png"])?;

    let mut commands = scheduler.commands();
    commands.create_entity(
        EntityConfig::new("floor")
            .with_mesh("floor")
            .with_position(Vec3::new(-20.0, -2.0, 20.0))
            .with_uniform_scale(10.0),
    )?;
    let spawner_position = Vec3::new(10.0, 20.0, 30.0);
    let spawner = CowSpawner::new(toggle_key).with_camera_anchor(Vec3::new(0.0, 2.0, 15.0));
    commands.create_entity(
        EntityConfig::new("heheszko")
            .with_position(spawner_position)
            .with_script(spawner),
    )?;
    commands.create_entity(EntityConfig::new("nester").with_script(Nester::new(toggle_key)))?;

    let setup = scheduler.flush();
    log::info!(
        "Scene ready: {} entities, spawner at {:?}",
        setup.created.len(),
        spawner_position
    );

    let mut failures = 0;
    for report in scheduler.run_ticks(TICKS) {
        failures += report.scripts.failures.len();
        for failure in &report.commit.failures {
            log::debug!("Frame {}: {}", report.time.frame, failure);
        }
    }

    log::info!(
        "Finished after {} ticks ({:.1}s): {} entities, {} cows, {} script failures",
        scheduler.ticks(),
        scheduler.time().elapsed,
        scheduler.scene().len(),
        scheduler.scene().find_by_name("heh2").len(),
        failures
    );
    Ok(())
}
