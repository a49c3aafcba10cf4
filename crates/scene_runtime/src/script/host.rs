//! Runs every attached script once per tick

use super::{ScriptContext, ScriptError};
use crate::assets::ResourceCache;
use crate::camera::CameraController;
use crate::core::SchedulerConfig;
use crate::foundation::time::FrameTime;
use crate::input::InputState;
use crate::scene::{EntityId, MutationQueue, SceneGraph};

/// Runtime state shared by all scripts for one tick
pub struct FrameContext<'a> {
    /// Shared asset cache
    pub resources: &'a ResourceCache,
    /// Input for this tick
    pub input: &'a InputState,
    /// Timing for this tick
    pub time: FrameTime,
    /// The shared camera
    pub camera: &'a mut CameraController,
    /// Receives every structural request made during the tick
    pub queue: &'a mut MutationQueue,
}

/// A script update that returned an error
#[derive(Debug)]
pub struct ScriptFailure {
    /// Owner of the failing script
    pub entity: EntityId,
    /// Script name
    pub script: String,
    /// What went wrong
    pub error: ScriptError,
}

/// What happened during one pass over the scripts
#[derive(Debug, Default)]
pub struct ScriptTickReport {
    /// Scripts whose update ran
    pub updated: usize,
    /// Updates that failed
    pub failures: Vec<ScriptFailure>,
}

/// Drives script updates
#[derive(Debug, Default)]
pub struct ScriptHost {
    config: SchedulerConfig,
    total_updates: u64,
    total_failures: u64,
}

impl ScriptHost {
    /// Create a host with the given failure logging policy
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            total_updates: 0,
            total_failures: 0,
        }
    }

    /// Run each script attached to a committed entity exactly once, in
    /// creation order of the entities
    ///
    /// The set of scripts is fixed when the pass starts. A failing script is
    /// reported and the pass continues with the next one; whatever the failed
    /// update had queued is discarded.
    pub fn tick(&mut self, scene: &mut SceneGraph, frame: FrameContext<'_>) -> ScriptTickReport {
        let FrameContext {
            resources,
            input,
            time,
            camera,
            queue,
        } = frame;

        let mut report = ScriptTickReport::default();
        let mut logged = 0;

        for entity in scene.scripted_entities() {
            let Some(mut script) = scene.take_script(entity) else {
                continue;
            };

            let mark = queue.len();
            let result = {
                let mut ctx =
                    ScriptContext::new(entity, scene, resources, input, time, camera, queue);
                script.update(&mut ctx)
            };
            report.updated += 1;

            if let Err(error) = result {
                let discarded = queue.truncate(mark);
                scene.withdraw(&discarded);
                if self.config.log_script_failures
                    && logged < self.config.max_logged_failures_per_tick
                {
                    log::warn!(
                        "Script '{}' on entity {} failed in frame {}: {} ({} requests discarded)",
                        script.name(),
                        entity,
                        time.frame,
                        error,
                        discarded.len()
                    );
                    logged += 1;
                }
                report.failures.push(ScriptFailure {
                    entity,
                    script: script.name().to_string(),
                    error,
                });
            }

            scene.restore_script(entity, script);
        }

        let suppressed = report.failures.len() - logged;
        if self.config.log_script_failures && suppressed > 0 {
            log::warn!("{} more script failures in frame {}", suppressed, time.frame);
        }

        self.total_updates += report.updated as u64;
        self.total_failures += report.failures.len() as u64;
        report
    }

    /// Script updates run since the host was created
    pub fn total_updates(&self) -> u64 {
        self.total_updates
    }

    /// Failed script updates since the host was created
    pub fn total_failures(&self) -> u64 {
        self.total_failures
    }
}
