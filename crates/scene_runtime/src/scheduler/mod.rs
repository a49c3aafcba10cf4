//! # Frame scheduler
//!
//! Owns the runtime and drives it one tick at a time:
//!
//! 1. poll input and sample the clock
//! 2. run every script once against the committed scene
//! 3. commit the structural requests gathered during the tick
//! 4. hand a snapshot of the committed scene to the renderer
//!
//! Nothing blocks; the caller decides how often to tick.

mod renderer;
mod snapshot;

pub use renderer::{NullRenderer, SceneRenderer};
pub use snapshot::{SceneSnapshot, SnapshotEntity};

use crate::assets::{AssetLoader, FileSystemLoader, ResourceCache};
use crate::camera::CameraController;
use crate::core::RuntimeConfig;
use crate::foundation::time::{FrameTime, SystemClock, TimeSource};
use crate::input::{InputBackend, InputState, NullInput};
use crate::scene::{Commands, CommitReport, MutationQueue, SceneGraph};
use crate::script::{FrameContext, ScriptHost, ScriptTickReport};

/// Everything that happened during one tick
#[derive(Debug)]
pub struct TickReport {
    /// Timing of the tick
    pub time: FrameTime,
    /// Script pass results
    pub scripts: ScriptTickReport,
    /// Commit barrier results
    pub commit: CommitReport,
    /// Visible renderables handed to the renderer
    pub rendered: usize,
}

/// Tick-driven runtime host
pub struct FrameScheduler {
    config: RuntimeConfig,
    scene: SceneGraph,
    resources: ResourceCache,
    input: InputState,
    input_backend: Box<dyn InputBackend>,
    clock: Box<dyn TimeSource>,
    time: FrameTime,
    ticks: u64,
    camera: CameraController,
    scripts: ScriptHost,
    renderer: Box<dyn SceneRenderer>,
    staged: MutationQueue,
}

impl FrameScheduler {
    /// Create a scheduler loading assets through `loader`, with a wall
    /// clock, no input and no renderer
    pub fn new(loader: impl AssetLoader + 'static) -> Self {
        let config = RuntimeConfig::default();
        Self {
            scene: SceneGraph::new(),
            resources: ResourceCache::new(loader),
            input: InputState::new(config.input.mouse_buttons),
            input_backend: Box::new(NullInput),
            clock: Box::new(SystemClock::new()),
            time: FrameTime::default(),
            ticks: 0,
            camera: CameraController::from_config(&config.camera),
            scripts: ScriptHost::new(config.scheduler.clone()),
            renderer: Box::new(NullRenderer),
            staged: MutationQueue::new(),
            config,
        }
    }

    /// Create a scheduler loading assets from disk as `config` describes
    pub fn from_config(config: RuntimeConfig) -> Self {
        Self::new(FileSystemLoader::new(config.assets.clone())).with_config(config)
    }

    /// Builder pattern: apply input, camera and scheduler settings
    ///
    /// Intended for setup; input history and the camera pose are reset.
    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.input = InputState::new(config.input.mouse_buttons);
        self.camera = CameraController::from_config(&config.camera);
        self.scripts = ScriptHost::new(config.scheduler.clone());
        self.config = config;
        self
    }

    /// Builder pattern: set the time source
    pub fn with_clock(mut self, clock: impl TimeSource + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Builder pattern: set the input backend
    pub fn with_input(mut self, backend: impl InputBackend + 'static) -> Self {
        self.input_backend = Box::new(backend);
        self
    }

    /// Builder pattern: set the renderer
    pub fn with_renderer(mut self, renderer: impl SceneRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Queue scene changes from outside a tick
    ///
    /// They are applied by [`flush`](Self::flush) or at the next tick's
    /// commit, ahead of anything the scripts request.
    pub fn commands(&mut self) -> Commands<'_> {
        Commands::new(&self.scene, &self.resources, &mut self.staged)
    }

    /// Commit everything queued outside a tick
    pub fn flush(&mut self) -> CommitReport {
        let staged = std::mem::take(&mut self.staged);
        self.scene.enqueue(staged);
        self.scene.commit()
    }

    /// Run one tick
    pub fn run_tick(&mut self) -> TickReport {
        let sample = self.input_backend.poll();
        self.input.advance(&sample);
        let now = self.clock.elapsed();
        self.time.advance(now, self.ticks == 0);
        self.ticks += 1;

        let mut queue = std::mem::take(&mut self.staged);
        let scripts = self.scripts.tick(
            &mut self.scene,
            FrameContext {
                resources: &self.resources,
                input: &self.input,
                time: self.time,
                camera: &mut self.camera,
                queue: &mut queue,
            },
        );

        self.scene.enqueue(queue);
        let commit = self.scene.commit();

        let snapshot = self.snapshot();
        let rendered = snapshot.renderables().count();
        self.renderer.present(&snapshot);

        log::trace!(
            "Tick {} at {:.3}s: {} scripts, {} failures, {} entities",
            self.time.frame,
            self.time.elapsed,
            scripts.updated,
            scripts.failures.len(),
            snapshot.len()
        );

        TickReport {
            time: self.time,
            scripts,
            commit,
            rendered,
        }
    }

    /// Run `count` ticks back to back
    pub fn run_ticks(&mut self, count: usize) -> Vec<TickReport> {
        (0..count).map(|_| self.run_tick()).collect()
    }

    /// Snapshot of the committed scene and current camera
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(&self.scene, self.camera.state(), self.time)
    }

    /// The scene graph
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// The scene graph, for immediate edits between ticks
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    /// The asset cache
    pub fn resources(&self) -> &ResourceCache {
        &self.resources
    }

    /// Input as of the last tick
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Timing of the last tick
    pub fn time(&self) -> FrameTime {
        self.time
    }

    /// The camera
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// The camera, for edits between ticks
    pub fn camera_mut(&mut self) -> &mut CameraController {
        &mut self.camera
    }

    /// Script host counters
    pub fn script_host(&self) -> &ScriptHost {
        &self.scripts
    }

    /// Active configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
