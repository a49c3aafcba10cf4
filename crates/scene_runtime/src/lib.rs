//! # Scene Runtime
//!
//! A tick-driven host for a hierarchical scene graph whose entities carry
//! per-frame scripts.
//!
//! ## Features
//!
//! - **Scene Graph**: named entities with local transforms, parent/child
//!   hierarchy and cascade destruction
//! - **Commit Barrier**: structural changes requested during a tick become
//!   visible all at once at the end of it
//! - **Scripting**: one script per entity, updated once per tick with a
//!   context giving scene, input, time, camera and asset access
//! - **Asset Cache**: string-keyed meshes and textures loaded once and shared
//! - **Input**: level state plus single-tick press/release edges
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_runtime::prelude::*;
//!
//! let loader = MemoryLoader::new().with_mesh("cow1", b"cow".to_vec());
//! let mut scheduler = FrameScheduler::new(loader).with_clock(FixedStepClock::new(1.0 / 60.0));
//!
//! let mut spawn_timer = Cooldown::new(1.0);
//! scheduler
//!     .commands()
//!     .create_entity(EntityConfig::new("spawner").with_script(from_fn(move |ctx| {
//!         if spawn_timer.try_fire(ctx.elapsed()) {
//!             ctx.commands()
//!                 .create_entity(EntityConfig::new("heh2").with_mesh("cow1"))?;
//!         }
//!         Ok(())
//!     })))?;
//! scheduler.flush();
//!
//! scheduler.run_ticks(120);
//! # Ok::<(), SceneError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Configuration
pub mod config;
pub mod core;

// Building blocks
pub mod assets;
pub mod camera;
pub mod foundation;
pub mod input;

// Runtime
pub mod scene;
pub mod scheduler;
pub mod script;

#[cfg(test)]
mod tests;

/// Common imports for runtime users
pub mod prelude {
    pub use crate::{
        assets::{AssetLoader, FileSystemLoader, MemoryLoader, ResourceCache, ResourceError},
        camera::{CameraController, CameraState},
        core::{Config, RuntimeConfig},
        foundation::{
            cooldown::Cooldown,
            math::{Mat4, Quat, Transform, Vec2, Vec3},
            time::{FixedStepClock, FrameTime, ManualClock, SystemClock, TimeSource},
        },
        input::{InputBackend, InputSample, InputState, KeyCode, NullInput, ScriptedInput},
        scene::{
            Commands, EntityConfig, EntityId, RenderableComponent, SceneError, SceneGraph,
        },
        scheduler::{FrameScheduler, NullRenderer, SceneRenderer, SceneSnapshot, TickReport},
        script::{from_fn, Script, ScriptContext, ScriptError},
    };
}
