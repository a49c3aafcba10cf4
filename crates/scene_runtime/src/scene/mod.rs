//! Scene management system
//!
//! Entities form a hierarchy of named nodes with local transforms, optional
//! renderables and at most one script each.
//!
//! ## Mutation model
//!
//! ```text
//! Scripts / setup code
//!      ↓  Commands (validated, deferred)
//! MutationQueue
//!      ↓  SceneGraph::commit (once per tick)
//! Committed scene  →  queries, snapshot, renderer
//! ```
//!
//! Creations and destructions requested during a tick are invisible to every
//! query until the commit barrier at the end of that tick.

mod commands;
mod entity;
mod entity_config;
mod error;
mod queue;
mod renderable;
mod scene_graph;

pub use commands::Commands;
pub use entity::{EntityId, EntityState};
pub use entity_config::EntityConfig;
pub use error::SceneError;
pub use queue::MutationQueue;
pub use renderable::RenderableComponent;
pub use scene_graph::{CommitReport, SceneGraph};
