//! Per-frame entity scripts
//!
//! A script is user state attached to exactly one entity. Once per tick the
//! [`ScriptHost`] hands every script a [`ScriptContext`] through which it
//! reads the committed scene and issues deferred changes.

mod context;
mod host;

use thiserror::Error;

pub use context::ScriptContext;
pub use host::{FrameContext, ScriptFailure, ScriptHost, ScriptTickReport};

use crate::assets::ResourceError;
use crate::scene::{EntityId, SceneError};

/// Error returned from a script update
///
/// A failure only affects the script that produced it, for the current tick.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// A scene request was rejected
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    /// An asset could not be resolved
    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Script-defined failure
    #[error("{0}")]
    Custom(String),
}

impl ScriptError {
    /// Script-defined failure with a message
    pub fn custom(message: impl Into<String>) -> Self {
        ScriptError::Custom(message.into())
    }
}

/// Behaviour attached to an entity
///
/// The owning entity holds the script; the script only ever refers to its
/// owner by [`EntityId`].
pub trait Script: 'static {
    /// Called once per tick
    fn update(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError>;

    /// Called when the script is attached to `owner`
    fn on_attach(&mut self, _owner: EntityId) {}

    /// Name used in logs and failure reports
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Script backed by a closure, see [`from_fn`]
pub struct FnScript<F> {
    name: String,
    update: F,
}

impl<F> FnScript<F> {
    /// Builder pattern: set the name used in logs
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<F> Script for FnScript<F>
where
    F: FnMut(&mut ScriptContext<'_>) -> Result<(), ScriptError> + 'static,
{
    fn update(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        (self.update)(ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Wrap a closure as a script
pub fn from_fn<F>(update: F) -> FnScript<F>
where
    F: FnMut(&mut ScriptContext<'_>) -> Result<(), ScriptError> + 'static,
{
    FnScript {
        name: "fn script".to_string(),
        update,
    }
}
