//! Renderer contract

use super::snapshot::SceneSnapshot;

/// Consumes one committed snapshot per tick
pub trait SceneRenderer {
    /// Draw (or otherwise consume) the snapshot
    fn present(&mut self, snapshot: &SceneSnapshot);
}

/// Renderer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl SceneRenderer for NullRenderer {
    fn present(&mut self, snapshot: &SceneSnapshot) {
        log::trace!(
            "Frame {}: {} entities, {} renderables",
            snapshot.frame(),
            snapshot.len(),
            snapshot.renderables().count()
        );
    }
}
