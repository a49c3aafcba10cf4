//! Headless renderer that logs what it would draw

use scene_runtime::prelude::*;

/// Logs a summary of the snapshot every `interval` frames
pub struct LoggingRenderer {
    interval: u64,
    presented: u64,
}

impl LoggingRenderer {
    /// Log every `interval` frames (at least every frame)
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            presented: 0,
        }
    }
}

impl SceneRenderer for LoggingRenderer {
    fn present(&mut self, snapshot: &SceneSnapshot) {
        self.presented += 1;
        if snapshot.frame() % self.interval != 0 {
            return;
        }

        let camera = snapshot.camera.position;
        log::info!(
            "Frame {} ({:.2}s): {} entities, camera at ({:.2}, {:.2}, {:.2})",
            snapshot.frame(),
            snapshot.time.elapsed,
            snapshot.len(),
            camera.x,
            camera.y,
            camera.z
        );
        for (entity, renderable) in snapshot.renderables() {
            let position = entity.transform.position;
            log::debug!(
                "  {} '{}' mesh '{}' at ({:.2}, {:.2}, {:.2})",
                entity.id,
                entity.name,
                renderable.mesh.name,
                position.x,
                position.y,
                position.z
            );
        }
    }
}

impl Drop for LoggingRenderer {
    fn drop(&mut self) {
        log::debug!("Renderer presented {} frames", self.presented);
    }
}
