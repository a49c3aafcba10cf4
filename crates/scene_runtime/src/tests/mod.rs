//! Scenario tests driving the full tick loop

mod barrier;
mod scripting;

use std::cell::RefCell;
use std::rc::Rc;

use crate::prelude::*;

/// Shared record written by scripts and read back by the test
type Record<T> = Rc<RefCell<Vec<T>>>;

fn record<T>() -> Record<T> {
    Rc::new(RefCell::new(Vec::new()))
}

fn loader() -> MemoryLoader {
    MemoryLoader::new()
        .with_mesh("floor", b"floor".to_vec())
        .with_mesh("cow1", b"cow".to_vec())
        .with_texture("tex1.png", b"tex1".to_vec())
        .with_texture("other.png", b"other".to_vec())
}

/// Scheduler with in-memory assets and a clock the test controls
fn scheduler(clock: &ManualClock) -> FrameScheduler {
    FrameScheduler::new(loader()).with_clock(clock.clone())
}

/// Renderer keeping every snapshot it is handed
struct RecordingRenderer(Record<SceneSnapshot>);

impl SceneRenderer for RecordingRenderer {
    fn present(&mut self, snapshot: &SceneSnapshot) {
        self.0.borrow_mut().push(snapshot.clone());
    }
}
