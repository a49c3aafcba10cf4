//! Platform input backend contract
//!
//! A backend is polled exactly once per tick and reports raw levels: which
//! keys and mouse buttons are down right now and where the cursor is.

use std::collections::{HashSet, VecDeque};

use super::KeyCode;
use crate::foundation::math::Vec2;

/// Raw key/mouse levels for one tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputSample {
    /// Keys held down
    pub keys_down: HashSet<KeyCode>,
    /// Mouse button indices held down (0 = left, 1 = right, 2 = middle)
    pub mouse_buttons_down: HashSet<usize>,
    /// Cursor position in window coordinates
    pub mouse_position: Vec2,
}

impl InputSample {
    /// Sample with nothing pressed and the cursor at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: mark a key as held
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.keys_down.insert(key);
        self
    }

    /// Builder pattern: mark a mouse button as held
    pub fn with_mouse_button(mut self, index: usize) -> Self {
        self.mouse_buttons_down.insert(index);
        self
    }

    /// Builder pattern: set the cursor position
    pub fn with_mouse_position(mut self, x: f32, y: f32) -> Self {
        self.mouse_position = Vec2::new(x, y);
        self
    }
}

/// Source of per-tick input samples
pub trait InputBackend {
    /// Produce the sample for the tick that is starting
    fn poll(&mut self) -> InputSample;
}

/// Backend reporting no input at all (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInput;

impl InputBackend for NullInput {
    fn poll(&mut self) -> InputSample {
        InputSample::default()
    }
}

/// Backend replaying a prepared sequence of samples
///
/// Once the queue runs dry the last sample is repeated, which models keys
/// that stay held.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<InputSample>,
    last: InputSample,
}

impl ScriptedInput {
    /// Create a backend replaying `samples` in order
    pub fn new(samples: impl IntoIterator<Item = InputSample>) -> Self {
        Self {
            queue: samples.into_iter().collect(),
            last: InputSample::default(),
        }
    }

    /// Queue another sample
    pub fn push(&mut self, sample: InputSample) {
        self.queue.push_back(sample);
    }

    /// Number of samples not yet replayed
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputBackend for ScriptedInput {
    fn poll(&mut self) -> InputSample {
        if let Some(sample) = self.queue.pop_front() {
            self.last = sample;
        }
        self.last.clone()
    }
}
