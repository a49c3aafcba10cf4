//! Time management utilities
//!
//! A [`TimeSource`] reports monotonic elapsed seconds; the scheduler samples
//! it once per tick into a [`FrameTime`] that every script sees unchanged for
//! the rest of that tick.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic elapsed-time provider
pub trait TimeSource {
    /// Seconds elapsed since the source started. Must never decrease.
    fn elapsed(&mut self) -> f32;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Create a clock starting now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn elapsed(&mut self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Clock advancing by a constant step on every sample
///
/// The first sample reads `0.0`, so tick `n` (zero-based) sees `n * step`.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f32,
    next: f32,
}

impl FixedStepClock {
    /// Create a clock advancing by `step` seconds per sample
    pub fn new(step: f32) -> Self {
        Self { step, next: 0.0 }
    }
}

impl TimeSource for FixedStepClock {
    fn elapsed(&mut self) -> f32 {
        let now = self.next;
        self.next += self.step;
        now
    }
}

/// Externally driven clock
///
/// Clones share the same reading, so a test can keep one handle and hand the
/// other to the scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f32>>,
}

impl ManualClock {
    /// Create a clock reading `0.0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reading. Values below the current reading are ignored to keep
    /// the source monotonic.
    pub fn set(&self, now: f32) {
        if now >= self.now.get() {
            self.now.set(now);
        } else {
            log::warn!("ManualClock ignored backwards step {} -> {}", self.now.get(), now);
        }
    }

    /// Advance the reading by `delta` seconds
    pub fn advance(&self, delta: f32) {
        self.set(self.now.get() + delta.max(0.0));
    }

    /// Current reading
    pub fn now(&self) -> f32 {
        self.now.get()
    }
}

impl TimeSource for ManualClock {
    fn elapsed(&mut self) -> f32 {
        self.now.get()
    }
}

/// Per-tick timing snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Elapsed seconds at the start of this tick
    pub elapsed: f32,
    /// Seconds since the previous tick
    pub delta: f32,
    /// Zero-based index of this tick
    pub frame: u64,
}

impl FrameTime {
    /// Advance to a new tick sampled at `now`
    ///
    /// The very first advance keeps frame `0` and a zero delta.
    pub fn advance(&mut self, now: f32, first: bool) {
        if first {
            self.frame = 0;
            self.delta = 0.0;
        } else {
            self.frame += 1;
            self.delta = (now - self.elapsed).max(0.0);
        }
        self.elapsed = now;
    }
}
