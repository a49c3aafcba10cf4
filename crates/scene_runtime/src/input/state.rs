//! Per-tick input state with edge detection
//!
//! Edges are derived by comparing the current sample with the previous one,
//! so a key held across many ticks reports "pressed" on the first only.

use std::collections::HashSet;

use super::backend::InputSample;
use super::KeyCode;
use crate::foundation::math::Vec2;

/// Input levels for the current and previous tick
#[derive(Debug, Clone)]
pub struct InputState {
    keys: HashSet<KeyCode>,
    previous_keys: HashSet<KeyCode>,
    buttons: Vec<bool>,
    previous_buttons: Vec<bool>,
    mouse_position: Vec2,
    previous_mouse_position: Vec2,
}

impl InputState {
    /// Create an empty state tracking `mouse_buttons` buttons
    pub fn new(mouse_buttons: usize) -> Self {
        Self {
            keys: HashSet::new(),
            previous_keys: HashSet::new(),
            buttons: vec![false; mouse_buttons],
            previous_buttons: vec![false; mouse_buttons],
            mouse_position: Vec2::zeros(),
            previous_mouse_position: Vec2::zeros(),
        }
    }

    /// Move to the next tick: the current levels become the previous ones and
    /// `sample` becomes current.
    pub fn advance(&mut self, sample: &InputSample) {
        self.previous_keys = std::mem::replace(&mut self.keys, sample.keys_down.clone());

        self.previous_buttons.copy_from_slice(&self.buttons);
        for (index, down) in self.buttons.iter_mut().enumerate() {
            *down = sample.mouse_buttons_down.contains(&index);
        }
        if let Some(max) = sample.mouse_buttons_down.iter().max() {
            if *max >= self.buttons.len() {
                log::trace!("Ignoring mouse button {} (tracking {})", max, self.buttons.len());
            }
        }

        self.previous_mouse_position = self.mouse_position;
        self.mouse_position = sample.mouse_position;
    }

    /// Whether `key` is held this tick
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Whether `key` went from up to down on this tick
    pub fn was_key_pressed_this_frame(&self, key: KeyCode) -> bool {
        self.keys.contains(&key) && !self.previous_keys.contains(&key)
    }

    /// Whether `key` went from down to up on this tick
    pub fn was_key_released_this_frame(&self, key: KeyCode) -> bool {
        !self.keys.contains(&key) && self.previous_keys.contains(&key)
    }

    /// Cursor position sampled for this tick
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Cursor movement since the previous tick
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_position - self.previous_mouse_position
    }

    /// Whether mouse button `index` is held; untracked indices read as up
    pub fn is_mouse_button_down(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    /// Whether mouse button `index` went from up to down on this tick
    pub fn was_mouse_button_pressed_this_frame(&self, index: usize) -> bool {
        self.is_mouse_button_down(index)
            && !self.previous_buttons.get(index).copied().unwrap_or(false)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_fires_once_while_held() {
        let mut state = InputState::default();
        let held = InputSample::new().with_key(KeyCode::A);

        state.advance(&InputSample::new());
        assert!(!state.was_key_pressed_this_frame(KeyCode::A));

        state.advance(&held);
        assert!(state.is_key_down(KeyCode::A));
        assert!(state.was_key_pressed_this_frame(KeyCode::A));

        for _ in 0..3 {
            state.advance(&held);
            assert!(state.is_key_down(KeyCode::A));
            assert!(!state.was_key_pressed_this_frame(KeyCode::A));
        }

        state.advance(&InputSample::new());
        assert!(state.was_key_released_this_frame(KeyCode::A));
        assert!(!state.is_key_down(KeyCode::A));

        state.advance(&held);
        assert!(state.was_key_pressed_this_frame(KeyCode::A));
    }

    #[test]
    fn test_mouse_buttons_and_position() {
        let mut state = InputState::new(3);
        state.advance(&InputSample::new().with_mouse_position(10.0, 20.0));
        state.advance(
            &InputSample::new()
                .with_mouse_position(15.0, 18.0)
                .with_mouse_button(1)
                .with_mouse_button(5),
        );

        assert_eq!(state.mouse_position(), Vec2::new(15.0, 18.0));
        assert_eq!(state.mouse_delta(), Vec2::new(5.0, -2.0));
        assert!(state.is_mouse_button_down(1));
        assert!(state.was_mouse_button_pressed_this_frame(1));
        assert!(!state.is_mouse_button_down(0));
        assert!(!state.is_mouse_button_down(5));
    }
}
