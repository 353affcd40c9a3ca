//! Keyboard and touch input sampling
//!
//! Every physical source (a key code or an on-screen button) is tracked on
//! its own. A logical button reads as held while any of its sources is held,
//! so releasing `KeyA` does not release Left while `ArrowLeft` is still down.

use std::collections::HashSet;

/// Logical buttons the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Jump,
}

impl Button {
    /// Map a `KeyboardEvent.code` to a logical button
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Button::Left),
            "ArrowRight" | "KeyD" => Some(Button::Right),
            "Space" | "ArrowUp" | "KeyW" => Some(Button::Jump),
            _ => None,
        }
    }
}

/// A physical producer of button presses
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(String),
    Touch(Button),
}

/// Held-button flags sampled once per simulation step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Collects press/release events between frames
#[derive(Debug, Default)]
pub struct InputSampler {
    held: HashSet<(InputSource, Button)>,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key press; unknown codes are ignored. Returns whether the code was bound.
    pub fn key_down(&mut self, code: &str) -> bool {
        match Button::from_key_code(code) {
            Some(button) => {
                self.held.insert((InputSource::Key(code.to_string()), button));
                true
            }
            None => false,
        }
    }

    /// Key release; unknown codes are ignored. Returns whether the code was bound.
    pub fn key_up(&mut self, code: &str) -> bool {
        match Button::from_key_code(code) {
            Some(button) => {
                self.held.remove(&(InputSource::Key(code.to_string()), button));
                true
            }
            None => false,
        }
    }

    /// On-screen control press or release
    pub fn touch(&mut self, button: Button, pressed: bool) {
        let entry = (InputSource::Touch(button), button);
        if pressed {
            self.held.insert(entry);
        } else {
            self.held.remove(&entry);
        }
    }

    /// Drop every held source (focus loss, teardown)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held.iter().any(|(_, b)| *b == button)
    }

    /// Snapshot the current flags
    pub fn sample(&self) -> InputState {
        InputState {
            left: self.is_held(Button::Left),
            right: self.is_held(Button::Right),
            jump: self.is_held(Button::Jump),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_bindings() {
        let mut input = InputSampler::new();
        assert!(input.key_down("KeyW"));
        assert!(input.sample().jump);
        input.key_up("KeyW");
        assert!(input.key_down("Space"));
        assert!(input.sample().jump);
        input.key_up("Space");
        assert!(input.key_down("KeyD"));
        assert_eq!(
            input.sample(),
            InputState {
                left: false,
                right: true,
                jump: false
            }
        );
    }

    #[test]
    fn test_or_semantics_across_sources() {
        let mut input = InputSampler::new();
        input.key_down("ArrowLeft");
        input.key_down("KeyA");
        input.touch(Button::Left, true);

        input.key_up("KeyA");
        assert!(input.sample().left);
        input.touch(Button::Left, false);
        assert!(input.sample().left);
        input.key_up("ArrowLeft");
        assert!(!input.sample().left);
    }

    #[test]
    fn test_repeated_key_down_is_single_hold() {
        let mut input = InputSampler::new();
        input.key_down("ArrowRight");
        input.key_down("ArrowRight");
        input.key_up("ArrowRight");
        assert!(!input.sample().right);
    }

    #[test]
    fn test_unknown_codes_ignored() {
        let mut input = InputSampler::new();
        assert!(!input.key_down("KeyQ"));
        assert!(!input.key_up("Escape"));
        assert_eq!(input.sample(), InputState::default());
    }

    #[test]
    fn test_release_all() {
        let mut input = InputSampler::new();
        input.key_down("ArrowUp");
        input.touch(Button::Right, true);
        input.release_all();
        assert_eq!(input.sample(), InputState::default());
    }
}
