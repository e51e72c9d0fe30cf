//! Keyboard to input intent mapping
//!
//! Movement keys are level-triggered (held), the action and pause keys are
//! edge-triggered: one press yields exactly one intent until it is sampled.

use serde::{Deserialize, Serialize};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Action,
    Pause,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` string
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "Space" => Some(Key::Action),
            "KeyP" | "Escape" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
    /// Start / launch / restart, depending on phase
    pub action: bool,
    /// Pause toggle
    pub pause: bool,
}

impl InputIntent {
    /// Same intent with the one-shot commands cleared
    pub fn held_only(self) -> Self {
        Self {
            action: false,
            pause: false,
            ..self
        }
    }
}

/// Tracks key state between samples
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    left: bool,
    right: bool,
    action: bool,
    pause: bool,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Action => self.action = true,
            Key::Pause => self.pause = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            // Edges stay latched until sampled
            Key::Action | Key::Pause => {}
        }
    }

    /// Convenience for DOM-style handlers; unknown codes are ignored
    pub fn code_down(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.key_down(key);
        }
    }

    pub fn code_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.key_up(key);
        }
    }

    /// Current intent; consumes pending action and pause presses
    pub fn sample(&mut self) -> InputIntent {
        let intent = InputIntent {
            left: self.left,
            right: self.right,
            action: self.action,
            pause: self.pause,
        };
        self.action = false;
        self.pause = false;
        intent
    }
}
