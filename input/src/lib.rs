//! Held-key input for the player. Keys are set either by a host event loop or
//! by replaying a `ScriptedInput`, then read back through the
//! `MovementInput` queries using the configured bindings.
//!
//! Also does config options for controls.

pub mod config;
pub mod script;

use std::collections::hash_set::HashSet;
use std::fmt;
use std::str::FromStr;

use config::InputBindings;
use gameplay::MovementInput;
use thiserror::Error;

pub use script::ScriptedInput;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown key name {0:?}")]
    UnknownKey(String),

    #[error("input script line {line}: {reason}")]
    Script { line: usize, reason: String },
}

/// The keys that can be bound to a movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Q,
    E,
    Space,
    LShift,
}

impl Key {
    pub const ALL: [Key; 12] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::Q,
        Key::E,
        Key::Space,
        Key::LShift,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Key::Up => "up",
            Key::Down => "down",
            Key::Left => "left",
            Key::Right => "right",
            Key::W => "w",
            Key::A => "a",
            Key::S => "s",
            Key::D => "d",
            Key::Q => "q",
            Key::E => "e",
            Key::Space => "space",
            Key::LShift => "lshift",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Key {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Key::ALL
            .into_iter()
            .find(|k| k.name() == lower)
            .ok_or_else(|| InputError::UnknownKey(s.to_owned()))
    }
}

#[derive(Debug, Default, Clone)]
pub struct InputEvents {
    key_state: HashSet<Key>,
}

impl InputEvents {
    pub fn is_kb_pressed(&self, k: Key) -> bool {
        self.key_state.contains(&k)
    }

    pub fn keys_pressed(&self) -> &HashSet<Key> {
        &self.key_state
    }

    pub fn set_kb(&mut self, k: Key) {
        self.key_state.insert(k);
    }

    pub fn unset_kb(&mut self, k: Key) {
        self.key_state.remove(&k);
    }

    pub fn release_all(&mut self) {
        self.key_state.clear();
    }
}

/// Current key state plus the bindings used to interpret it
#[derive(Debug, Clone)]
pub struct Input {
    pub events: InputEvents,
    pub bindings: InputBindings,
}

impl Input {
    pub fn new(bindings: InputBindings) -> Input {
        Input {
            events: InputEvents::default(),
            bindings,
        }
    }

    /// Replace the held keys with the next frame of `script`. Once the script
    /// is exhausted every key is released.
    pub fn update(&mut self, script: &mut ScriptedInput) {
        self.events.release_all();
        for &k in script.next_frame() {
            self.events.set_kb(k);
        }
    }
}

impl MovementInput for Input {
    fn forward(&self) -> bool {
        self.events.is_kb_pressed(self.bindings.key_forward)
    }

    fn backward(&self) -> bool {
        self.events.is_kb_pressed(self.bindings.key_backward)
    }

    fn left(&self) -> bool {
        self.events.is_kb_pressed(self.bindings.key_left)
    }

    fn right(&self) -> bool {
        self.events.is_kb_pressed(self.bindings.key_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names() {
        for k in Key::ALL {
            assert_eq!(k.name().parse::<Key>().unwrap(), k);
        }
        assert_eq!(" LShift ".parse::<Key>().unwrap(), Key::LShift);
        assert!("f13".parse::<Key>().is_err());
    }

    #[test]
    fn bindings_drive_movement() {
        let mut input = Input::new(InputBindings::default());
        assert!(!input.forward());
        input.events.set_kb(Key::W);
        input.events.set_kb(Key::Left);
        assert!(input.forward());
        assert!(input.left());
        assert!(!input.backward());
        assert!(!input.right());
        input.events.unset_kb(Key::W);
        assert!(!input.forward());
    }
}
