//! Keyboard combination bindings.
//!
//! A key event carries the lower-cased key plus modifier flags. Its
//! [`KeyEvent::pressed`] list (key and held modifiers, sorted) must equal a
//! binding's combination exactly for the binding to fire.

#[cfg(test)]
#[path = "keys_test.rs"]
mod keys_test;

use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, HookResult};
use crate::stage::Stage;

/// Which phase of a key stroke an event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Down,
    Up,
    Press,
}

impl FromStr for KeyState {
    type Err = EngineError;

    /// Accepts DOM event type names (`keydown`, `keyup`, `keypress`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keydown" => Ok(Self::Down),
            "keyup" => Ok(Self::Up),
            "keypress" => Ok(Self::Press),
            _ => Err(EngineError::InvalidKeyBinding(format!("invalid key state \"{s}\""))),
        }
    }
}

/// Modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// One keyboard event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Lower-cased key identifier, e.g. `"a"`, `"arrowup"`, `" "`.
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[must_use]
    pub fn new(key: &str, modifiers: Modifiers) -> Self {
        Self { key: key.to_lowercase(), modifiers }
    }

    /// Key without modifiers.
    #[must_use]
    pub fn plain(key: &str) -> Self {
        Self::new(key, Modifiers::default())
    }

    /// The key and every held modifier, sorted.
    #[must_use]
    pub fn pressed(&self) -> Vec<String> {
        let mut pressed = Vec::with_capacity(5);
        if !self.key.is_empty() {
            pressed.push(self.key.clone());
        }
        let m = self.modifiers;
        for (held, name) in [(m.meta, "meta"), (m.shift, "shift"), (m.ctrl, "ctrl"), (m.alt, "alt")] {
            if held {
                pressed.push(name.to_owned());
            }
        }
        pressed.sort();
        pressed
    }
}

/// Friendly names accepted in bindings.
fn alias(key: &str) -> &str {
    match key {
        "up" => "arrowup",
        "down" => "arrowdown",
        "left" => "arrowleft",
        "right" => "arrowright",
        "space" => " ",
        other => other,
    }
}

/// An exact key combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    keys: Vec<String>,
}

impl KeyCombo {
    /// Build a combination from key names; `up`/`down`/`left`/`right` map to
    /// the arrow keys and `space` to the space bar.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyBinding` for an empty combination or an empty key name.
    pub fn parse(keys: &[&str]) -> Result<Self, EngineError> {
        if keys.is_empty() {
            return Err(EngineError::InvalidKeyBinding("key combination is empty".into()));
        }
        let mut out = Vec::with_capacity(keys.len());
        for key in keys {
            if key.is_empty() {
                return Err(EngineError::InvalidKeyBinding("empty key name".into()));
            }
            out.push(alias(&key.to_lowercase()).to_owned());
        }
        out.sort();
        Ok(Self { keys: out })
    }

    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys == event.pressed()
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keys.join("+"))
    }
}

/// Handler invoked when a binding matches.
pub type KeyHandler = Box<dyn FnMut(&mut Stage) -> HookResult>;

struct Binding {
    state: KeyState,
    combo: KeyCombo,
    handler: KeyHandler,
}

/// Registered key bindings for one renderer.
#[derive(Default)]
pub struct Keyboard {
    bindings: Vec<Binding>,
}

impl fmt::Debug for Keyboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.bindings.iter().map(|b| format!("{:?} {}", b.state, b.combo)))
            .finish()
    }
}

impl Keyboard {
    /// Bind `handler` to `keys` for events in `state`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyBinding` if the combination is malformed.
    pub fn on(&mut self, keys: &[&str], state: KeyState, handler: impl FnMut(&mut Stage) -> HookResult + 'static) -> HookResult {
        let combo = KeyCombo::parse(keys)?;
        tracing::debug!(combo = %combo, ?state, "key binding registered");
        self.bindings.push(Binding { state, combo, handler: Box::new(handler) });
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `InvalidKeyBinding` if the combination is malformed.
    pub fn down(&mut self, keys: &[&str], handler: impl FnMut(&mut Stage) -> HookResult + 'static) -> HookResult {
        self.on(keys, KeyState::Down, handler)
    }

    /// # Errors
    ///
    /// Returns `InvalidKeyBinding` if the combination is malformed.
    pub fn up(&mut self, keys: &[&str], handler: impl FnMut(&mut Stage) -> HookResult + 'static) -> HookResult {
        self.on(keys, KeyState::Up, handler)
    }

    /// # Errors
    ///
    /// Returns `InvalidKeyBinding` if the combination is malformed.
    pub fn pressed(&mut self, keys: &[&str], handler: impl FnMut(&mut Stage) -> HookResult + 'static) -> HookResult {
        self.on(keys, KeyState::Press, handler)
    }

    /// Run every binding whose state and combination match `event`, in
    /// registration order. Returns how many fired.
    ///
    /// # Errors
    ///
    /// Propagates the first handler failure.
    pub fn dispatch(&mut self, state: KeyState, event: &KeyEvent, stage: &mut Stage) -> Result<usize, EngineError> {
        let mut fired = 0;
        for binding in self.bindings.iter_mut().filter(|b| b.state == state && b.combo.matches(event)) {
            (binding.handler)(stage)?;
            fired += 1;
        }
        Ok(fired)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Drop every binding.
    pub fn clear(&mut self) {
        self.bindings.clear();
        tracing::debug!("key bindings cleared");
    }
}
