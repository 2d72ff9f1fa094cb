//! Data-driven gesture → key action table.

use crate::{
    config::KEY_BINDINGS,
    gesture::{DetectedGesture, Direction, GestureKind},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Char(char),
    Text(&'static str),
    Backspace,
    CapsLock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBinding {
    pub cell: u8,
    pub gesture: GestureKind,
    pub direction: Direction,
    pub action: KeyAction,
}

impl KeyBinding {
    pub fn matches(&self, gesture: &DetectedGesture) -> bool {
        !gesture.is_none()
            && self.cell == gesture.grid_position
            && self.gesture == gesture.kind
            && self.direction == gesture.direction
    }
}

/// Receives resolved key presses. Implemented by the HID or peripheral
/// output layer.
pub trait KeySink {
    type Error;

    fn press_char(&mut self, c: char) -> Result<(), Self::Error>;

    fn press_backspace(&mut self) -> Result<(), Self::Error>;

    /// Toggles caps lock on the host. Letters are sent unshifted either way.
    fn press_caps_lock(&mut self) -> Result<(), Self::Error>;

    fn type_text(&mut self, text: &str) -> Result<(), Self::Error> {
        for c in text.chars() {
            self.press_char(c)?;
        }
        Ok(())
    }
}

pub struct KeyMap {
    bindings: &'static [KeyBinding],
    caps_lock: bool,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new(&KEY_BINDINGS)
    }
}

impl KeyMap {
    pub const fn new(bindings: &'static [KeyBinding]) -> Self {
        Self {
            bindings,
            caps_lock: false,
        }
    }

    pub fn lookup(&self, gesture: &DetectedGesture) -> Option<KeyAction> {
        self.bindings
            .iter()
            .find(|binding| binding.matches(gesture))
            .map(|binding| binding.action)
    }

    /// Last caps lock state sent to the host.
    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// Performs the bound action on `sink`. Returns the action taken, or
    /// `None` when the gesture is unbound.
    pub fn execute<S: KeySink>(
        &mut self,
        gesture: &DetectedGesture,
        sink: &mut S,
    ) -> Result<Option<KeyAction>, S::Error> {
        let Some(action) = self.lookup(gesture) else {
            log::debug!("no binding for {} cell={}", gesture, gesture.grid_position);
            return Ok(None);
        };

        let result = match action {
            KeyAction::Char(c) => sink.press_char(c),
            KeyAction::Text(text) => sink.type_text(text),
            KeyAction::Backspace => sink.press_backspace(),
            KeyAction::CapsLock => sink.press_caps_lock().map(|()| {
                self.caps_lock = !self.caps_lock;
                log::debug!("caps lock {}", if self.caps_lock { "on" } else { "off" });
            }),
        };

        if result.is_err() {
            log::warn!("key sink rejected {:?} for {}", action, gesture);
        }
        result.map(|()| Some(action))
    }
}

#[cfg(test)]
mod tests;
