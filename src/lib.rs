//! Gesture recognition core for a compact capacitive touch keyboard.
//!
//! Normalized touch samples go in through [`GestureDetector::update`]; one
//! [`DetectedGesture`] per contact comes out and is resolved to a key action
//! by [`KeyMap`].

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod gesture;
pub mod keymap;

pub use config::{active_config, ConfigError, GestureConfig};
pub use gesture::{
    DetectedGesture, DetectorPhase, DetectorTrace, Direction, GestureDetector, GestureKind,
    Sample,
};
pub use keymap::{KeyAction, KeyBinding, KeyMap, KeySink};
