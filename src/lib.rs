//! Keymaps for the Keyball39 and the engine that turns their key presses into HID reports.
//!
//! The firmware around this crate scans the matrix, debounces, and feeds key transitions to a
//! [Keyboard]; it forwards the resulting [Event]s to the USB and trackball stacks.
//! Everything here builds for the host too, which is how the tests run.

#![cfg_attr(not(test), no_std)]

mod combo;
pub mod config;
pub mod error;
pub mod host;
pub mod jis;
pub mod keyboard;
pub mod keycode;
pub mod keymap;
pub mod keymaps;
pub mod layer;
pub mod report;
mod tap_hold;

pub use error::KeymapError;
pub use host::{Context, Event, EventQueue, HostOs};
pub use keyboard::{KeyEvent, Keyboard, KeymapHooks};
