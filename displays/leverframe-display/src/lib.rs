//! Operator panel for Leverframe
//!
//! This crate provides:
//! - `Screen`, a two-row text buffer that redraws only changed rows
//! - `TitleScroller` for titles wider than the display
//! - `MenuCursor` for wrapping Up/Down list selection
//! - `OperatorPanel`, which puts the above together over any
//!   `CharDisplay` + `Keypad` + `Clock` and implements the core `Menu` trait
//!
//! # Architecture
//!
//! The setup workflow in leverframe-core talks to the panel only through
//! the `Menu` and `Keypad` traits. The panel owns the display, the keypad
//! and a clock; the firmware wires in the HD44780 and the analog keypad.

#![no_std]

pub mod cursor;
pub mod panel;
pub mod screen;
pub mod scroll;

#[cfg(test)]
mod mock;

// Re-export key types
pub use cursor::MenuCursor;
pub use panel::OperatorPanel;
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
pub use scroll::TitleScroller;
