//! Operator input drivers

pub mod keypad;

pub use keypad::AnalogKeypad;
