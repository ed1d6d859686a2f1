//! Operator setup over the keypad and display

pub mod repeat;
pub mod workflow;

pub use repeat::{KeyRepeat, Repeat, REPEAT_HOLD_MS};
pub use workflow::{SessionReport, SetupAction, SetupWorkflow};
