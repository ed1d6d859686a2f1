//! Board-agnostic core logic for the leverframe servo controller
//!
//! Toggle switches on switch-bank boards drive model railway servos on
//! matching servo-bank boards. This crate holds everything that does not
//! depend on specific hardware:
//!
//! - Collaborator traits (switch bank, servo bank, keypad, menu, display, clock)
//! - Servo configuration records and the persisted configuration store
//! - Switch bank monitoring with single-edge reporting
//! - Motion profiles (Point, Semaphore, Sweep, On/Off) and their playback
//! - The synchronization controller run every polling cycle
//! - The operator setup workflow

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod motion;
pub mod setup;
pub mod switches;
pub mod sync;
pub mod traits;

#[cfg(test)]
mod mock;
