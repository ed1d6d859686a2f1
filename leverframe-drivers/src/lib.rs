//! Hardware driver implementations
//!
//! Concrete implementations of the traits defined in leverframe-core for
//! the parts a lever frame controller is built from:
//!
//! - Switch banks (MCP23017 16-bit I/O expander)
//! - Servo banks (PCA9685 16-channel PWM)
//! - Operator panel (HD44780 LCD, resistor-ladder keypad)
//!
//! Drivers own their bus handle. Share one I2C bus between several
//! drivers with a wrapper that implements `embedded_hal::i2c::I2c`.

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod display;
pub mod expander;
pub mod input;
pub mod servo;

#[cfg(test)]
mod mock;

pub use display::Hd44780;
pub use expander::Mcp23017;
pub use input::AnalogKeypad;
pub use servo::{Pca9685, Pca9685Config};
