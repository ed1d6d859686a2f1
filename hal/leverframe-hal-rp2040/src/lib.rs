//! RP2040-specific HAL for the servo controller firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `leverframe-hal` traits, plus the glue the firmware needs:
//!
//! - Flash-backed configuration storage (implements `leverframe_hal::ConfigStorage`)
//! - Blocking ADC channel for the keypad ladder (implements `leverframe_hal::AnalogInput`)
//! - Millisecond clock on the embassy time driver
//! - A shared handle that lets several drivers use one I2C bus

#![no_std]

pub mod adc;
pub mod clock;
pub mod flash;
pub mod i2c;

pub use adc::KeypadAdc;
pub use clock::EmbassyClock;
pub use flash::Rp2040ConfigStorage;
pub use i2c::SharedI2c;

// Re-export shared traits from leverframe-hal for convenience
pub use leverframe_hal::{AnalogInput, ConfigStorage, StorageError};
