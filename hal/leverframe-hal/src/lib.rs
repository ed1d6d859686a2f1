//! Leverframe Hardware Abstraction Layer
//!
//! This crate defines the chip-level traits the rest of the firmware is
//! written against, so that the switch/servo logic can run on any MCU that
//! provides them (and on the host, for tests).
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │  Application (leverframe-firmware, etc.)  │
//! └───────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌───────────────────────────────────────────┐
//! │  leverframe-hal (this crate - traits)     │
//! └───────────────────────────────────────────┘
//!                      │
//!                      ▼
//!             ┌─────────────────┐
//!             │ leverframe-hal- │
//!             │     rp2040      │
//!             └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`flash::ConfigStorage`] - Flat byte-addressable persistent storage
//! - [`adc::AnalogInput`] - Single analog input channel

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod flash;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use flash::{ConfigStorage, RamStorage, StorageError, ERASED_BYTE};
