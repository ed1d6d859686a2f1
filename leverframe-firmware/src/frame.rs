//! Frame topology compiled in from frame.toml

use leverframe_core::config::{PulseRange, BOARD_COUNT};
use leverframe_drivers::Pca9685Config;

include!(concat!(env!("OUT_DIR"), "/frame.rs"));

/// Servo pulse counts for 0 and 180 degrees
pub const PULSE_RANGE: PulseRange = PulseRange {
    min: PULSE_MIN,
    max: PULSE_MAX,
};

/// Settings every servo board is initialised with
pub const PCA9685: Pca9685Config = Pca9685Config {
    oscillator_hz: OSCILLATOR_HZ,
    frequency_hz: PWM_FREQUENCY_HZ,
};
