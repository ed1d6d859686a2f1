//! Resistor-ladder keypad on one analog input
//!
//! The five buttons pull a divider to different voltages. Readings are
//! rescaled to a 10-bit range and bucketed by threshold; anything at or
//! above [`RELEASED_THRESHOLD`] means no button is held.

use leverframe_core::traits::{Key, Keypad};
use leverframe_hal::AnalogInput;

/// Scale thresholds are expressed in
pub const LADDER_SCALE: u16 = 1023;

/// Upper bounds (exclusive) of each button's band on the 10-bit scale
pub const THRESHOLDS: [(u16, Key); 5] = [
    (50, Key::Right),
    (250, Key::Up),
    (450, Key::Down),
    (650, Key::Left),
    (850, Key::Select),
];

/// Readings at or above this mean every button is up
pub const RELEASED_THRESHOLD: u16 = 1000;

/// Rescale a raw conversion to the 10-bit ladder scale
pub fn scale(raw: u16, full_scale: u16) -> u16 {
    if full_scale == 0 {
        return LADDER_SCALE;
    }
    let raw = raw.min(full_scale) as u32;
    (raw * LADDER_SCALE as u32 / full_scale as u32) as u16
}

/// Button for a raw reading
///
/// Readings between the Select band and the release threshold decode to
/// `Key::None` but do not count as released.
pub fn decode(raw: u16, full_scale: u16) -> Key {
    let level = scale(raw, full_scale);
    THRESHOLDS
        .iter()
        .find(|(bound, _)| level < *bound)
        .map(|(_, key)| *key)
        .unwrap_or(Key::None)
}

/// Whether a raw reading means no button is held
pub fn is_released(raw: u16, full_scale: u16) -> bool {
    scale(raw, full_scale) >= RELEASED_THRESHOLD
}

/// Keypad on an ADC channel
pub struct AnalogKeypad<A> {
    adc: A,
}

impl<A: AnalogInput> AnalogKeypad<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    pub fn release(self) -> A {
        self.adc
    }
}

impl<A: AnalogInput> Keypad for AnalogKeypad<A> {
    /// A blocking read spins until the ladder reads released and returns
    /// the last button decoded on the way. A failed conversion ends the
    /// wait as if released.
    fn read_key(&mut self, blocking: bool) -> Key {
        let full_scale = self.adc.full_scale();
        let mut key = Key::None;

        loop {
            let Some(raw) = self.adc.read_raw() else {
                return key;
            };
            let decoded = decode(raw, full_scale);
            if decoded.is_pressed() {
                key = decoded;
            }
            if !blocking || is_released(raw, full_scale) {
                return key;
            }
        }
    }
}
