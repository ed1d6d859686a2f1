//! Keypad ADC channel
//!
//! RP2040 has a single 12-bit ADC; the keypad ladder sits on one of the
//! GPIO26..29 inputs.

use embassy_rp::adc::{Adc, AdcPin, Blocking, Channel, Config};
use embassy_rp::gpio::Pull;
use embassy_rp::peripherals::ADC;
use embassy_rp::Peri;
use leverframe_hal::AnalogInput;

/// Full-scale reading of the 12-bit converter
pub const ADC_FULL_SCALE: u16 = 4095;

/// One ADC input read with blocking conversions
pub struct KeypadAdc<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> KeypadAdc<'d> {
    pub fn new(adc: Peri<'d, ADC>, pin: Peri<'d, impl AdcPin + 'd>) -> Self {
        Self {
            adc: Adc::new_blocking(adc, Config::default()),
            channel: Channel::new_pin(pin, Pull::None),
        }
    }
}

impl AnalogInput for KeypadAdc<'_> {
    fn full_scale(&self) -> u16 {
        ADC_FULL_SCALE
    }

    fn read_raw(&mut self) -> Option<u16> {
        self.adc.blocking_read(&mut self.channel).ok()
    }
}
