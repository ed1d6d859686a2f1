//! PCA9685 16-channel 12-bit PWM driver (servo bank)
//!
//! Each channel has 4096 counts per PWM period and a pair of ON/OFF
//! counters. Servos are driven with ON at 0 and OFF at the pulse width;
//! bit 12 of either counter forces the output fully on or fully off.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use leverframe_core::config::{DEFAULT_OSCILLATOR_HZ, DEFAULT_PWM_FREQUENCY_HZ, PINS_PER_BOARD};
use leverframe_core::traits::{BusError, PwmOutput, ServoBank};

use crate::bus::bus_error;

/// PCA9685 register addresses
pub mod reg {
    /// Mode register 1
    pub const MODE1: u8 = 0x00;
    /// Channel 0 ON low byte; channels follow at 4-byte strides
    pub const LED0_ON_L: u8 = 0x06;
    /// PWM frequency prescaler (writable only while asleep)
    pub const PRESCALE: u8 = 0xFE;
}

/// MODE1 bits
pub mod mode1 {
    pub const RESTART: u8 = 0x80;
    pub const AUTO_INCREMENT: u8 = 0x20;
    pub const SLEEP: u8 = 0x10;
}

/// Address with A5..A0 tied low
pub const BASE_ADDRESS: u8 = 0x40;

/// Counts per PWM period
pub const COUNTS: u16 = 4096;

/// Counter bit forcing a channel fully on (ON register) or off (OFF register)
pub const FULL: u16 = 0x1000;

pub const PRESCALE_MIN: u8 = 3;
pub const PRESCALE_MAX: u8 = 255;

/// Oscillator wake-up time after leaving sleep
const WAKE_US: u32 = 500;

/// Time for the reset to settle
const RESET_MS: u32 = 10;

/// PCA9685 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pca9685Config {
    /// Internal oscillator frequency (nominally 25 MHz, often nearer 27)
    pub oscillator_hz: u32,
    /// Output PWM frequency
    pub frequency_hz: u16,
}

impl Default for Pca9685Config {
    fn default() -> Self {
        Self {
            oscillator_hz: DEFAULT_OSCILLATOR_HZ,
            frequency_hz: DEFAULT_PWM_FREQUENCY_HZ,
        }
    }
}

impl Pca9685Config {
    /// Prescaler for the configured frequency: `round(osc / (4096 * freq)) - 1`
    pub fn prescale(&self) -> u8 {
        let divisor = COUNTS as u32 * self.frequency_hz.max(1) as u32;
        let rounded = (self.oscillator_hz + divisor / 2) / divisor;
        rounded
            .saturating_sub(1)
            .clamp(PRESCALE_MIN as u32, PRESCALE_MAX as u32) as u8
    }
}

/// PCA9685 on an I2C bus
pub struct Pca9685<I2C> {
    i2c: I2C,
    address: u8,
    config: Pca9685Config,
}

impl<I2C: I2c> Pca9685<I2C> {
    pub fn new(i2c: I2C, address: u8, config: Pca9685Config) -> Self {
        Self {
            i2c,
            address,
            config,
        }
    }

    /// 7-bit bus address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Check the device answers at its address
    pub fn probe(&mut self) -> Result<(), BusError> {
        self.read_register(reg::MODE1).map(|_| ())
    }

    /// Reset, program the PWM frequency and enable register auto-increment
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), BusError> {
        self.write_register(reg::MODE1, mode1::RESTART)?;
        delay.delay_ms(RESET_MS);

        let awake = self.read_register(reg::MODE1)? & !(mode1::RESTART | mode1::SLEEP);
        self.write_register(reg::MODE1, awake | mode1::SLEEP)?;
        self.write_register(reg::PRESCALE, self.config.prescale())?;
        self.write_register(reg::MODE1, awake)?;
        delay.delay_us(WAKE_US);
        self.write_register(reg::MODE1, awake | mode1::RESTART | mode1::AUTO_INCREMENT)
    }

    /// Set a channel's raw ON/OFF counters
    pub fn set_pwm(&mut self, channel: u8, on: u16, off: u16) -> Result<(), BusError> {
        if channel as usize >= PINS_PER_BOARD {
            return Err(BusError::Other);
        }
        let [on_l, on_h] = on.to_le_bytes();
        let [off_l, off_h] = off.to_le_bytes();
        self.i2c
            .write(
                self.address,
                &[reg::LED0_ON_L + 4 * channel, on_l, on_h, off_l, off_h],
            )
            .map_err(bus_error)
    }

    /// Drive a channel
    pub fn set_output(&mut self, channel: u8, output: PwmOutput) -> Result<(), BusError> {
        match output {
            PwmOutput::Pulse(width) => self.set_pwm(channel, 0, width.min(COUNTS - 1)),
            PwmOutput::FullOn => self.set_pwm(channel, FULL, 0),
            PwmOutput::FullOff => self.set_pwm(channel, 0, FULL),
        }
    }

    fn read_register(&mut self, register: u8) -> Result<u8, BusError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .map_err(bus_error)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), BusError> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(bus_error)
    }
}

impl<I2C: I2c> ServoBank for Pca9685<I2C> {
    fn set_output(&mut self, channel: u8, output: PwmOutput) -> Result<(), BusError> {
        Pca9685::set_output(self, channel, output)
    }
}
