//! HD44780 character LCD in 4-bit mode
//!
//! Write-only: RW is tied low, so every command waits out its worst-case
//! execution time instead of polling the busy flag.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use leverframe_core::traits::{CharDisplay, DisplayError};

/// HD44780 commands
mod cmd {
    pub const CLEAR: u8 = 0x01;
    /// Entry mode: increment, no shift
    pub const ENTRY_MODE: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// 4-bit bus, 2 lines, 5x8 font
    pub const FUNCTION_SET: u8 = 0x28;
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

const POWER_ON_MS: u32 = 50;
const CLEAR_US: u32 = 2_000;
const COMMAND_US: u32 = 50;

/// HD44780 wired as RS, EN and D4..D7
pub struct Hd44780<P, D> {
    rs: P,
    en: P,
    data: [P; 4],
    delay: D,
    cols: u8,
    rows: u8,
}

impl<P: OutputPin, D: DelayNs> Hd44780<P, D> {
    /// Driver for a 16x2 module
    pub fn new(rs: P, en: P, data: [P; 4], delay: D) -> Self {
        Self::with_size(rs, en, data, delay, 16, 2)
    }

    pub fn with_size(rs: P, en: P, data: [P; 4], delay: D, cols: u8, rows: u8) -> Self {
        Self {
            rs,
            en,
            data,
            delay,
            cols,
            rows: rows.min(ROW_OFFSETS.len() as u8),
        }
    }

    /// Bring the controller from power-on into 4-bit mode and clear it
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(POWER_ON_MS);
        self.rs.set_low().map_err(|_| DisplayError::Pin)?;
        self.en.set_low().map_err(|_| DisplayError::Pin)?;

        // Three 8-bit function sets, then switch to 4-bit
        self.write_nibble(0x3)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x3)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x3)?;
        self.delay.delay_us(150);
        self.write_nibble(0x2)?;
        self.delay.delay_us(COMMAND_US);

        self.command(cmd::FUNCTION_SET)?;
        self.command(cmd::DISPLAY_ON)?;
        self.clear()?;
        self.command(cmd::ENTRY_MODE)
    }

    fn command(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.rs.set_low().map_err(|_| DisplayError::Pin)?;
        self.write_byte(byte)
    }

    fn data(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.rs.set_high().map_err(|_| DisplayError::Pin)?;
        self.write_byte(byte)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.write_nibble(byte >> 4)?;
        self.write_nibble(byte & 0x0F)?;
        self.delay.delay_us(COMMAND_US);
        Ok(())
    }

    /// Present a nibble on D4..D7 and latch it on EN's falling edge
    fn write_nibble(&mut self, nibble: u8) -> Result<(), DisplayError> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            let result = if nibble & (1 << bit) != 0 {
                pin.set_high()
            } else {
                pin.set_low()
            };
            result.map_err(|_| DisplayError::Pin)?;
        }

        self.en.set_high().map_err(|_| DisplayError::Pin)?;
        self.delay.delay_us(1);
        self.en.set_low().map_err(|_| DisplayError::Pin)?;
        self.delay.delay_us(1);
        Ok(())
    }
}

impl<P: OutputPin, D: DelayNs> CharDisplay for Hd44780<P, D> {
    fn size(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR)?;
        self.delay.delay_us(CLEAR_US);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col >= self.cols || row >= self.rows {
            return Err(DisplayError::OutOfRange);
        }
        self.command(cmd::SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        for c in text.chars() {
            let byte = if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                b'?'
            };
            self.data(byte)?;
        }
        Ok(())
    }
}
