//! MCP23017 16-bit I/O expander (switch bank)
//!
//! All 16 pins are inputs with the internal 100k pull-ups enabled, so an
//! open toggle switch reads high and a closed one (to ground) reads low.
//!
//! # Register layout
//!
//! The device powers up with `IOCON.BANK = 0`, so each A/B register pair is
//! adjacent and sequential access walks A then B.

use embedded_hal::i2c::I2c;
use leverframe_core::traits::{BusError, SwitchBank};

use crate::bus::bus_error;

/// MCP23017 register addresses (BANK = 0)
pub mod reg {
    /// Port A direction (1 = input)
    pub const IODIRA: u8 = 0x00;
    /// Port B direction
    pub const IODIRB: u8 = 0x01;
    /// Port A pull-up enable
    pub const GPPUA: u8 = 0x0C;
    /// Port B pull-up enable
    pub const GPPUB: u8 = 0x0D;
    /// Port A input level
    pub const GPIOA: u8 = 0x12;
    /// Port B input level
    pub const GPIOB: u8 = 0x13;
}

/// Address with A2..A0 tied low
pub const BASE_ADDRESS: u8 = 0x20;

/// MCP23017 on an I2C bus
pub struct Mcp23017<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Mcp23017<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
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
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg::IODIRA], &mut buf)
            .map_err(bus_error)
    }

    /// Make every pin an input with pull-up
    pub fn init(&mut self) -> Result<(), BusError> {
        self.i2c
            .write(self.address, &[reg::IODIRA, 0xFF, 0xFF])
            .map_err(bus_error)?;
        self.i2c
            .write(self.address, &[reg::GPPUA, 0xFF, 0xFF])
            .map_err(bus_error)
    }

    /// Read all 16 inputs; bits 0-7 are port A, bits 8-15 port B
    pub fn read_pins(&mut self) -> Result<u16, BusError> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg::GPIOA], &mut buf)
            .map_err(bus_error)?;
        Ok(u16::from_le_bytes(buf))
    }
}

impl<I2C: I2c> SwitchBank for Mcp23017<I2C> {
    fn read_pins(&mut self) -> Result<u16, BusError> {
        Mcp23017::read_pins(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RegisterDevice;

    #[test]
    fn test_init_sets_inputs_and_pullups() {
        let mut mcp = Mcp23017::new(RegisterDevice::new(0x21), 0x21);
        mcp.init().unwrap();

        let dev = mcp.release();
        assert_eq!(dev.last_write(reg::IODIRA), Some(0xFF));
        assert_eq!(dev.last_write(reg::IODIRB), Some(0xFF));
        assert_eq!(dev.last_write(reg::GPPUA), Some(0xFF));
        assert_eq!(dev.last_write(reg::GPPUB), Some(0xFF));
    }

    #[test]
    fn test_read_pins_port_order() {
        let mut dev = RegisterDevice::new(BASE_ADDRESS);
        dev.regs[reg::GPIOA as usize] = 0x34;
        dev.regs[reg::GPIOB as usize] = 0x12;

        let mut mcp = Mcp23017::new(dev, BASE_ADDRESS);
        assert_eq!(mcp.read_pins(), Ok(0x1234));
    }

    #[test]
    fn test_probe() {
        let mut present = Mcp23017::new(RegisterDevice::new(0x20), 0x20);
        assert!(present.probe().is_ok());

        let mut wrong_address = Mcp23017::new(RegisterDevice::new(0x20), 0x22);
        assert_eq!(wrong_address.probe(), Err(BusError::Nack));

        let mut absent = Mcp23017::new(RegisterDevice::absent(0x20), 0x20);
        assert_eq!(absent.probe(), Err(BusError::Nack));
    }

    #[test]
    fn test_switch_bank_trait() {
        fn read(bank: &mut impl SwitchBank) -> Result<u16, BusError> {
            bank.read_pins()
        }

        let mut dev = RegisterDevice::new(0x23);
        dev.regs[reg::GPIOA as usize] = 0x01;
        assert_eq!(read(&mut Mcp23017::new(dev, 0x23)), Ok(1));

        let absent = RegisterDevice::absent(0x23);
        assert_eq!(read(&mut Mcp23017::new(absent, 0x23)), Err(BusError::Nack));
    }
}
