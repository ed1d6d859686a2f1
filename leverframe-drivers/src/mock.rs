//! Register-file I2C device for driver tests

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use heapless::Vec;

/// One device on a fake bus, addressed by register pointer
///
/// The first byte of a write sets the pointer; further bytes are stored
/// with auto-increment. Reads return bytes from the pointer onward.
pub struct RegisterDevice {
    pub address: u8,
    pub regs: [u8; 256],
    pub present: bool,
    /// `(register, value)` for every byte written
    pub writes: Vec<(u8, u8), 256>,
    pointer: u8,
}

impl RegisterDevice {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            regs: [0; 256],
            present: true,
            writes: Vec::new(),
            pointer: 0,
        }
    }

    pub fn absent(address: u8) -> Self {
        Self {
            present: false,
            ..Self::new(address)
        }
    }

    /// Last value written to a register, if any
    pub fn last_write(&self, register: u8) -> Option<u8> {
        self.writes
            .iter()
            .rev()
            .find(|(r, _)| *r == register)
            .map(|(_, v)| *v)
    }
}

impl ErrorType for RegisterDevice {
    type Error = ErrorKind;
}

impl I2c for RegisterDevice {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if !self.present || address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    let Some((&pointer, data)) = bytes.split_first() else {
                        continue;
                    };
                    self.pointer = pointer;
                    for &byte in data {
                        self.regs[self.pointer as usize] = byte;
                        let _ = self.writes.push((self.pointer, byte));
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.regs[self.pointer as usize];
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Delay that returns at once and counts what was asked for
#[derive(Default)]
pub struct CountingDelay {
    pub total_ns: u64,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
