//! Flash storage driver for RP2040
//!
//! The configuration lives at the start of the last 64KB of flash.
//! Writes rewrite every 4KB sector they touch (read, patch, erase,
//! program) and skip sectors whose contents would not change.
//!
//! Implements the `ConfigStorage` trait from `leverframe-hal`.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use leverframe_hal::{ConfigStorage, StorageError};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const CONFIG_PARTITION_SIZE: usize = 64 * 1024; // 64KB for config
pub const CONFIG_PARTITION_START: usize = FLASH_SIZE - CONFIG_PARTITION_SIZE;

/// RP2040 flash-backed configuration storage
pub struct Rp2040ConfigStorage<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
}

impl<'d> Rp2040ConfigStorage<'d> {
    /// Create a new flash storage instance
    pub fn new(flash: Peri<'d, FLASH>) -> Self {
        Self {
            flash: Flash::new_blocking(flash),
        }
    }

    fn check(offset: usize, len: usize) -> Result<usize, StorageError> {
        let end = offset.checked_add(len).ok_or(StorageError::OutOfBounds)?;
        if end > CONFIG_PARTITION_SIZE {
            return Err(StorageError::OutOfBounds);
        }
        Ok(end)
    }

    fn absolute(offset: usize) -> u32 {
        (CONFIG_PARTITION_START + offset) as u32
    }
}

impl ConfigStorage for Rp2040ConfigStorage<'_> {
    fn capacity(&self) -> usize {
        CONFIG_PARTITION_SIZE
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        Self::check(offset, buffer.len())?;
        self.flash
            .blocking_read(Self::absolute(offset), buffer)
            .map_err(|_| StorageError::Flash)
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        let end = Self::check(offset, data.len())?;
        let mut sector = [0u8; ERASE_SIZE];
        let mut start = offset / ERASE_SIZE * ERASE_SIZE;

        while start < end {
            let addr = Self::absolute(start);
            self.flash
                .blocking_read(addr, &mut sector)
                .map_err(|_| StorageError::Flash)?;

            let lo = offset.max(start);
            let hi = end.min(start + ERASE_SIZE);
            let patch = &data[lo - offset..hi - offset];
            let target = &mut sector[lo - start..hi - start];

            if target != patch {
                target.copy_from_slice(patch);
                self.flash
                    .blocking_erase(addr, addr + ERASE_SIZE as u32)
                    .map_err(|_| StorageError::Flash)?;
                self.flash
                    .blocking_write(addr, &sector)
                    .map_err(|_| StorageError::Flash)?;
            }
            start += ERASE_SIZE;
        }
        Ok(())
    }
}
