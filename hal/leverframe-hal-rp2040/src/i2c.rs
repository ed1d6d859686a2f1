//! One I2C bus shared by several blocking drivers
//!
//! The bus lives in a critical-section mutex; each handle locks it for
//! the length of one transaction. All I2C traffic happens on the single
//! controller task, so the lock is never contended.

use core::cell::RefCell;

use embassy_embedded_hal::shared_bus::blocking::i2c::I2cDevice;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Bus storage the handles borrow
pub type I2cBus<BUS> = Mutex<CriticalSectionRawMutex, RefCell<BUS>>;

/// Handle to a shared bus, used by one driver
pub type SharedI2c<'a, BUS> = I2cDevice<'a, CriticalSectionRawMutex, BUS>;
