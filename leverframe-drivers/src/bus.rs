//! I2C error mapping

use embedded_hal::i2c::{Error, ErrorKind};
use leverframe_core::traits::BusError;

/// Map a HAL I2C error onto the core bus error
pub fn bus_error<E: Error>(err: E) -> BusError {
    match err.kind() {
        ErrorKind::NoAcknowledge(_) => BusError::Nack,
        ErrorKind::ArbitrationLoss => BusError::ArbitrationLost,
        ErrorKind::Bus => BusError::Bus,
        ErrorKind::Overrun => BusError::Overrun,
        _ => BusError::Other,
    }
}
