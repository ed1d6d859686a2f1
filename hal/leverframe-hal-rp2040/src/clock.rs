//! Millisecond clock on the embassy time driver

use embassy_time::Instant;
use leverframe_core::traits::Clock;

/// `Clock` reading `embassy_time::Instant`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping counter the trait expects
        Instant::now().as_millis() as u32
    }
}
