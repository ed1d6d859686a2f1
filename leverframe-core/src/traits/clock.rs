//! Monotonic time source

/// Millisecond clock used for key auto-repeat timing
pub trait Clock {
    /// Milliseconds since an arbitrary epoch; wraps after ~49 days
    fn now_ms(&self) -> u32;
}
