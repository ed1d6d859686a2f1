//! Analog input abstractions

/// A single analog input channel
///
/// Implementations sample the channel on demand. Conversion failures are
/// reported as `None` so callers can treat them like "no reading".
pub trait AnalogInput {
    /// Full-scale value of a conversion (e.g. 1023 for 10-bit, 4095 for 12-bit)
    fn full_scale(&self) -> u16;

    /// Perform a single blocking conversion
    fn read_raw(&mut self) -> Option<u16>;
}
