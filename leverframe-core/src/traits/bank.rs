//! Switch bank and servo bank traits
//!
//! A board pairs one of each: the switch bank reports the state of 16
//! toggle switches as a bitmask, the servo bank drives 16 PWM channels.

/// Errors from bus-attached banks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Device did not acknowledge its address or data
    Nack,
    /// Lost arbitration on a multi-master bus
    ArbitrationLost,
    /// Bus error (misplaced start/stop condition)
    Bus,
    /// Data overrun
    Overrun,
    /// Other error
    Other,
}

/// Output state of one servo channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmOutput {
    /// Pulse of the given width in driver counts, each PWM period
    Pulse(u16),
    /// Output held permanently high
    FullOn,
    /// Output held permanently low (servo de-energised)
    FullOff,
}

/// Bank of 16 switch inputs
pub trait SwitchBank {
    /// Read all 16 inputs; bit `n` is pin `n`
    fn read_pins(&mut self) -> Result<u16, BusError>;
}

/// Bank of 16 servo outputs
pub trait ServoBank {
    /// Set the output of one channel (0-15)
    fn set_output(&mut self, channel: u8, output: PwmOutput) -> Result<(), BusError>;
}
