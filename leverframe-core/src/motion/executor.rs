//! Motion playback
//!
//! Plays a [`MotionPlan`](super::MotionPlan) on one channel of a servo bank, blocking on the
//! delay provider between degrees. Every sweep ends by switching the
//! channel fully off.

use embedded_hal::delay::DelayNs;

use super::profile::{plan, sweep_angles, toward_limit2, Phase};
use crate::config::{PulseRange, ServoConfig};
use crate::traits::{BusError, PwmOutput, ServoBank};

/// Plays motion plans using a blocking delay
pub struct MotionExecutor<D> {
    delay: D,
    pulses: PulseRange,
}

impl<D: DelayNs> MotionExecutor<D> {
    /// Create an executor with the given delay provider and pulse range
    pub fn new(delay: D, pulses: PulseRange) -> Self {
        Self { delay, pulses }
    }

    /// Pulse range used to convert angles
    pub fn pulses(&self) -> PulseRange {
        self.pulses
    }

    /// Move a servo in response to a switch level
    ///
    /// Does nothing for an unconfigured servo.
    pub fn drive<V: ServoBank>(
        &mut self,
        servos: &mut V,
        channel: u8,
        config: &ServoConfig,
        level: bool,
    ) -> Result<(), BusError> {
        let phases = plan(config, toward_limit2(level, config.swap));
        self.play(servos, channel, &phases)
    }

    /// Play a sequence of phases on one channel
    ///
    /// Stops at the first bus error; the channel is left as last written.
    pub fn play<V: ServoBank>(
        &mut self,
        servos: &mut V,
        channel: u8,
        phases: &[Phase],
    ) -> Result<(), BusError> {
        for phase in phases {
            match *phase {
                Phase::Sweep { from, to, step_ms } => {
                    self.sweep(servos, channel, from, to, step_ms)?
                }
                Phase::Pause { ms } => self.pause_ms(ms as u32),
                Phase::Switch { on } => {
                    let output = if on {
                        PwmOutput::FullOn
                    } else {
                        PwmOutput::FullOff
                    };
                    servos.set_output(channel, output)?
                }
            }
        }
        Ok(())
    }

    /// Step one degree at a time from `from` to `to`, then de-energise
    pub fn sweep<V: ServoBank>(
        &mut self,
        servos: &mut V,
        channel: u8,
        from: u8,
        to: u8,
        step_ms: u16,
    ) -> Result<(), BusError> {
        for angle in sweep_angles(from, to) {
            servos.set_output(channel, PwmOutput::Pulse(self.pulses.angle_to_pulse(angle)))?;
            self.delay.delay_ms(step_ms as u32);
        }
        servos.set_output(channel, PwmOutput::FullOff)
    }

    /// Command a single angle, hold it, then de-energise
    pub fn set_angle<V: ServoBank>(
        &mut self,
        servos: &mut V,
        channel: u8,
        angle: u8,
        hold_ms: u32,
    ) -> Result<(), BusError> {
        servos.set_output(channel, PwmOutput::Pulse(self.pulses.angle_to_pulse(angle)))?;
        self.delay.delay_ms(hold_ms);
        servos.set_output(channel, PwmOutput::FullOff)
    }

    /// Block for `ms` milliseconds
    pub fn pause_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
