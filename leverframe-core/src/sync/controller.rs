//! Synchronization controller
//!
//! Called once per polling cycle. Takes at most one switch edge from the
//! board set, looks up the servo's configuration and plays its motion to
//! completion before returning. Switches wired to servos that were never
//! set up are ignored.

use embedded_hal::delay::DelayNs;

use crate::config::{ConfigStore, ServoConfig, ServoIndex};
use crate::motion::MotionExecutor;
use crate::switches::BoardSet;
use crate::traits::{BusError, ServoBank, SwitchBank};

/// What the controller did with a switch edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncAction {
    /// The servo's motion ran to completion
    Moved,
    /// The servo has no configuration; nothing was driven
    Unconfigured,
    /// The servo bank failed part way through the motion
    BusFault(BusError),
}

/// Outcome of one poll that saw a switch edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncEvent {
    /// Servo worked by the switch
    pub servo: ServoIndex,
    /// New switch level
    pub level: bool,
    /// What was done about it
    pub action: SyncAction,
}

/// Couples the switch monitor to motion playback
pub struct SyncController<S, V, D> {
    boards: BoardSet<S, V>,
    executor: MotionExecutor<D>,
}

impl<S, V, D> SyncController<S, V, D>
where
    S: SwitchBank,
    V: ServoBank,
    D: DelayNs,
{
    /// Take ownership of the detected boards and the motion player
    pub fn new(boards: BoardSet<S, V>, executor: MotionExecutor<D>) -> Self {
        Self { boards, executor }
    }

    /// Detected boards
    pub fn boards(&self) -> &BoardSet<S, V> {
        &self.boards
    }

    /// Service at most one switch edge
    ///
    /// Returns `None` straight away when no switch changed. Otherwise
    /// blocks for the full motion and reports what happened.
    pub fn poll(&mut self, store: &ConfigStore) -> Option<SyncEvent> {
        let edge = self.boards.detect_change()?;
        let config = store.get(edge.servo);

        let action = if !config.is_configured() {
            SyncAction::Unconfigured
        } else {
            match self.drive_servo(edge.servo, config, edge.level) {
                Ok(()) => SyncAction::Moved,
                Err(e) => SyncAction::BusFault(e),
            }
        };

        Some(SyncEvent {
            servo: edge.servo,
            level: edge.level,
            action,
        })
    }

    /// Play `config`'s motion for a switch level on one servo
    ///
    /// A servo on an absent board reports [`BusError::Nack`].
    pub fn drive_servo(
        &mut self,
        servo: ServoIndex,
        config: &ServoConfig,
        level: bool,
    ) -> Result<(), BusError> {
        let bank = self
            .boards
            .servo_bank(servo.board())
            .ok_or(BusError::Nack)?;
        self.executor.drive(bank, servo.pin(), config, level)
    }

    /// Command one servo to an angle, hold, then de-energise
    pub fn hold_angle(
        &mut self,
        servo: ServoIndex,
        angle: u8,
        hold_ms: u32,
    ) -> Result<(), BusError> {
        let bank = self
            .boards
            .servo_bank(servo.board())
            .ok_or(BusError::Nack)?;
        self.executor.set_angle(bank, servo.pin(), angle, hold_ms)
    }

    /// Block for `ms` milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.executor.pause_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServoType;
    use crate::mock::{outputs, pulses, total_delay_ms, Bench};
    use crate::traits::PwmOutput;

    fn servo(board: u8, pin: u8) -> ServoIndex {
        ServoIndex::new(board, pin).unwrap()
    }

    #[test]
    fn test_idle_poll_is_noop() {
        let bench = Bench::new();
        let mut sync = bench.controller();
        let store = ConfigStore::unconfigured();

        assert_eq!(sync.poll(&store), None);
        assert!(bench.log.borrow().is_empty());
    }

    #[test]
    fn test_blank_store_never_moves() {
        let bench = Bench::new();
        let mut sync = bench.controller();
        let store = ConfigStore::unconfigured();

        bench.pins[0].set(0xFFFF);
        for pin in 0..16 {
            let event = sync.poll(&store).unwrap();
            assert_eq!(event.servo, servo(0, pin));
            assert_eq!(event.action, SyncAction::Unconfigured);
        }
        assert_eq!(sync.poll(&store), None);
        assert!(bench.log.borrow().is_empty());
    }

    #[test]
    fn test_edge_moves_matching_servo() {
        let bench = Bench::new();
        let mut sync = bench.controller();
        let mut store = ConfigStore::unconfigured();
        *store.get_mut(servo(2, 4)) = ServoConfig::new(ServoType::Point, 10, 20);

        bench.pins[2].set(1 << 4);
        let event = sync.poll(&store).unwrap();

        assert_eq!(
            event,
            SyncEvent {
                servo: servo(2, 4),
                level: true,
                action: SyncAction::Moved,
            }
        );
        let written = outputs(&bench.log);
        assert!(written.iter().all(|&(b, c, _)| b == 2 && c == 4));
        assert_eq!(pulses(&bench.log).first(), Some(&10));
        assert_eq!(pulses(&bench.log).last(), Some(&20));
        assert_eq!(written.last(), Some(&(2, 4, PwmOutput::FullOff)));
    }

    #[test]
    fn test_switch_off_returns_to_limit1() {
        let bench = Bench::new();
        bench.pins[0].set(1);
        let mut sync = bench.controller();
        let mut store = ConfigStore::unconfigured();
        *store.get_mut(servo(0, 0)) = ServoConfig::new(ServoType::Sweep, 60, 50);

        bench.pins[0].set(0);
        let event = sync.poll(&store).unwrap();

        assert!(!event.level);
        assert_eq!(pulses(&bench.log).first(), Some(&50));
        assert_eq!(pulses(&bench.log).last(), Some(&60));
    }

    #[test]
    fn test_write_failure_reported() {
        let bench = Bench::new();
        let mut sync = bench.controller();
        let mut store = ConfigStore::unconfigured();
        *store.get_mut(servo(0, 1)) = ServoConfig::new(ServoType::OnOff, 0, 0);

        bench.write_fail.set(true);
        bench.pins[0].set(1 << 1);

        assert_eq!(
            sync.poll(&store).unwrap().action,
            SyncAction::BusFault(BusError::Nack)
        );
        // The edge is consumed either way
        assert_eq!(sync.poll(&store), None);
    }

    #[test]
    fn test_hold_angle() {
        let bench = Bench::new();
        let mut sync = bench.controller();

        sync.hold_angle(servo(2, 15), 90, 100).unwrap();

        assert_eq!(
            outputs(&bench.log).as_slice(),
            &[(2, 15, PwmOutput::Pulse(90)), (2, 15, PwmOutput::FullOff)]
        );
        assert_eq!(total_delay_ms(&bench.log), 100);
    }

    #[test]
    fn test_absent_board_reports_nack() {
        let bench = Bench::new();
        let mut sync = bench.controller();
        let config = ServoConfig::new(ServoType::Point, 0, 10);

        assert_eq!(sync.hold_angle(servo(1, 0), 90, 100), Err(BusError::Nack));
        assert_eq!(sync.drive_servo(servo(3, 0), &config, true), Err(BusError::Nack));
        assert!(bench.log.borrow().is_empty());
    }

    #[test]
    fn test_one_servo_per_poll() {
        let bench = Bench::new();
        let mut sync = bench.controller();
        let mut store = ConfigStore::unconfigured();
        *store.get_mut(servo(0, 2)) = ServoConfig::new(ServoType::OnOff, 0, 0);
        *store.get_mut(servo(0, 3)) = ServoConfig::new(ServoType::OnOff, 0, 0);

        bench.pins[0].set(0b1100);
        sync.poll(&store).unwrap();
        assert_eq!(outputs(&bench.log).as_slice(), &[(0, 2, PwmOutput::FullOn)]);

        sync.poll(&store).unwrap();
        assert_eq!(outputs(&bench.log).len(), 2);
        assert_eq!(outputs(&bench.log)[1], (0, 3, PwmOutput::FullOn));
    }
}
