//! Motion profiles
//!
//! Turns a servo configuration and a direction into a short list of
//! phases: sweeps between angles at a fixed per-degree delay, pauses, and
//! plain on/off outputs. Planning is pure; [`super::executor`] plays the
//! plan back on a servo bank.

use heapless::Vec;

use crate::config::{
    speed_delay_ms, ServoConfig, ServoType, MAX_ANGLE, POINT_SPEEDS_MS, SWEEP_SPEEDS_MS,
};

/// Semaphore per-degree delay when raising the arm (toward limit 2)
pub const SEMAPHORE_RAISE_MS: u16 = 20;

/// Semaphore per-degree delay when dropping the arm (toward limit 1)
pub const SEMAPHORE_DROP_MS: u16 = 35;

/// Per-degree delay of each bounce leg
pub const BOUNCE_STEP_MS: u16 = 15;

/// Pause at the halfway point of a hesitating drop
pub const HESITATE_PAUSE_MS: u16 = 200;

/// Bounce amplitude is the span divided by this
pub const BOUNCE_DIVISOR: i16 = 5;

/// Maximum phases in any plan (raise + two out-and-back bounces)
pub const MAX_PHASES: usize = 6;

/// One step of a motion plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Move one degree at a time from `from` to `to` (inclusive),
    /// waiting `step_ms` after each degree, then de-energise
    Sweep { from: u8, to: u8, step_ms: u16 },
    /// Wait without changing the output
    Pause { ms: u16 },
    /// Drive the output fully on or fully off
    Switch { on: bool },
}

/// Ordered phases for one switch edge
pub type MotionPlan = Vec<Phase, MAX_PHASES>;

/// Which limit a switch edge drives the servo toward
///
/// The switch level and the swap flag are combined by exclusive-or.
pub fn toward_limit2(level: bool, swap: bool) -> bool {
    level ^ swap
}

/// Build the plan for moving `config`'s servo
///
/// Unconfigured servos get an empty plan.
pub fn plan(config: &ServoConfig, toward_limit2: bool) -> MotionPlan {
    let mut phases = MotionPlan::new();
    let l1 = config.limit1;
    let l2 = config.limit2;

    // Capacity is sized for the longest profile below
    let mut push = |phase| {
        let _ = phases.push(phase);
    };

    match (config.servo_type, toward_limit2) {
        (ServoType::Unconfigured, _) => {}

        (ServoType::Point, forward) => {
            let step_ms = speed_delay_ms(&POINT_SPEEDS_MS, config.speed);
            push(direct(l1, l2, forward, step_ms));
        }

        (ServoType::Sweep, forward) => {
            let step_ms = speed_delay_ms(&SWEEP_SPEEDS_MS, config.speed);
            push(direct(l1, l2, forward, step_ms));
        }

        (ServoType::Semaphore, true) => {
            push(sweep(l1, l2, SEMAPHORE_RAISE_MS));
            if config.bounce {
                let mut amplitude = span(l1, l2) / BOUNCE_DIVISOR;
                for _ in 0..2 {
                    let peak = offset(l2, -amplitude);
                    push(sweep(l2, peak, BOUNCE_STEP_MS));
                    push(sweep(peak, l2, BOUNCE_STEP_MS));
                    amplitude /= 2;
                }
            }
        }

        (ServoType::Semaphore, false) => {
            if config.hesitate {
                let halfway = offset(l2, -(span(l1, l2) / 2));
                push(sweep(l2, halfway, SEMAPHORE_DROP_MS));
                push(Phase::Pause {
                    ms: HESITATE_PAUSE_MS,
                });
                push(sweep(halfway, l1, SEMAPHORE_DROP_MS));
            } else {
                push(sweep(l2, l1, SEMAPHORE_DROP_MS));
            }
        }

        (ServoType::OnOff, on) => push(Phase::Switch { on }),
    }

    phases
}

/// Angles commanded by a sweep, in order
///
/// Always yields at least one angle; `from == to` yields just `from`.
pub fn sweep_angles(from: u8, to: u8) -> SweepAngles {
    SweepAngles {
        next: Some(from),
        to,
    }
}

/// Iterator returned by [`sweep_angles`]
#[derive(Debug, Clone)]
pub struct SweepAngles {
    next: Option<u8>,
    to: u8,
}

impl Iterator for SweepAngles {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let current = self.next?;
        self.next = match current.cmp(&self.to) {
            core::cmp::Ordering::Less => Some(current + 1),
            core::cmp::Ordering::Greater => Some(current - 1),
            core::cmp::Ordering::Equal => None,
        };
        Some(current)
    }
}

fn direct(l1: u8, l2: u8, forward: bool, step_ms: u16) -> Phase {
    if forward {
        sweep(l1, l2, step_ms)
    } else {
        sweep(l2, l1, step_ms)
    }
}

fn sweep(from: u8, to: u8, step_ms: u16) -> Phase {
    Phase::Sweep { from, to, step_ms }
}

/// Signed distance from limit 1 to limit 2
fn span(l1: u8, l2: u8) -> i16 {
    l2 as i16 - l1 as i16
}

/// `angle + delta`, kept within 0..=180
fn offset(angle: u8, delta: i16) -> u8 {
    (angle as i16 + delta).clamp(0, MAX_ANGLE as i16) as u8
}
