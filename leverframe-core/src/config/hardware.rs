//! Hardware topology
//!
//! The controller drives a fixed number of boards. Each board pairs a
//! 16-input switch expander with a 16-channel servo driver, and servo `n`
//! of a board is worked by switch `n` of the same board.

/// Number of switch-bank/servo-bank board pairs
pub const BOARD_COUNT: usize = 4;

/// Pins per switch bank and channels per servo bank
pub const PINS_PER_BOARD: usize = 16;

/// Total number of servo slots
pub const SERVO_COUNT: usize = BOARD_COUNT * PINS_PER_BOARD;

/// Servo PWM frequency
pub const DEFAULT_PWM_FREQUENCY_HZ: u16 = 50;

/// Servo driver internal oscillator frequency
pub const DEFAULT_OSCILLATOR_HZ: u32 = 27_000_000;

/// Highest commandable angle
pub const MAX_ANGLE: u8 = 180;

/// Per-degree step delays (ms) for the Point profile, indexed by speed
pub const POINT_SPEEDS_MS: [u8; 4] = [25, 30, 35, 40];

/// Per-degree step delays (ms) for the Sweep profile, indexed by speed
pub const SWEEP_SPEEDS_MS: [u8; 4] = [15, 25, 35, 45];

/// Location of one servo: board number and pin on that board
///
/// The linear index `board * 16 + pin` is the key into the configuration
/// store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoIndex {
    board: u8,
    pin: u8,
}

impl ServoIndex {
    /// Board 0, pin 0
    pub const FIRST: Self = Self { board: 0, pin: 0 };

    /// Create from a board/pin pair
    ///
    /// Returns `None` if either is outside the fixed topology.
    pub const fn new(board: u8, pin: u8) -> Option<Self> {
        if (board as usize) < BOARD_COUNT && (pin as usize) < PINS_PER_BOARD {
            Some(Self { board, pin })
        } else {
            None
        }
    }

    /// Create from a linear servo index (0..SERVO_COUNT)
    pub const fn from_linear(index: usize) -> Option<Self> {
        if index < SERVO_COUNT {
            Some(Self {
                board: (index / PINS_PER_BOARD) as u8,
                pin: (index % PINS_PER_BOARD) as u8,
            })
        } else {
            None
        }
    }

    /// Board number
    pub const fn board(&self) -> u8 {
        self.board
    }

    /// Pin (and servo channel) on the board
    pub const fn pin(&self) -> u8 {
        self.pin
    }

    /// Linear index into the configuration store
    pub const fn linear(&self) -> usize {
        self.board as usize * PINS_PER_BOARD + self.pin as usize
    }

    /// Next servo slot, wrapping from the last back to the first
    pub const fn next_wrapping(&self) -> Self {
        let next = (self.linear() + 1) % SERVO_COUNT;
        Self {
            board: (next / PINS_PER_BOARD) as u8,
            pin: (next % PINS_PER_BOARD) as u8,
        }
    }

    /// Previous servo slot, wrapping from the first back to the last
    pub const fn prev_wrapping(&self) -> Self {
        let prev = (self.linear() + SERVO_COUNT - 1) % SERVO_COUNT;
        Self {
            board: (prev / PINS_PER_BOARD) as u8,
            pin: (prev % PINS_PER_BOARD) as u8,
        }
    }
}

/// Servo pulse range in driver counts (out of 4096 per PWM period)
///
/// Angles map linearly from `0..=180` onto `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseRange {
    /// Counts for 0 degrees
    pub min: u16,
    /// Counts for 180 degrees
    pub max: u16,
}

impl Default for PulseRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PulseRange {
    /// Typical hobby servo range at 50 Hz
    pub const DEFAULT: Self = Self { min: 90, max: 440 };

    /// Map an angle to pulse counts
    ///
    /// Angles above 180 are clamped.
    pub fn angle_to_pulse(&self, angle: u8) -> u16 {
        let angle = angle.min(MAX_ANGLE) as i32;
        let min = self.min as i32;
        let max = self.max as i32;
        (min + (max - min) * angle / MAX_ANGLE as i32) as u16
    }
}

/// Look up the per-degree delay for a speed table, clamping the index
pub fn speed_delay_ms(table: &[u8; 4], speed: u8) -> u16 {
    table[(speed as usize).min(table.len() - 1)] as u16
}
