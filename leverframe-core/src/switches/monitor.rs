//! Switch bank monitor
//!
//! Polls every present board, compares the live switch word against the
//! last one seen, and reports at most one changed pin per poll. When several
//! pins flip between polls, they come out one per call, lowest board and
//! lowest pin first, so the caller only ever moves one servo at a time.

use crate::config::{ServoIndex, BOARD_COUNT, PINS_PER_BOARD};
use crate::traits::{SwitchBank, ServoBank};

/// A single switch that changed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchEdge {
    /// Servo worked by the switch
    pub servo: ServoIndex,
    /// New switch level (true = input reads high)
    pub level: bool,
}

/// One detected board: its two peripherals and the last switch snapshot
pub struct BoardState<S, V> {
    switches: S,
    servos: V,
    last_pins: u16,
}

impl<S: SwitchBank, V: ServoBank> BoardState<S, V> {
    /// Take ownership of a detected board and snapshot its switches
    ///
    /// Fails if the switch bank cannot be read, in which case the board
    /// counts as absent.
    pub fn new(mut switches: S, servos: V) -> Option<Self> {
        let last_pins = switches.read_pins().ok()?;
        Some(Self {
            switches,
            servos,
            last_pins,
        })
    }

    /// Last switch word seen by the monitor
    pub fn last_pins(&self) -> u16 {
        self.last_pins
    }

    /// The board's servo bank
    pub fn servos(&mut self) -> &mut V {
        &mut self.servos
    }

    /// Poll this board for its first changed pin
    fn poll(&mut self) -> Option<(u8, bool)> {
        let pins = self.switches.read_pins().ok()?;
        let diff = pins ^ self.last_pins;
        if diff == 0 {
            return None;
        }

        let pin = diff.trailing_zeros() as u8;
        let mask = 1u16 << pin;
        self.last_pins ^= mask;
        Some((pin, pins & mask != 0))
    }
}

/// All board slots; absent boards stay absent for the process lifetime
pub struct BoardSet<S, V> {
    boards: [Option<BoardState<S, V>>; BOARD_COUNT],
}

impl<S: SwitchBank, V: ServoBank> BoardSet<S, V> {
    /// Build from the detection results of each board slot
    ///
    /// A slot is present only if both peripherals were detected and the
    /// initial switch read succeeded.
    pub fn new(detected: [Option<(S, V)>; BOARD_COUNT]) -> Self {
        Self {
            boards: detected.map(|slot| slot.and_then(|(s, v)| BoardState::new(s, v))),
        }
    }

    /// A set with no boards present
    pub fn empty() -> Self {
        Self {
            boards: core::array::from_fn(|_| None),
        }
    }

    /// Whether a board slot has a detected board
    pub fn is_present(&self, board: u8) -> bool {
        matches!(self.boards.get(board as usize), Some(Some(_)))
    }

    /// Number of present boards
    pub fn present_count(&self) -> usize {
        self.boards.iter().filter(|b| b.is_some()).count()
    }

    /// Last observed level of one switch, or `None` if its board is absent
    pub fn pin_level(&self, servo: ServoIndex) -> Option<bool> {
        self.board(servo.board())
            .map(|b| b.last_pins() & (1 << servo.pin()) != 0)
    }

    /// Servo bank of a present board
    pub fn servo_bank(&mut self, board: u8) -> Option<&mut V> {
        self.boards
            .get_mut(board as usize)
            .and_then(|b| b.as_mut())
            .map(|b| b.servos())
    }

    /// Report the first switch that changed since the last call
    ///
    /// Boards are scanned in order, board 0 first, pins 0-15 within a
    /// board. Only the reported pin is recorded as seen; other changes are
    /// picked up by later calls. A board whose read fails is skipped for
    /// this call.
    pub fn detect_change(&mut self) -> Option<SwitchEdge> {
        for (board, slot) in self.boards.iter_mut().enumerate() {
            let Some(state) = slot.as_mut() else {
                continue;
            };
            if let Some((pin, level)) = state.poll() {
                debug_assert!((pin as usize) < PINS_PER_BOARD);
                let servo = ServoIndex::new(board as u8, pin)?;
                return Some(SwitchEdge { servo, level });
            }
        }
        None
    }

    fn board(&self, board: u8) -> Option<&BoardState<S, V>> {
        self.boards.get(board as usize).and_then(|b| b.as_ref())
    }
}
