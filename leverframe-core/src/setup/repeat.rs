//! Held-key auto-repeat
//!
//! A key acts once when first seen, then nothing until it has been held
//! for [`REPEAT_HOLD_MS`], then on every poll until it is released.

use crate::traits::Key;

/// How long a key must be held before it starts repeating
pub const REPEAT_HOLD_MS: u32 = 500;

/// What a polled key should do this time round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Repeat {
    /// Nothing held, or held but not yet repeating
    Idle,
    /// First poll of a new press
    Press,
    /// Held past the repeat threshold
    Held,
}

impl Repeat {
    /// Whether the key should act this poll
    pub fn acts(self) -> bool {
        self != Repeat::Idle
    }
}

/// Tracks how long the current key has been held
#[derive(Debug, Clone, Default)]
pub struct KeyRepeat {
    held_since: Option<u32>,
}

impl KeyRepeat {
    /// Start with no key held
    pub fn new() -> Self {
        Self { held_since: None }
    }

    /// Feed the key read at `now_ms`
    pub fn poll(&mut self, key: Key, now_ms: u32) -> Repeat {
        if !key.is_pressed() {
            self.held_since = None;
            return Repeat::Idle;
        }

        match self.held_since {
            None => {
                self.held_since = Some(now_ms);
                Repeat::Press
            }
            Some(since) if now_ms.wrapping_sub(since) > REPEAT_HOLD_MS => Repeat::Held,
            Some(_) => Repeat::Idle,
        }
    }
}
