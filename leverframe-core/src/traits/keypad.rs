//! Keypad trait
//!
//! The operator panel has five buttons. Reading is either a snapshot of the
//! button currently held, or a blocking read that waits for the button to
//! be released and reports which one it was.

/// Keypad buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// No button pressed
    #[default]
    None,
    /// Left button
    Left,
    /// Right button
    Right,
    /// Up button
    Up,
    /// Down button
    Down,
    /// Select button
    Select,
}

impl Key {
    /// Whether a button is pressed
    pub fn is_pressed(self) -> bool {
        self != Key::None
    }
}

/// Source of key presses
pub trait Keypad {
    /// Read the keypad
    ///
    /// With `blocking = false`, returns the button held right now.
    /// With `blocking = true`, waits while a button is held and returns it
    /// once released (`Key::None` straight away if nothing is held).
    fn read_key(&mut self, blocking: bool) -> Key;
}
