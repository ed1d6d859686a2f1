//! Wrapping list cursor

use leverframe_core::traits::Key;

/// Highlighted item in a list of `count` items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuCursor {
    index: u8,
    count: u8,
}

impl MenuCursor {
    /// `initial` is clamped to the last item
    pub fn new(count: usize, initial: u8) -> Self {
        let count = count.clamp(1, u8::MAX as usize) as u8;
        Self {
            index: initial.min(count - 1),
            count,
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    /// Down moves to the next item, Up to the previous, both wrapping.
    /// Returns whether the highlight moved.
    pub fn on_key(&mut self, key: Key) -> bool {
        let before = self.index;
        match key {
            Key::Down => self.index = (self.index + 1) % self.count,
            Key::Up => self.index = self.index.checked_sub(1).unwrap_or(self.count - 1),
            _ => {}
        }
        self.index != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_both_ways() {
        let mut cursor = MenuCursor::new(4, 0);
        assert!(cursor.on_key(Key::Up));
        assert_eq!(cursor.index(), 3);
        assert!(cursor.on_key(Key::Down));
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut cursor = MenuCursor::new(2, 1);
        for key in [Key::None, Key::Left, Key::Right, Key::Select] {
            assert!(!cursor.on_key(key));
        }
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_initial_clamped() {
        assert_eq!(MenuCursor::new(2, 9).index(), 1);
        // A single-item list never moves
        let mut single = MenuCursor::new(1, 0);
        assert!(!single.on_key(Key::Down));
        assert_eq!(MenuCursor::new(0, 3).index(), 0);
    }
}
