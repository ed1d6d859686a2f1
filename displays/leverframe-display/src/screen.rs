//! Screen buffer types
//!
//! Provides a character-based screen buffer for the 16x2 panel.

use heapless::String;
use leverframe_core::traits::{CharDisplay, CharDisplayExt, DisplayError};

/// Number of character rows on the panel
pub const SCREEN_ROWS: usize = 2;

/// Number of character columns on the panel
pub const SCREEN_COLS: usize = 16;

/// Screen buffer for text-mode displays
///
/// Rows are redrawn on the next [`Screen::render`] only if their text
/// changed since the last one.
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [String<SCREEN_COLS>; SCREEN_ROWS],
    /// Rows that need redrawing
    dirty: [bool; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            dirty: [true; SCREEN_ROWS],
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for row in 0..SCREEN_ROWS {
            self.set_line(row, "");
        }
    }

    /// Set the content of a row, truncated to the screen width
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };

        let mut next: String<SCREEN_COLS> = String::new();
        for c in text.chars() {
            if next.push(c).is_err() {
                break;
            }
        }
        if *line != next {
            *line = next;
            self.dirty[row] = true;
        }
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Check if any row needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty.iter().any(|&d| d)
    }

    /// Draw changed rows
    ///
    /// A row stays dirty if drawing it failed.
    pub fn render<D: CharDisplay>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        for (row, line) in self.lines.iter().enumerate() {
            if self.dirty[row] {
                display.write_line(row as u8, line)?;
                self.dirty[row] = false;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[{}, {}]", self.lines[0].as_str(), self.lines[1].as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::TextDisplay;

    #[test]
    fn test_truncates_to_width() {
        let mut screen = Screen::new();
        screen.set_line(0, "Existing Setup - Overwrite?");
        assert_eq!(screen.get_line(0), Some("Existing Setup -"));
        assert_eq!(screen.get_line(2), None);
    }

    #[test]
    fn test_render_only_changed_rows() {
        let mut screen = Screen::new();
        let mut display = TextDisplay::new();

        screen.set_line(0, "Select Servo #");
        screen.set_line(1, "12");
        screen.render(&mut display).unwrap();
        assert_eq!(display.row(0), "Select Servo #  ");
        assert_eq!(display.row(1), "12              ");
        assert_eq!(display.cursor_moves, 2);

        screen.set_line(0, "Select Servo #");
        screen.set_line(1, "13");
        assert!(screen.is_dirty());
        screen.render(&mut display).unwrap();
        assert_eq!(display.row(1), "13              ");
        assert_eq!(display.cursor_moves, 3);
        assert!(!screen.is_dirty());
    }

    #[test]
    fn test_failed_render_stays_dirty() {
        let mut screen = Screen::new();
        let mut display = TextDisplay::new();
        display.fail = true;

        screen.set_line(0, "Swapped");
        assert_eq!(screen.render(&mut display), Err(DisplayError::Pin));
        assert!(screen.is_dirty());

        display.fail = false;
        screen.render(&mut display).unwrap();
        assert_eq!(display.row(0), "Swapped         ");
    }
}
