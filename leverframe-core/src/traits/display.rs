//! Character display trait for the operator panel

/// Errors that can occur talking to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Failed to drive a control or data line
    Pin,
    /// Cursor position outside the display
    OutOfRange,
}

/// Trait for text-mode character displays (HD44780 and compatibles)
pub trait CharDisplay {
    /// Display size as (columns, rows)
    fn size(&self) -> (u8, u8);

    /// Clear the screen and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `col`: Column number (0-based)
    /// - `row`: Row number (0-based)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write ASCII text at the cursor, advancing it
    fn write_str(&mut self, text: &str) -> Result<(), DisplayError>;
}

/// Helper trait for drawing whole lines
pub trait CharDisplayExt: CharDisplay {
    /// Write `text` at the start of `row` and blank the rest of the row
    fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        let (cols, _) = self.size();
        self.set_cursor(0, row)?;

        let len = text.len().min(cols as usize);
        self.write_str(&text[..len])?;
        for _ in len..cols as usize {
            self.write_str(" ")?;
        }
        Ok(())
    }
}

// Blanket implementation for all CharDisplay types
impl<T: CharDisplay> CharDisplayExt for T {}
