//! Test doubles for the panel

use core::cell::Cell;

use heapless::Deque;
use leverframe_core::traits::{CharDisplay, Clock, DisplayError, Key, Keypad};

use crate::screen::{SCREEN_COLS, SCREEN_ROWS};

/// In-memory 16x2 character display
pub struct TextDisplay {
    cells: [[u8; SCREEN_COLS]; SCREEN_ROWS],
    cursor: (usize, usize),
    pub cursor_moves: usize,
    pub fail: bool,
}

impl TextDisplay {
    pub fn new() -> Self {
        Self {
            cells: [[b' '; SCREEN_COLS]; SCREEN_ROWS],
            cursor: (0, 0),
            cursor_moves: 0,
            fail: false,
        }
    }

    pub fn row(&self, row: usize) -> &str {
        core::str::from_utf8(&self.cells[row]).unwrap_or("")
    }
}

impl CharDisplay for TextDisplay {
    fn size(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Pin);
        }
        self.cells = [[b' '; SCREEN_COLS]; SCREEN_ROWS];
        self.cursor = (0, 0);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Pin);
        }
        self.cursor = (col as usize, row as usize);
        self.cursor_moves += 1;
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Pin);
        }
        for byte in text.bytes() {
            let (col, row) = self.cursor;
            if col < SCREEN_COLS && row < SCREEN_ROWS {
                self.cells[row][col] = byte;
            }
            self.cursor.0 += 1;
        }
        Ok(())
    }
}

/// Keypad playing back a script
///
/// Snapshot reads return Select once the script is exhausted. A blocking
/// read consumes held keys up to and including the next release.
pub struct ScriptedKeys {
    keys: Deque<Key, 256>,
}

impl ScriptedKeys {
    pub fn new(keys: &[Key]) -> Self {
        let mut script = Deque::new();
        for &key in keys {
            let _ = script.push_back(key);
        }
        Self { keys: script }
    }
}

impl Keypad for ScriptedKeys {
    fn read_key(&mut self, blocking: bool) -> Key {
        if !blocking {
            return self.keys.pop_front().unwrap_or(Key::Select);
        }
        let mut held = Key::None;
        while let Some(key) = self.keys.pop_front() {
            if !key.is_pressed() {
                break;
            }
            held = key;
        }
        held
    }
}

/// Clock that advances a fixed step on every read
pub struct StepClock {
    now: Cell<u32>,
    step: u32,
}

impl StepClock {
    pub fn new(step: u32) -> Self {
        Self {
            now: Cell::new(0),
            step,
        }
    }
}

impl Clock for StepClock {
    fn now_ms(&self) -> u32 {
        self.now.set(self.now.get().wrapping_add(self.step));
        self.now.get()
    }
}
