//! Back-and-forth scrolling for titles wider than the display

use crate::screen::SCREEN_COLS;

/// Pause at either end before scrolling the other way
pub const END_PAUSE_MS: u32 = 1000;

/// Time per character while scrolling
pub const STEP_MS: u32 = 500;

/// Scroll position of a title that may not fit on one row
#[derive(Debug, Clone)]
pub struct TitleScroller {
    /// Furthest offset, zero if the title fits
    max_offset: u8,
    offset: u8,
    forward: bool,
    next_at: u32,
}

impl TitleScroller {
    /// Start at offset 0, holding for [`END_PAUSE_MS`]
    pub fn new(title_len: usize, now_ms: u32) -> Self {
        Self {
            max_offset: title_len.saturating_sub(SCREEN_COLS).min(u8::MAX as usize) as u8,
            offset: 0,
            forward: true,
            next_at: now_ms.wrapping_add(END_PAUSE_MS),
        }
    }

    /// First visible character
    pub fn offset(&self) -> usize {
        self.offset as usize
    }

    /// Advance if the step time has passed; returns the new offset when it moved
    pub fn tick(&mut self, now_ms: u32) -> Option<usize> {
        if self.max_offset == 0 || (now_ms.wrapping_sub(self.next_at) as i32) <= 0 {
            return None;
        }

        if self.forward {
            self.offset += 1;
        } else {
            self.offset -= 1;
        }

        let at_end = self.offset == self.max_offset || self.offset == 0;
        if at_end {
            self.forward = !self.forward;
        }
        let wait = if at_end { END_PAUSE_MS } else { STEP_MS };
        self.next_at = now_ms.wrapping_add(wait);
        Some(self.offset())
    }
}
