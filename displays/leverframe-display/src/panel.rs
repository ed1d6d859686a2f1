//! Operator panel: menus and notices on a character LCD
//!
//! Row 0 shows the title (scrolling if too wide), row 1 the highlighted
//! item. The menu loop never blocks, so the owner's `Dwell` callback runs
//! on every pass and switch edges keep being serviced while a menu is up.

use leverframe_core::traits::{CharDisplay, Clock, DisplayError, Key, Keypad, Menu, MenuEvent};

use crate::cursor::MenuCursor;
use crate::screen::Screen;
use crate::scroll::TitleScroller;

/// Character LCD, keypad and clock working as one panel
pub struct OperatorPanel<D, K, C> {
    display: D,
    keypad: K,
    clock: C,
    screen: Screen,
    fault: Option<DisplayError>,
}

impl<D, K, C> OperatorPanel<D, K, C>
where
    D: CharDisplay,
    K: Keypad,
    C: Clock,
{
    pub fn new(display: D, keypad: K, clock: C) -> Self {
        Self {
            display,
            keypad,
            clock,
            screen: Screen::new(),
            fault: None,
        }
    }

    /// What the panel currently shows
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Last display error since the previous call
    ///
    /// Menus keep working when the display fails; the firmware decides
    /// whether to report it.
    pub fn take_fault(&mut self) -> Option<DisplayError> {
        self.fault.take()
    }

    pub fn release(self) -> (D, K, C) {
        (self.display, self.keypad, self.clock)
    }

    fn refresh(&mut self) {
        if let Err(e) = self.screen.render(&mut self.display) {
            self.fault = Some(e);
        }
    }
}

impl<D, K, C> Menu for OperatorPanel<D, K, C>
where
    D: CharDisplay,
    K: Keypad,
    C: Clock,
{
    fn show(
        &mut self,
        title: &str,
        items: &[&str],
        initial: u8,
        on_event: &mut dyn FnMut(MenuEvent),
    ) -> u8 {
        let mut cursor = MenuCursor::new(items.len(), initial);
        let item = |cursor: &MenuCursor| items.get(cursor.index() as usize).copied().unwrap_or("");

        self.screen.set_line(0, title);
        self.screen.set_line(1, item(&cursor));
        self.refresh();

        // A key still held from the previous screen must not act here
        self.keypad.read_key(true);

        let mut scroller = TitleScroller::new(title.len(), self.clock.now_ms());
        // Treated as held so the first idle read streams the initial item
        let mut last = Key::Select;

        loop {
            if let Some(offset) = scroller.tick(self.clock.now_ms()) {
                self.screen.set_line(0, title.get(offset..).unwrap_or(""));
            }

            let key = self.keypad.read_key(false);
            if key != last {
                cursor.on_key(key);
                self.screen.set_line(1, item(&cursor));
                last = key;
                if key == Key::None {
                    on_event(MenuEvent::Highlight(cursor.index()));
                }
            }
            self.refresh();

            on_event(MenuEvent::Dwell);
            if key == Key::Select {
                return cursor.index();
            }
        }
    }

    fn notice(&mut self, top: &str, bottom: &str) {
        self.screen.set_line(0, top);
        self.screen.set_line(1, bottom);
        self.refresh();
    }
}

impl<D, K: Keypad, C> Keypad for OperatorPanel<D, K, C> {
    fn read_key(&mut self, blocking: bool) -> Key {
        self.keypad.read_key(blocking)
    }
}
