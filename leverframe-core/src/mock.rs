//! Test doubles shared by the unit tests

use core::cell::{Cell, RefCell};

use embedded_hal::delay::DelayNs;
use heapless::{Deque, String, Vec};

use crate::config::{PulseRange, BOARD_COUNT};
use crate::motion::MotionExecutor;
use crate::switches::BoardSet;
use crate::sync::SyncController;
use crate::traits::{
    BusError, Clock, Key, Keypad, Menu, MenuEvent, PwmOutput, ServoBank, SwitchBank,
};

/// Something observable a test double did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Output written to `(board, channel)`
    Output(u8, u8, PwmOutput),
    /// Blocking delay in milliseconds
    Delay(u32),
}

/// Ordered record of outputs and delays
pub type Timeline = RefCell<Vec<Event, 2048>>;

pub fn timeline() -> Timeline {
    RefCell::new(Vec::new())
}

/// Pulse widths written, in order, ignoring delays and full on/off
pub fn pulses(timeline: &Timeline) -> Vec<u16, 1024> {
    timeline
        .borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Output(_, _, PwmOutput::Pulse(p)) => Some(*p),
            _ => None,
        })
        .collect()
}

/// All outputs written, in order
pub fn outputs(timeline: &Timeline) -> Vec<(u8, u8, PwmOutput), 1024> {
    timeline
        .borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Output(b, c, o) => Some((*b, *c, *o)),
            _ => None,
        })
        .collect()
}

/// Sum of all recorded delays
pub fn total_delay_ms(timeline: &Timeline) -> u32 {
    timeline
        .borrow()
        .iter()
        .map(|e| match e {
            Event::Delay(ms) => *ms,
            _ => 0,
        })
        .sum()
}

/// Switch bank whose word is set by the test
pub struct FakeSwitches<'a> {
    pub pins: &'a Cell<u16>,
    pub fail: &'a Cell<bool>,
}

impl SwitchBank for FakeSwitches<'_> {
    fn read_pins(&mut self) -> Result<u16, BusError> {
        if self.fail.get() {
            Err(BusError::Nack)
        } else {
            Ok(self.pins.get())
        }
    }
}

/// Servo bank that logs every write to a timeline
pub struct RecordingServos<'a> {
    pub board: u8,
    pub timeline: &'a Timeline,
    pub fail: &'a Cell<bool>,
}

impl ServoBank for RecordingServos<'_> {
    fn set_output(&mut self, channel: u8, output: PwmOutput) -> Result<(), BusError> {
        if self.fail.get() {
            return Err(BusError::Nack);
        }
        let _ = self
            .timeline
            .borrow_mut()
            .push(Event::Output(self.board, channel, output));
        Ok(())
    }
}

/// Servo bank that accepts everything
pub struct NullServos;

impl ServoBank for NullServos {
    fn set_output(&mut self, _channel: u8, _output: PwmOutput) -> Result<(), BusError> {
        Ok(())
    }
}

/// Delay that returns at once and logs the requested time
pub struct RecordingDelay<'a> {
    pub timeline: &'a Timeline,
}

impl DelayNs for RecordingDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        let _ = self
            .timeline
            .borrow_mut()
            .push(Event::Delay(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        let _ = self.timeline.borrow_mut().push(Event::Delay(ms));
    }
}

/// Clock that moves forward a fixed step every time it is read
pub struct TickingClock {
    now: Cell<u32>,
    step: u32,
}

impl TickingClock {
    pub fn new(step: u32) -> Self {
        Self {
            now: Cell::new(0),
            step,
        }
    }
}

impl Clock for TickingClock {
    fn now_ms(&self) -> u32 {
        self.now.set(self.now.get().wrapping_add(self.step));
        self.now.get()
    }
}

pub type BenchController<'a> =
    SyncController<FakeSwitches<'a>, RecordingServos<'a>, RecordingDelay<'a>>;

/// Four board slots of fake hardware sharing one timeline
pub struct Bench {
    pub pins: [Cell<u16>; BOARD_COUNT],
    pub read_fail: Cell<bool>,
    pub write_fail: Cell<bool>,
    pub log: Timeline,
}

impl Bench {
    pub fn new() -> Self {
        Self {
            pins: core::array::from_fn(|_| Cell::new(0)),
            read_fail: Cell::new(false),
            write_fail: Cell::new(false),
            log: timeline(),
        }
    }

    /// Controller with boards 0 and 2 present, 1 and 3 absent
    ///
    /// Pulses are one count per degree so they read back as angles.
    pub fn controller(&self) -> BenchController<'_> {
        let boards = BoardSet::new([self.board(0), None, self.board(2), None]);
        let executor = MotionExecutor::new(
            RecordingDelay {
                timeline: &self.log,
            },
            PulseRange { min: 0, max: 180 },
        );
        SyncController::new(boards, executor)
    }

    fn board(&self, n: usize) -> Option<(FakeSwitches<'_>, RecordingServos<'_>)> {
        Some((
            FakeSwitches {
                pins: &self.pins[n],
                fail: &self.read_fail,
            },
            RecordingServos {
                board: n as u8,
                timeline: &self.log,
                fail: &self.write_fail,
            },
        ))
    }
}

/// Operator panel driven from a script
///
/// Keys are returned in order, then Select forever. Each menu answers with
/// the next scripted index, or its initial index once the script runs out.
pub struct ScriptedPanel<'a> {
    keys: Deque<Key, 64>,
    answers: Deque<u8, 16>,
    /// Dwell events sent by each menu after its highlights
    pub dwells: usize,
    /// When a menu with this title opens, store the word in the cell
    pub trigger: Option<(&'a str, &'a Cell<u16>, u16)>,
    pub titles: Vec<String<40>, 32>,
    pub notices: Vec<(String<40>, String<40>), 32>,
}

impl<'a> ScriptedPanel<'a> {
    pub fn new(keys: &[Key], answers: &[u8]) -> Self {
        let mut panel = Self {
            keys: Deque::new(),
            answers: Deque::new(),
            dwells: 0,
            trigger: None,
            titles: Vec::new(),
            notices: Vec::new(),
        };
        for &key in keys {
            let _ = panel.keys.push_back(key);
        }
        for &answer in answers {
            let _ = panel.answers.push_back(answer);
        }
        panel
    }

    pub fn title_count(&self, title: &str) -> usize {
        self.titles.iter().filter(|t| t.as_str() == title).count()
    }

    pub fn saw_notice(&self, top: &str) -> bool {
        self.notices.iter().any(|(t, _)| t.as_str() == top)
    }

    pub fn saw_bottom(&self, bottom: &str) -> bool {
        self.notices.iter().any(|(_, b)| b.as_str() == bottom)
    }

    pub fn last_notice(&self) -> Option<&str> {
        self.notices.last().map(|(t, _)| t.as_str())
    }
}

fn owned(text: &str) -> String<40> {
    let mut s = String::new();
    let _ = s.push_str(text);
    s
}

impl Menu for ScriptedPanel<'_> {
    fn show(
        &mut self,
        title: &str,
        items: &[&str],
        initial: u8,
        on_event: &mut dyn FnMut(MenuEvent),
    ) -> u8 {
        let _ = self.titles.push(owned(title));
        if let Some((trigger, cell, word)) = self.trigger {
            if trigger == title {
                cell.set(word);
            }
        }

        let last = items.len().saturating_sub(1) as u8;
        let initial = initial.min(last);
        let answer = self.answers.pop_front().unwrap_or(initial).min(last);

        on_event(MenuEvent::Highlight(initial));
        if answer != initial {
            on_event(MenuEvent::Highlight(answer));
        }
        for _ in 0..self.dwells {
            on_event(MenuEvent::Dwell);
        }
        answer
    }

    fn notice(&mut self, top: &str, bottom: &str) {
        let _ = self.notices.push((owned(top), owned(bottom)));
    }
}

impl Keypad for ScriptedPanel<'_> {
    fn read_key(&mut self, _blocking: bool) -> Key {
        self.keys.pop_front().unwrap_or(Key::Select)
    }
}
