//! Operator setup workflow
//!
//! Entered from the running screen with the Select key. The operator picks
//! a servo number, then either runs the guided setup for it, flips its
//! direction, centres it, or backs out.
//!
//! ```text
//! Select Servo # ──► Setup Servos ─┬─ Setup/Change ──► configure ──► Another? ─┐
//!      ▲                           ├─ Swap Direction                           │
//!      │                           ├─ Centre                                   │
//!      │                           └─ Cancel                                   │
//!      └──────────────────────── Yes (next servo) ◄────────────────────────────┘
//! ```
//!
//! Option menus preview every highlighted choice straight into the live
//! configuration and keep servicing switch edges while open, so the
//! operator can throw the servo's switch to test a setting before
//! confirming it. Bus failures and switch edges met along the way are
//! collected in a [`SessionReport`] rather than ending the session.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use heapless::String;
use leverframe_hal::{ConfigStorage, StorageError};

use super::repeat::{KeyRepeat, Repeat};
use crate::config::{ConfigStore, ServoConfig, ServoIndex, ServoType, CENTRE_ANGLE, MAX_ANGLE};
use crate::sync::{SyncAction, SyncController, SyncEvent};
use crate::traits::{BusError, Clock, Key, Keypad, Menu, MenuEvent, ServoBank, SwitchBank};

/// Hold time for each jog and centring step before the servo is released
pub const JOG_HOLD_MS: u32 = 100;

/// Extra wait between auto-repeated servo number steps
pub const SELECT_REPEAT_MS: u32 = 100;

/// Pause after Select ends a selection or jog loop
pub const SETTLE_MS: u32 = 100;

/// How long one-line status messages stay up
pub const MESSAGE_MS: u32 = 1000;

const YES: u8 = 0;
const NO: u8 = 1;

/// Answers for every yes/no question; Yes is index 0
pub const YES_NO_ITEMS: [&str; 2] = ["Yes", "No"];
/// "Setup Servos" menu, in [`SetupAction`] order
pub const SETUP_ITEMS: [&str; 4] = ["Setup/Change", "Swap Direction", "Centre", "Cancel"];
/// Profiles, in [`ServoType::SELECTABLE`] order
pub const TYPE_ITEMS: [&str; 4] = ["Point", "Semaphore", "Sweep", "On/Off"];
/// Point/Sweep speed table entries, slowest first
pub const SPEED_ITEMS: [&str; 4] = ["Speed 1", "Speed 2", "Speed 3", "Speed 4"];

/// Choice from the "Setup Servos" menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupAction {
    /// Guided setup of the selected servo
    SetupChange,
    /// Flip the servo's swap flag and save
    SwapDirection,
    /// Move the servo to 90 degrees
    Centre,
    /// Back to the running screen
    Cancel,
}

/// Side results of a setup session
///
/// Only the last failure of each kind is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionReport {
    /// Last failed save; the in-memory configuration stays in effect
    pub save_error: Option<StorageError>,
    /// Last servo bus failure while jogging, centring or servicing a switch
    pub bus_error: Option<BusError>,
    /// Last switch edge serviced while a menu was open
    pub last_event: Option<SyncEvent>,
    /// Number of switch edges serviced while menus were open
    pub edges: u16,
}

impl SessionReport {
    /// Whether nothing went wrong
    pub fn is_clean(&self) -> bool {
        self.save_error.is_none() && self.bus_error.is_none()
    }

    fn record_event(&mut self, event: SyncEvent) {
        if let SyncAction::BusFault(e) = event.action {
            self.bus_error = Some(e);
        }
        self.last_event = Some(event);
        self.edges = self.edges.saturating_add(1);
    }

    fn record_bus(&mut self, result: Result<(), BusError>) {
        if let Err(e) = result {
            self.bus_error = Some(e);
        }
    }
}

impl SetupAction {
    /// Map a "Setup Servos" menu index; anything past the end is Cancel
    pub fn from_menu_index(index: u8) -> Self {
        match index {
            0 => SetupAction::SetupChange,
            1 => SetupAction::SwapDirection,
            2 => SetupAction::Centre,
            _ => SetupAction::Cancel,
        }
    }
}

/// Applies a menu index to a servo's configuration
type Preview = fn(&mut ServoConfig, u8);

const SET_SWAP: Preview = |c, i| c.swap = i == YES;
const SET_SPEED: Preview = |c, i| c.speed = i;
const SET_BOUNCE: Preview = |c, i| c.bounce = i == YES;
const SET_HESITATE: Preview = |c, i| c.hesitate = i == YES;

/// Interactive setup over the operator panel
pub struct SetupWorkflow<'a, U, C, S, V, D, F> {
    ui: &'a mut U,
    clock: &'a C,
    sync: &'a mut SyncController<S, V, D>,
    store: &'a mut ConfigStore,
    storage: &'a mut F,
    report: SessionReport,
}

impl<'a, U, C, S, V, D, F> SetupWorkflow<'a, U, C, S, V, D, F>
where
    U: Menu + Keypad,
    C: Clock,
    S: SwitchBank,
    V: ServoBank,
    D: DelayNs,
    F: ConfigStorage,
{
    /// Borrow everything a session touches
    pub fn new(
        ui: &'a mut U,
        clock: &'a C,
        sync: &'a mut SyncController<S, V, D>,
        store: &'a mut ConfigStore,
        storage: &'a mut F,
    ) -> Self {
        Self {
            ui,
            clock,
            sync,
            store,
            storage,
            report: SessionReport::default(),
        }
    }

    /// What has happened so far
    pub fn report(&self) -> SessionReport {
        self.report
    }

    /// Run one operator session, ending on the running screen
    ///
    /// Saves happen as each change is made. Neither a failed save nor a bus
    /// fault ends the session; both are reported once it is over.
    pub fn run_session(&mut self) -> SessionReport {
        self.report = SessionReport::default();
        let mut servo = ServoIndex::FIRST;
        let mut repeat_setup = false;

        loop {
            servo = self.select_servo(servo);

            let action = if repeat_setup {
                SetupAction::SetupChange
            } else {
                SetupAction::from_menu_index(self.ask("Setup Servos", &SETUP_ITEMS, 0, None))
            };

            match action {
                SetupAction::SetupChange => {
                    let _ = self.configure(servo);
                    if self.ask("Setup/Change Another?", &YES_NO_ITEMS, YES, None) != YES {
                        break;
                    }
                    servo = servo.next_wrapping();
                    repeat_setup = true;
                }
                SetupAction::SwapDirection => {
                    let config = self.store.get_mut(servo);
                    config.swap = !config.swap;
                    let _ = self.persist();
                    self.message("Swapped");
                    break;
                }
                SetupAction::Centre => {
                    let moved = self.sync.hold_angle(servo, CENTRE_ANGLE, JOG_HOLD_MS);
                    self.report.record_bus(moved);
                    break;
                }
                SetupAction::Cancel => break,
            }
        }

        self.show_running();
        self.report
    }

    /// Guided setup of one servo, saved on completion
    ///
    /// A servo that already has a profile keeps its type and limits unless
    /// the operator chooses to overwrite them; the option menus are always
    /// offered.
    pub fn configure(&mut self, servo: ServoIndex) -> Result<(), StorageError> {
        let overwrite = !self.store.get(servo).is_configured()
            || self.ask("Existing Setup - Overwrite?", &YES_NO_ITEMS, NO, None) == YES;

        if overwrite {
            let index = self.ask("Setup Type", &TYPE_ITEMS, 0, None);
            let config = self.store.get_mut(servo);
            config.servo_type = ServoType::from_menu_index(index);
            config.reset_options();

            if config.servo_type.has_limits() {
                loop {
                    self.message("Centring");
                    let limit1 = self.jog(servo, 1, CENTRE_ANGLE);
                    self.store.get_mut(servo).limit1 = limit1;
                    let limit2 = self.jog(servo, 2, CENTRE_ANGLE);
                    self.store.get_mut(servo).limit2 = limit2;

                    if self.ask("Limits Correct? - Test Switch", &YES_NO_ITEMS, YES, None) == YES {
                        break;
                    }
                }
            }
        }

        self.ask(
            "Swap Direction? - Test Switch",
            &YES_NO_ITEMS,
            NO,
            Some((servo, SET_SWAP)),
        );

        let servo_type = self.store.get(servo).servo_type;
        if servo_type.has_speed() {
            self.ask(
                "Select Speed - Test Switch",
                &SPEED_ITEMS,
                0,
                Some((servo, SET_SPEED)),
            );
        } else if servo_type == ServoType::Semaphore {
            self.ask(
                "Simulate Bounce? - Test Switch",
                &YES_NO_ITEMS,
                YES,
                Some((servo, SET_BOUNCE)),
            );
            self.ask(
                "Simulate Hesitate? - Test Switch",
                &YES_NO_ITEMS,
                YES,
                Some((servo, SET_HESITATE)),
            );
        }

        self.message("Setup Complete");
        self.persist()
    }

    /// Let the operator pick a servo number with Up/Down, confirmed by Select
    ///
    /// Numbers wrap at both ends. A held key repeats after half a second.
    pub fn select_servo(&mut self, start: ServoIndex) -> ServoIndex {
        let mut servo = start;
        self.show_servo_number(servo);

        let mut repeat = KeyRepeat::new();
        loop {
            let key = self.ui.read_key(false);
            if key == Key::Select {
                break;
            }

            let state = repeat.poll(key, self.clock.now_ms());
            if !state.acts() {
                continue;
            }
            let next = match key {
                Key::Up => servo.next_wrapping(),
                Key::Down => servo.prev_wrapping(),
                _ => continue,
            };
            servo = next;
            self.show_servo_number(servo);
            if state == Repeat::Held {
                self.sync.delay_ms(SELECT_REPEAT_MS);
            }
        }

        self.sync.delay_ms(SETTLE_MS);
        servo
    }

    /// Jog a servo with Left/Right until Select, returning the final angle
    ///
    /// Every step moves the servo there and releases it. The angle stays
    /// within 0..=180.
    pub fn jog(&mut self, servo: ServoIndex, limit: u8, start: u8) -> u8 {
        let mut title: String<16> = String::new();
        let _ = write!(title, "Setup Limit {}", limit);
        self.ui.notice(&title, "Use L/R to Jog");

        let mut angle = start.min(MAX_ANGLE);
        let moved = self.sync.hold_angle(servo, angle, JOG_HOLD_MS);
        self.report.record_bus(moved);

        let mut repeat = KeyRepeat::new();
        loop {
            let key = self.ui.read_key(false);
            if key == Key::Select {
                break;
            }
            if !repeat.poll(key, self.clock.now_ms()).acts() {
                continue;
            }
            angle = match key {
                Key::Left => angle.saturating_sub(1),
                Key::Right => (angle + 1).min(MAX_ANGLE),
                _ => continue,
            };
            let moved = self.sync.hold_angle(servo, angle, JOG_HOLD_MS);
        self.report.record_bus(moved);
        }

        self.sync.delay_ms(SETTLE_MS);
        angle
    }

    /// Show the idle screen
    pub fn show_running(&mut self) {
        self.ui.notice("Running... Press", "Select to Setup");
    }

    /// Show a menu while servicing switch edges
    ///
    /// With a preview, every highlighted index and the confirmed one are
    /// written into the servo's live configuration.
    fn ask(
        &mut self,
        title: &str,
        items: &[&str],
        initial: u8,
        preview: Option<(ServoIndex, Preview)>,
    ) -> u8 {
        let store = &mut *self.store;
        let sync = &mut *self.sync;
        let report = &mut self.report;

        let selected = self.ui.show(title, items, initial, &mut |event| match event {
            MenuEvent::Highlight(index) => {
                if let Some((servo, apply)) = preview {
                    apply(store.get_mut(servo), index);
                }
            }
            MenuEvent::Dwell => {
                if let Some(event) = sync.poll(store) {
                    report.record_event(event);
                }
            }
        });

        if let Some((servo, apply)) = preview {
            apply(self.store.get_mut(servo), selected);
        }
        selected
    }

    fn show_servo_number(&mut self, servo: ServoIndex) {
        let mut number: String<4> = String::new();
        let _ = write!(number, "{}", servo.linear());
        self.ui.notice("Select Servo #", &number);
    }

    fn message(&mut self, text: &str) {
        self.ui.notice(text, "");
        self.sync.delay_ms(MESSAGE_MS);
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let saved = self.store.save(&mut *self.storage);
        if let Err(e) = saved {
            self.report.save_error = Some(e);
        }
        saved
    }
}
