//! Hardware abstraction traits
//!
//! These traits define the interface between the switch/servo logic
//! and the hardware-specific implementations.

pub mod bank;
pub mod clock;
pub mod display;
pub mod keypad;
pub mod menu;

pub use bank::{BusError, PwmOutput, ServoBank, SwitchBank};
pub use clock::Clock;
pub use display::{CharDisplay, CharDisplayExt, DisplayError};
pub use keypad::{Key, Keypad};
pub use menu::{Menu, MenuEvent};
