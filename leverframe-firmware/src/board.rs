//! Board bring-up for the Pico
//!
//! Pin assignment:
//! - I2C0: SDA=GPIO4, SCL=GPIO5 (all switch and servo boards)
//! - LCD: RS=GPIO8, EN=GPIO9, D4..D7=GPIO10..13
//! - Keypad ladder: ADC0 (GPIO26)

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;

use leverframe_core::switches::BoardSet;
use leverframe_core::sync::SyncController;
use leverframe_display::OperatorPanel;
use leverframe_drivers::{AnalogKeypad, Hd44780, Mcp23017, Pca9685};
use leverframe_hal_rp2040::i2c::I2cBus;
use leverframe_hal_rp2040::{EmbassyClock, KeypadAdc, Rp2040ConfigStorage, SharedI2c};

use crate::frame;

/// The I2C controller every board hangs off
pub type Bus = I2c<'static, I2C0, Blocking>;

/// One driver's handle on the shared bus
pub type BusHandle = SharedI2c<'static, Bus>;

pub type Switches = Mcp23017<BusHandle>;
pub type Servos = Pca9685<BusHandle>;
pub type Boards = BoardSet<Switches, Servos>;
pub type Controller = SyncController<Switches, Servos, Delay>;

pub type Lcd = Hd44780<Output<'static>, Delay>;
pub type Panel = OperatorPanel<Lcd, AnalogKeypad<KeypadAdc<'static>>, EmbassyClock>;
pub type Storage = Rp2040ConfigStorage<'static>;

/// Probe and initialise every board slot
///
/// A slot counts only if both its switch bank and servo bank answer and
/// initialise; otherwise it stays absent until the next reset.
pub fn detect_boards(bus: &'static I2cBus<Bus>) -> Boards {
    let detected = core::array::from_fn(|slot: usize| {
        let mut switches = Mcp23017::new(SharedI2c::new(bus), frame::SWITCH_ADDRESSES[slot]);
        let mut servos = Pca9685::new(
            SharedI2c::new(bus),
            frame::SERVO_ADDRESSES[slot],
            frame::PCA9685,
        );

        if switches.probe().is_err() || servos.probe().is_err() {
            info!("Board {}: not fitted", slot);
            return None;
        }
        if let Err(e) = switches.init() {
            warn!("Board {}: switch bank init failed: {}", slot, e);
            return None;
        }
        if let Err(e) = servos.init(&mut Delay) {
            warn!("Board {}: servo bank init failed: {}", slot, e);
            return None;
        }

        info!(
            "Board {}: switches at {=u8:#x}, servos at {=u8:#x}",
            slot,
            switches.address(),
            servos.address()
        );
        Some((switches, servos))
    });

    BoardSet::new(detected)
}
