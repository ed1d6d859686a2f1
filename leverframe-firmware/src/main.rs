//! Leverframe - Model Railway Servo Controller Firmware
//!
//! Main firmware binary for RP2040 boards driving up to four pairs of
//! MCP23017 switch banks and PCA9685 servo banks over one I2C bus, with a
//! 16x2 LCD and five-button keypad for setup.
//!
//! Named after the lever frame of a signal box - the row of levers that
//! works the points and signals along the line.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use leverframe_core::config::ConfigStore;
use leverframe_core::motion::MotionExecutor;
use leverframe_core::sync::SyncController;
use leverframe_display::OperatorPanel;
use leverframe_drivers::{AnalogKeypad, Hd44780};
use leverframe_hal_rp2040::i2c::I2cBus;
use leverframe_hal_rp2040::{EmbassyClock, KeypadAdc, Rp2040ConfigStorage};

mod board;
mod frame;
mod tasks;

// Shared I2C bus (must live forever for the driver handles)
static I2C_BUS: StaticCell<I2cBus<board::Bus>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Leverframe firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Load servo configuration; blank or unreadable flash means nothing configured
    let mut storage = Rp2040ConfigStorage::new(p.FLASH);
    let store = match ConfigStore::load(&mut storage) {
        Ok(store) => {
            info!("Loaded {} servo configurations", store.configured_count());
            store
        }
        Err(e) => {
            warn!("Failed to read configuration ({}), starting unconfigured", e);
            ConfigStore::unconfigured()
        }
    };

    // Operator panel
    let mut lcd = Hd44780::new(
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
        [
            Output::new(p.PIN_10, Level::Low),
            Output::new(p.PIN_11, Level::Low),
            Output::new(p.PIN_12, Level::Low),
            Output::new(p.PIN_13, Level::Low),
        ],
        Delay,
    );
    if let Err(e) = lcd.init() {
        warn!("LCD init failed: {}", e);
    }
    let keypad = AnalogKeypad::new(KeypadAdc::new(p.ADC, p.PIN_26));
    let panel = OperatorPanel::new(lcd, keypad, EmbassyClock);
    info!("Operator panel initialized");

    // Shared I2C bus for every switch and servo board
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = frame::I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let bus = I2C_BUS.init(Mutex::new(RefCell::new(i2c)));

    let boards = board::detect_boards(bus);
    if boards.present_count() == 0 {
        warn!("No switch/servo boards found");
    } else {
        info!("{} boards detected", boards.present_count());
    }

    let sync = SyncController::new(boards, MotionExecutor::new(Delay, frame::PULSE_RANGE));

    spawner
        .spawn(tasks::controller_task(sync, panel, store, storage))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
