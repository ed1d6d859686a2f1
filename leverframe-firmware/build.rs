//! Build script for leverframe-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates frame.toml and turns it into Rust constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Board slots the firmware drives (leverframe_core::config::BOARD_COUNT)
const BOARD_COUNT: usize = 4;

/// PCA9685 all-call address, answered by every servo board
const PCA9685_ALL_CALL: i64 = 0x70;

fn main() {
    setup_linker();
    let frame = validate_config();
    generate_constants(&frame);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validated contents of frame.toml
struct Frame {
    i2c_frequency_hz: i64,
    pulse_min: i64,
    pulse_max: i64,
    pwm_frequency_hz: i64,
    oscillator_hz: i64,
    switch_addresses: Vec<i64>,
    servo_addresses: Vec<i64>,
}

/// Validate frame.toml at compile time
fn validate_config() -> Frame {
    // Re-run if frame.toml changes
    println!("cargo:rerun-if-changed=frame.toml");

    let config_path = Path::new("frame.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: frame.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a frame.toml describing the I2C bus,      ║\n\
            ║  servo pulse range and board addresses.                          ║\n\
            ║  Please create one in the leverframe-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read frame.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in frame.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let i2c_frequency_hz = integer(&config, "i2c", "frequency_hz", 10_000..=1_000_000, &mut errors);
    let pulse_min = integer(&config, "servo", "pulse_min", 0..=4095, &mut errors);
    let pulse_max = integer(&config, "servo", "pulse_max", 0..=4095, &mut errors);
    let pwm_frequency_hz = integer(&config, "servo", "pwm_frequency_hz", 24..=1526, &mut errors);
    let oscillator_hz = integer(&config, "servo", "oscillator_hz", 1..=50_000_000, &mut errors);

    if pulse_min >= pulse_max {
        errors.push("[servo] pulse_min must be below pulse_max".to_string());
    }

    let (switch_addresses, servo_addresses) = validate_boards(&config, &mut errors);

    report("Invalid frame configuration", &errors);
    println!("cargo:warning=frame.toml validated successfully");

    Frame {
        i2c_frequency_hz,
        pulse_min,
        pulse_max,
        pwm_frequency_hz,
        oscillator_hz,
        switch_addresses,
        servo_addresses,
    }
}

/// Read `[section] key` as an integer within `range`
fn integer(
    config: &toml::Value,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> i64 {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(value)) if range.contains(value) => *value,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
            *range.start()
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            *range.start()
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            *range.start()
        }
    }
}

/// Validate the [[board]] list: one entry per slot, unique addresses
fn validate_boards(config: &toml::Value, errors: &mut Vec<String>) -> (Vec<i64>, Vec<i64>) {
    let boards = match config.get("board") {
        Some(toml::Value::Array(boards)) => boards,
        Some(_) => {
            errors.push("[[board]] must be an array of tables".to_string());
            return (Vec::new(), Vec::new());
        }
        None => {
            errors.push("Missing [[board]] entries".to_string());
            return (Vec::new(), Vec::new());
        }
    };

    if boards.len() != BOARD_COUNT {
        errors.push(format!(
            "Expected {} [[board]] entries, found {}",
            BOARD_COUNT,
            boards.len()
        ));
    }

    let mut switches = Vec::new();
    let mut servos = Vec::new();

    for (i, board) in boards.iter().enumerate() {
        let switch = board.get("switch_address").and_then(|v| v.as_integer());
        match switch {
            Some(addr) if (0x20..=0x27).contains(&addr) => {
                if switches.contains(&addr) {
                    errors.push(format!("[[board]] {} switch_address {:#04x} used twice", i, addr));
                }
                switches.push(addr);
            }
            Some(_) => errors.push(format!("[[board]] {} switch_address must be 0x20-0x27", i)),
            None => errors.push(format!("[[board]] {} missing 'switch_address'", i)),
        }

        let servo = board.get("servo_address").and_then(|v| v.as_integer());
        match servo {
            Some(PCA9685_ALL_CALL) => {
                errors.push(format!("[[board]] {} servo_address 0x70 is the all-call address", i))
            }
            Some(addr) if (0x40..=0x7F).contains(&addr) => {
                if servos.contains(&addr) {
                    errors.push(format!("[[board]] {} servo_address {:#04x} used twice", i, addr));
                }
                servos.push(addr);
            }
            Some(_) => errors.push(format!("[[board]] {} servo_address must be 0x40-0x7f", i)),
            None => errors.push(format!("[[board]] {} missing 'servo_address'", i)),
        }
    }

    (switches, servos)
}

/// Write the validated values to $OUT_DIR/frame.rs
fn generate_constants(frame: &Frame) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let addresses = |list: &[i64]| {
        list.iter()
            .map(|a| format!("{:#04x}", a))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let source = format!(
        "// Generated by build.rs from frame.toml\n\
         pub const I2C_FREQUENCY_HZ: u32 = {};\n\
         pub const PULSE_MIN: u16 = {};\n\
         pub const PULSE_MAX: u16 = {};\n\
         pub const PWM_FREQUENCY_HZ: u16 = {};\n\
         pub const OSCILLATOR_HZ: u32 = {};\n\
         pub const SWITCH_ADDRESSES: [u8; BOARD_COUNT] = [{}];\n\
         pub const SERVO_ADDRESSES: [u8; BOARD_COUNT] = [{}];\n",
        frame.i2c_frequency_hz,
        frame.pulse_min,
        frame.pulse_max,
        frame.pwm_frequency_hz,
        frame.oscillator_hz,
        addresses(&frame.switch_addresses),
        addresses(&frame.servo_addresses),
    );

    fs::write(out_dir.join("frame.rs"), source).unwrap();
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fail the build with every collected error
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
