//! Build script for terrarium-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time
//! - Generates the board wiring tables compiled into the firmware

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use terrarium_core::{ActionTable, BoardConfig, Device, OutputBinding, SensorBinding};

#[allow(dead_code)]
#[path = "src/board.rs"]
mod board;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
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

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/board.rs");
}

/// Values read from board.toml
struct ParsedBoard {
    baud_rate: u32,
    settle_delay_ms: u32,
    outputs: Vec<OutputBinding>,
    sensors: Vec<SensorBinding>,
}

/// Validate board.toml configuration at compile time
fn validate_config() -> ParsedBoard {
    // Re-run if board.toml changes
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml wiring file.                 ║\n\
            ║  Please create one in the terrarium-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
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

    let baud_rate = read_u32(&config, "serial", "baud_rate", 9600, &mut errors);
    let settle_delay_ms = read_u32(&config, "console", "settle_delay_ms", 100, &mut errors);
    let outputs = parse_outputs(&config, &mut errors);
    let sensors = parse_sensors(&config, &mut errors);

    if baud_rate == 0 {
        errors.push("serial.baud_rate must be greater than 0".to_string());
    }

    report_errors("Invalid wiring in board.toml", &errors);

    // Same checks the firmware applies at startup
    let checked = BoardConfig::from_bindings(&outputs, &sensors, settle_delay_ms)
        .map_err(|e| format!("{:?}", e))
        .and_then(|board| {
            ActionTable::build(&board)
                .map(|table| table.len())
                .map_err(|e| format!("{:?}", e))
        });
    match checked {
        Ok(actions) => println!(
            "cargo:warning=board.toml validated successfully ({} command codes)",
            actions
        ),
        Err(e) => report_errors("Conflicting bindings in board.toml", &[e]),
    }

    ParsedBoard {
        baud_rate,
        settle_delay_ms,
        outputs,
        sensors,
    }
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

/// Abort the build with every collected error
fn report_errors(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }

    let error_list = errors
        .iter()
        .map(|e| format_error_lines(&format!("• {}", e)))
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, error_list
    );
}

/// Read an optional integer setting from a table
fn read_u32(
    config: &toml::Value,
    section: &str,
    key: &str,
    default: u32,
    errors: &mut Vec<String>,
) -> u32 {
    match config.get(section).and_then(|s| s.get(key)) {
        None => default,
        Some(value) => match value.as_integer().map(u32::try_from) {
            Some(Ok(n)) => n,
            _ => {
                errors.push(format!("{}.{} must be a non-negative integer", section, key));
                default
            }
        },
    }
}

/// Fields shared by `[[output]]` and `[[sensor]]` entries
fn parse_common(
    entry: &toml::Value,
    label: &str,
    errors: &mut Vec<String>,
) -> Option<(Device, u8, i32)> {
    let device = match entry.get("device").and_then(|v| v.as_str()) {
        Some(name) => match Device::from_name(name) {
            Some(device) => Some(device),
            None => {
                errors.push(format!("{}: unknown device '{}'", label, name));
                None
            }
        },
        None => {
            errors.push(format!("{}: missing 'device'", label));
            None
        }
    };

    let pin = match entry.get("pin").and_then(|v| v.as_integer()) {
        Some(pin) => match u8::try_from(pin) {
            Ok(pin) => Some(pin),
            Err(_) => {
                errors.push(format!("{}: pin {} out of range", label, pin));
                None
            }
        },
        None => {
            errors.push(format!("{}: missing 'pin'", label));
            None
        }
    };

    let code = match entry.get("code").and_then(|v| v.as_integer()) {
        Some(code) => match i32::try_from(code) {
            Ok(code) => Some(code),
            Err(_) => {
                errors.push(format!("{}: code {} out of range", label, code));
                None
            }
        },
        None => {
            errors.push(format!("{}: missing 'code'", label));
            None
        }
    };

    Some((device?, pin?, code?))
}

fn entries<'a>(config: &'a toml::Value, key: &str, errors: &mut Vec<String>) -> &'a [toml::Value] {
    match config.get(key) {
        None => &[],
        Some(toml::Value::Array(items)) => items,
        Some(_) => {
            errors.push(format!("'{}' must be an array of tables ([[{}]])", key, key));
            &[]
        }
    }
}

fn parse_outputs(config: &toml::Value, errors: &mut Vec<String>) -> Vec<OutputBinding> {
    let mut outputs = Vec::new();

    for (i, entry) in entries(config, "output", errors).iter().enumerate() {
        let label = format!("output #{}", i + 1);
        let Some((device, pin, code)) = parse_common(entry, &label, errors) else {
            continue;
        };

        if !(board::FIRST_OUTPUT_PIN..=board::LAST_OUTPUT_PIN).contains(&pin) {
            errors.push(format!(
                "{}: pin D{} is not an output (D{}-D{})",
                label,
                pin,
                board::FIRST_OUTPUT_PIN,
                board::LAST_OUTPUT_PIN
            ));
            continue;
        }

        outputs.push(OutputBinding::new(device, pin, code));
    }

    outputs
}

fn parse_sensors(config: &toml::Value, errors: &mut Vec<String>) -> Vec<SensorBinding> {
    let mut sensors = Vec::new();

    for (i, entry) in entries(config, "sensor", errors).iter().enumerate() {
        let label = format!("sensor #{}", i + 1);
        let common = parse_common(entry, &label, errors);

        let channel = match entry.get("channel").and_then(|v| v.as_integer()) {
            Some(channel) => u8::try_from(channel).ok().or_else(|| {
                errors.push(format!("{}: channel {} out of range", label, channel));
                None
            }),
            None => {
                errors.push(format!("{}: missing 'channel'", label));
                None
            }
        };

        let (Some((device, pin, code)), Some(channel)) = (common, channel) else {
            continue;
        };

        if pin >= board::ANALOG_PIN_COUNT {
            errors.push(format!(
                "{}: pin A{} is not an analog input (A0-A{})",
                label,
                pin,
                board::ANALOG_PIN_COUNT - 1
            ));
            continue;
        }

        sensors.push(SensorBinding::new(device, pin, code, channel));
    }

    sensors
}

/// Write `board_config.rs` into OUT_DIR
fn generate_config(board: &ParsedBoard) {
    let mut out = String::new();

    out.push_str("// Generated from board.toml by build.rs\n\n");
    writeln!(out, "pub const BAUD_RATE: u32 = {};", board.baud_rate).unwrap();
    writeln!(
        out,
        "pub const SETTLE_DELAY_MS: u32 = {};\n",
        board.settle_delay_ms
    )
    .unwrap();

    out.push_str("pub const OUTPUTS: &[OutputBinding] = &[\n");
    for b in &board.outputs {
        writeln!(
            out,
            "    OutputBinding::new(Device::{:?}, {}, {}),",
            b.device, b.pin, b.code
        )
        .unwrap();
    }
    out.push_str("];\n\n");

    out.push_str("pub const SENSORS: &[SensorBinding] = &[\n");
    for b in &board.sensors {
        writeln!(
            out,
            "    SensorBinding::new(Device::{:?}, {}, {}, {}),",
            b.device, b.pin, b.code, b.channel
        )
        .unwrap();
    }
    out.push_str("];\n");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("board_config.rs"), out).unwrap();
}
