//! Build script for stompcc-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates pedals.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Number of pedal jacks on the controller
const PEDAL_COUNT: usize = 3;

/// Mode names the firmware parser accepts
const PEDAL_MODES: [&str; 3] = ["single", "double", "analog"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
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

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate pedals.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=pedals.toml");

    let config_path = Path::new("pedals.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: pedals.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds its pedal setup from pedals.toml.           ║\n\
            ║  Please create one in the stompcc-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read pedals.toml                               ║\n\
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
                ║  ERROR: Invalid TOML syntax in pedals.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_midi(&config, &mut errors);
    validate_loop(&config, &mut errors);
    validate_pedals(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid pedal configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=pedals.toml validated successfully");
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

fn check_range(
    errors: &mut Vec<String>,
    table: &toml::Table,
    key: &str,
    ctx: &str,
    min: i64,
    max: i64,
) {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if *v < min || *v > max => {
            errors.push(format!("{} {} must be {}-{}", ctx, key, min, max));
        }
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push(format!("{} {} must be an integer", ctx, key)),
    }
}

fn validate_midi(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(midi) = config.get("midi") else {
        return;
    };
    let Some(midi) = midi.as_table() else {
        errors.push("[midi] must be a table".to_string());
        return;
    };
    check_range(errors, midi, "channel", "[midi]", 1, 16);
    check_range(errors, midi, "baud", "[midi]", 1200, 1_000_000);
}

fn validate_loop(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(toml::Value::Table(lp)) = config.get("loop") {
        check_range(errors, lp, "tick_us", "[loop]", 100, 100_000);
    }
}

/// Parse "gpioN", "!gpioN" or a bare integer
fn pin_number(value: &toml::Value) -> Option<i64> {
    match value {
        toml::Value::Integer(n) => Some(*n),
        toml::Value::String(s) => {
            let s = s.strip_prefix('!').unwrap_or(s);
            s.strip_prefix("gpio").unwrap_or(s).parse().ok()
        }
        _ => None,
    }
}

fn validate_pedals(config: &toml::Value, errors: &mut Vec<String>) {
    let pedals = match config.get("pedal") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[pedal] must contain [pedal.N] tables".to_string());
            return;
        }
        None => {
            println!("cargo:warning=pedals.toml has no [pedal.N] sections, no pedal will report");
            return;
        }
    };

    for (slot, pedal) in pedals {
        let ctx = format!("[pedal.{}]", slot);
        match slot.parse::<usize>() {
            Ok(n) if n < PEDAL_COUNT => {}
            _ => errors.push(format!("{} slot must be 0-{}", ctx, PEDAL_COUNT - 1)),
        }

        let Some(pedal) = pedal.as_table() else {
            errors.push(format!("{} must be a table", ctx));
            continue;
        };

        for key in ["tip_pin", "ring_pin", "ground_pin"] {
            if let Some(value) = pedal.get(key) {
                match pin_number(value) {
                    Some(pin) if (0..30).contains(&pin) => {}
                    _ => errors.push(format!("{} {} must be gpio0-gpio29", ctx, key)),
                }
            }
        }

        check_range(errors, pedal, "cc", &ctx, 0, 127);
        check_range(errors, pedal, "ring_cc", &ctx, 0, 127);
        check_range(errors, pedal, "midi_min", &ctx, 0, 127);
        check_range(errors, pedal, "midi_max", &ctx, 0, 127);
        check_range(errors, pedal, "adc_min", &ctx, 0, 1023);
        check_range(errors, pedal, "adc_max", &ctx, 0, 1023);
        check_range(errors, pedal, "hysteresis", &ctx, 0, 127);

        let mode = match pedal.get("mode") {
            None => "single",
            Some(toml::Value::String(m)) if PEDAL_MODES.contains(&m.as_str()) => m.as_str(),
            Some(_) => {
                errors.push(format!("{} mode must be 'single', 'double' or 'analog'", ctx));
                continue;
            }
        };
        if mode == "double" && pedal.get("ring_pin").is_none() {
            errors.push(format!("{} double mode needs a ring_pin", ctx));
        }
        if mode == "analog" {
            let adc_capable = pedal
                .get("tip_pin")
                .and_then(pin_number)
                .is_some_and(|pin| (26..=29).contains(&pin));
            if !adc_capable {
                errors.push(format!("{} analog tip_pin must be gpio26-gpio29", ctx));
            }
        }
    }
}
