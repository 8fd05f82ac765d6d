//! Simple TOML parser for the pedal configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! pedals.toml. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [midi], [loop] and [pedal.N] section headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings
//! - Arrays and inline tables
//! - Dotted keys outside section headers

use stompcc_core::config::{ConfigError, PedalConfig, PedalMode, PedalTable, PEDAL_COUNT};
use stompcc_hal_rp2040::adc::is_adc_capable;
use stompcc_hal_rp2040::parse_pin_string;
use stompcc_midi::Channel;

use super::{FirmwareConfig, MAX_TICK_US, MIN_TICK_US};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Slot number outside the pedal table
    TooManyItems,
    /// Invalid pin string
    InvalidPin,
}

/// Errors from turning the file into a usable configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// File could not be parsed
    Parse(ParseError),
    /// Pedal table failed validation
    Invalid(ConfigError),
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        LoadError::Parse(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Midi,
    Loop,
    Pedal(usize),
}

/// Parse TOML configuration into a validated firmware configuration
pub fn parse_config(input: &str) -> Result<FirmwareConfig, LoadError> {
    let mut config = FirmwareConfig::default();
    let mut slots = [PedalConfig::default(); PEDAL_COUNT];
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            match section {
                Section::Pedal(slot) => apply_pedal_value(&mut slots[slot], key, value)?,
                Section::Midi => match key {
                    "channel" => {
                        config.midi.channel = Channel::from_number(parse_int(value)?)
                            .map_err(|_| ParseError::InvalidValue)?
                    }
                    "baud" => config.midi.baud = parse_int(value)?,
                    "running_status" => config.midi.running_status = parse_bool(value)?,
                    _ => {} // Ignore unknown keys
                },
                Section::Loop => {
                    if key == "tick_us" {
                        let tick_us: u32 = parse_int(value)?;
                        if !(MIN_TICK_US..=MAX_TICK_US).contains(&tick_us) {
                            return Err(ParseError::InvalidValue.into());
                        }
                        config.tick_us = tick_us;
                    }
                }
                Section::Root => {}
            }
        }
    }

    let analog_off_adc = slots
        .iter()
        .any(|p| !p.is_unused() && p.mode == PedalMode::Analog && !is_adc_capable(p.tip_pin));
    if analog_off_adc {
        return Err(ParseError::InvalidPin.into());
    }

    config.table = PedalTable::new(slots)?;
    Ok(config)
}

/// Parse section header like "midi" or "pedal.1"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();

    if let Some(slot) = header.strip_prefix("pedal.") {
        let slot: usize = slot.parse().map_err(|_| ParseError::InvalidSection)?;
        if slot >= PEDAL_COUNT {
            return Err(ParseError::TooManyItems);
        }
        return Ok(Section::Pedal(slot));
    }

    match header {
        "midi" => Ok(Section::Midi),
        "loop" => Ok(Section::Loop),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin like "gpio11", "!gpio12" or 11
///
/// Returns the pin number and whether it was marked active-low.
fn parse_pin(value: &str) -> Result<(u8, bool), ParseError> {
    let spec = parse_pin_string(parse_string(value)).ok_or(ParseError::InvalidPin)?;
    Ok((spec.pin, spec.inverted))
}

/// Parse pedal mode
fn parse_mode(value: &str) -> Result<PedalMode, ParseError> {
    match parse_string(value) {
        "single" => Ok(PedalMode::Single),
        "double" => Ok(PedalMode::Double),
        "analog" => Ok(PedalMode::Analog),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_pedal_value(pedal: &mut PedalConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "tip_pin" => {
            let (pin, inverted) = parse_pin(value)?;
            pedal.tip_pin = pin;
            pedal.inverted |= inverted;
        }
        "ring_pin" => pedal.ring_pin = parse_pin(value)?.0,
        "ground_pin" => pedal.ground_pin = parse_pin(value)?.0,
        "cc" | "midi_cc" => pedal.midi_cc = parse_int(value)?,
        "ring_cc" => pedal.ring_cc = Some(parse_int(value)?),
        "midi_min" => pedal.midi_min = parse_int(value)?,
        "midi_max" => pedal.midi_max = parse_int(value)?,
        "adc_min" => pedal.adc_min = parse_int(value)?,
        "adc_max" => pedal.adc_max = parse_int(value)?,
        "mode" => pedal.mode = parse_mode(value)?,
        "inverted" => pedal.inverted = parse_bool(value)?,
        "hysteresis" => pedal.hysteresis = parse_int(value)?,
        _ => {} // Ignore unknown keys
    }
    Ok(())
}
