//! Configuration loading and parsing
//!
//! The pedal setup is compiled in from pedals.toml and parsed at boot by
//! a custom no_std parser.

pub mod loader;
pub mod toml;

pub use loader::load_config;
pub use toml::{parse_config, LoadError, ParseError};

use stompcc_core::config::PedalTable;
use stompcc_midi::Channel;

/// Standard MIDI serial rate
pub const DEFAULT_BAUD: u32 = 31_250;

/// Default control loop period (µs)
pub const DEFAULT_TICK_US: u32 = 1000;

/// Accepted control loop period range (µs)
pub const MIN_TICK_US: u32 = 100;
pub const MAX_TICK_US: u32 = 100_000;

/// MIDI output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MidiSettings {
    pub channel: Channel,
    pub baud: u32,
    pub running_status: bool,
}

impl Default for MidiSettings {
    fn default() -> Self {
        Self {
            channel: Channel::default(),
            baud: DEFAULT_BAUD,
            running_status: false,
        }
    }
}

/// Everything the firmware reads from pedals.toml
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareConfig {
    pub table: PedalTable,
    pub midi: MidiSettings,
    pub tick_us: u32,
}

/// All pedals unused, MIDI channel 1
impl Default for FirmwareConfig {
    fn default() -> Self {
        Self {
            table: PedalTable::empty(),
            midi: MidiSettings::default(),
            tick_us: DEFAULT_TICK_US,
        }
    }
}
