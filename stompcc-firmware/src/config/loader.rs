//! Configuration loading with fallback
//!
//! A broken embedded configuration must not keep the controller from
//! booting: it falls back to an all-unused pedal table and logs why.

use defmt::*;

use stompcc_core::config::PedalConfig;

use super::toml::parse_config;
use super::FirmwareConfig;

/// Load the configuration, falling back to defaults on error
pub fn load_config(input: &str) -> FirmwareConfig {
    match parse_config(input) {
        Ok(config) => {
            info!(
                "Loaded embedded configuration: {} pedal(s), MIDI channel {}, {} baud, tick {} us",
                config.table.active_count(),
                config.midi.channel.number(),
                config.midi.baud,
                config.tick_us
            );
            for (slot, pedal) in config.table.iter().enumerate() {
                log_slot(slot, pedal);
            }
            config
        }
        Err(e) => {
            error!("Configuration rejected: {}", e);
            warn!("Falling back to defaults, all pedal slots unused");
            FirmwareConfig::default()
        }
    }
}

fn log_slot(slot: usize, pedal: &PedalConfig) {
    if pedal.is_unused() {
        info!("  pedal {}: unused", slot);
        return;
    }
    info!(
        "  pedal {}: {} tip=gpio{} ring=gpio{} cc={} range={}..{} inverted={}",
        slot,
        pedal.mode,
        pedal.tip_pin,
        pedal.ring_pin,
        pedal.midi_cc,
        pedal.midi_min,
        pedal.midi_max,
        pedal.inverted
    );
}
