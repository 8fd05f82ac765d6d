//! Per-slot pedal configuration
//!
//! A slot describes one TRS jack: which pins carry tip, ring and sleeve,
//! how the pedal plugged into it behaves and which MIDI controller it
//! drives.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pin identifier meaning "not connected"
pub const UNUSED_PIN: u8 = 0;

/// Highest valid MIDI data byte (controller number or value)
pub const MIDI_DATA_MAX: u8 = 127;

/// Highest raw reading of the 10-bit ADC
pub const ADC_MAX: u16 = 1023;

/// Default controller: sustain pedal
pub const DEFAULT_CC: u8 = 64;

/// How a slot's inputs are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PedalMode {
    /// One footswitch on the tip
    #[default]
    Single,
    /// Two footswitches, one on the tip and one on the ring
    Double,
    /// Expression pedal (potentiometer wiper on the tip)
    Analog,
}

/// Configuration validation errors
///
/// Each variant carries the slot index it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Controller number above 127
    InvalidController(usize),
    /// MIDI output bound above 127
    MidiRangeOutOfBounds(usize),
    /// `midi_min` greater than `midi_max`
    MidiRangeInverted(usize),
    /// ADC bound above 1023
    AdcRangeOutOfBounds(usize),
    /// `adc_min` greater than `adc_max`
    AdcRangeInverted(usize),
    /// Double mode without a ring pin
    MissingRingPin(usize),
    /// A pin is assigned twice (within a slot or across slots)
    PinConflict(usize, u8),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidController(slot) => {
                write!(f, "pedal {}: controller number above 127", slot)
            }
            ConfigError::MidiRangeOutOfBounds(slot) => {
                write!(f, "pedal {}: MIDI bound above 127", slot)
            }
            ConfigError::MidiRangeInverted(slot) => {
                write!(f, "pedal {}: midi_min greater than midi_max", slot)
            }
            ConfigError::AdcRangeOutOfBounds(slot) => {
                write!(f, "pedal {}: ADC bound above 1023", slot)
            }
            ConfigError::AdcRangeInverted(slot) => {
                write!(f, "pedal {}: adc_min greater than adc_max", slot)
            }
            ConfigError::MissingRingPin(slot) => {
                write!(f, "pedal {}: double mode needs a ring pin", slot)
            }
            ConfigError::PinConflict(slot, pin) => {
                write!(f, "pedal {}: gpio{} assigned twice", slot, pin)
            }
        }
    }
}

/// Configuration of a single pedal slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PedalConfig {
    /// Tip pin (switch or wiper)
    pub tip_pin: u8,
    /// Ring pin (second switch in double mode)
    pub ring_pin: u8,
    /// Sleeve pin, driven low by the board if wired to a GPIO
    pub ground_pin: u8,
    /// Controller number reported by the tip
    pub midi_cc: u8,
    /// Controller number reported by the ring in double mode
    ///
    /// `None` reuses `midi_cc`.
    pub ring_cc: Option<u8>,
    /// Value sent for a released switch / pedal heel down
    pub midi_min: u8,
    /// Value sent for a pressed switch / pedal toe down
    pub midi_max: u8,
    /// Raw ADC reading mapped to `midi_min`
    pub adc_min: u16,
    /// Raw ADC reading mapped to `midi_max`
    pub adc_max: u16,
    /// Pedal type
    pub mode: PedalMode,
    /// Switch reads as pressed when the pin is low
    pub inverted: bool,
    /// Analog changes up to this many steps are treated as jitter
    pub hysteresis: u8,
}

impl Default for PedalConfig {
    fn default() -> Self {
        Self {
            tip_pin: UNUSED_PIN,
            ring_pin: UNUSED_PIN,
            ground_pin: UNUSED_PIN,
            midi_cc: DEFAULT_CC,
            ring_cc: None,
            midi_min: 0,
            midi_max: MIDI_DATA_MAX,
            adc_min: 0,
            adc_max: ADC_MAX,
            mode: PedalMode::Single,
            inverted: false,
            hysteresis: 0,
        }
    }
}

impl PedalConfig {
    /// Create a single footswitch on the given tip pin
    pub const fn single(tip_pin: u8, midi_cc: u8) -> Self {
        Self {
            tip_pin,
            ring_pin: UNUSED_PIN,
            ground_pin: UNUSED_PIN,
            midi_cc,
            ring_cc: None,
            midi_min: 0,
            midi_max: MIDI_DATA_MAX,
            adc_min: 0,
            adc_max: ADC_MAX,
            mode: PedalMode::Single,
            inverted: false,
            hysteresis: 0,
        }
    }

    /// Create a dual footswitch on tip and ring
    pub const fn double(tip_pin: u8, ring_pin: u8, midi_cc: u8, ring_cc: u8) -> Self {
        let mut config = Self::single(tip_pin, midi_cc);
        config.ring_pin = ring_pin;
        config.ring_cc = Some(ring_cc);
        config.mode = PedalMode::Double;
        config
    }

    /// Create an expression pedal with the wiper on the tip pin
    pub const fn analog(tip_pin: u8, midi_cc: u8) -> Self {
        let mut config = Self::single(tip_pin, midi_cc);
        config.mode = PedalMode::Analog;
        config
    }

    /// Check if nothing is plugged into this slot
    pub fn is_unused(&self) -> bool {
        self.tip_pin == UNUSED_PIN
    }

    /// Controller number reported by the ring switch
    pub fn ring_controller(&self) -> u8 {
        self.ring_cc.unwrap_or(self.midi_cc)
    }

    /// Check whether the ring switch takes part in sampling
    pub fn uses_ring(&self) -> bool {
        self.mode == PedalMode::Double && self.ring_pin != UNUSED_PIN
    }

    /// Pins this slot reads or drives, unused ones omitted
    pub fn pins(&self) -> impl Iterator<Item = u8> {
        [self.tip_pin, self.ring_pin, self.ground_pin]
            .into_iter()
            .filter(|&pin| pin != UNUSED_PIN)
    }

    /// Validate this slot's ranges and pin assignment
    ///
    /// Unused slots are always valid regardless of the other fields.
    pub fn validate(&self, slot: usize) -> Result<(), ConfigError> {
        if self.is_unused() {
            return Ok(());
        }

        if self.midi_cc > MIDI_DATA_MAX {
            return Err(ConfigError::InvalidController(slot));
        }
        if let Some(cc) = self.ring_cc {
            if cc > MIDI_DATA_MAX {
                return Err(ConfigError::InvalidController(slot));
            }
        }

        if self.midi_min > MIDI_DATA_MAX || self.midi_max > MIDI_DATA_MAX {
            return Err(ConfigError::MidiRangeOutOfBounds(slot));
        }
        if self.midi_min > self.midi_max {
            return Err(ConfigError::MidiRangeInverted(slot));
        }

        if self.adc_min > ADC_MAX || self.adc_max > ADC_MAX {
            return Err(ConfigError::AdcRangeOutOfBounds(slot));
        }
        if self.adc_min > self.adc_max {
            return Err(ConfigError::AdcRangeInverted(slot));
        }

        if self.mode == PedalMode::Double && self.ring_pin == UNUSED_PIN {
            return Err(ConfigError::MissingRingPin(slot));
        }

        // Tip, ring and sleeve must be distinct
        let pins = [self.tip_pin, self.ring_pin, self.ground_pin];
        for (i, &a) in pins.iter().enumerate() {
            if a == UNUSED_PIN {
                continue;
            }
            if pins[i + 1..].contains(&a) {
                return Err(ConfigError::PinConflict(slot, a));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_sustain_pedal() {
        let config = PedalConfig::default();
        assert!(config.is_unused());
        assert_eq!(config.midi_cc, 64);
        assert_eq!(config.midi_min, 0);
        assert_eq!(config.midi_max, 127);
        assert_eq!(config.adc_min, 0);
        assert_eq!(config.adc_max, 1023);
        assert_eq!(config.mode, PedalMode::Single);
        assert_eq!(config.validate(0), Ok(()));
    }

    #[test]
    fn test_unused_slot_skips_validation() {
        let config = PedalConfig {
            midi_min: 100,
            midi_max: 10,
            ..Default::default()
        };
        assert_eq!(config.validate(2), Ok(()));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut config = PedalConfig::single(3, 128);
        assert_eq!(config.validate(0), Err(ConfigError::InvalidController(0)));

        config.midi_cc = 64;
        config.ring_cc = Some(200);
        assert_eq!(config.validate(0), Err(ConfigError::InvalidController(0)));

        config.ring_cc = None;
        config.midi_max = 128;
        assert_eq!(config.validate(1), Err(ConfigError::MidiRangeOutOfBounds(1)));

        config.midi_max = 127;
        config.adc_max = 1024;
        assert_eq!(config.validate(1), Err(ConfigError::AdcRangeOutOfBounds(1)));
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        let mut config = PedalConfig::analog(26, 11);
        config.midi_min = 90;
        config.midi_max = 10;
        assert_eq!(config.validate(2), Err(ConfigError::MidiRangeInverted(2)));

        config.midi_min = 0;
        config.midi_max = 127;
        config.adc_min = 900;
        config.adc_max = 100;
        assert_eq!(config.validate(2), Err(ConfigError::AdcRangeInverted(2)));
    }

    #[test]
    fn test_double_requires_ring_pin() {
        let mut config = PedalConfig::double(4, 5, 80, 81);
        assert_eq!(config.validate(0), Ok(()));

        config.ring_pin = UNUSED_PIN;
        assert_eq!(config.validate(0), Err(ConfigError::MissingRingPin(0)));
    }

    #[test]
    fn test_pin_conflict_within_slot() {
        let mut config = PedalConfig::double(4, 4, 80, 81);
        assert_eq!(config.validate(1), Err(ConfigError::PinConflict(1, 4)));

        config.ring_pin = 5;
        config.ground_pin = 5;
        assert_eq!(config.validate(1), Err(ConfigError::PinConflict(1, 5)));
    }

    #[test]
    fn test_ring_controller_falls_back_to_tip() {
        let mut config = PedalConfig::double(4, 5, 80, 81);
        assert_eq!(config.ring_controller(), 81);

        config.ring_cc = None;
        assert_eq!(config.ring_controller(), 80);
    }

    #[test]
    fn test_pins_skip_unused() {
        let config = PedalConfig::single(7, 64);
        let mut pins = config.pins();
        assert_eq!(pins.next(), Some(7));
        assert_eq!(pins.next(), None);
    }
}
