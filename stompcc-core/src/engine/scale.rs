//! ADC to MIDI value mapping

use crate::config::PedalConfig;

/// Map a raw ADC reading into the slot's MIDI output range
///
/// The reading is clamped to `adc_min..=adc_max` first, then mapped
/// linearly with round-to-nearest. A zero-width input range yields
/// `midi_min`.
pub fn scale_adc(raw: u16, config: &PedalConfig) -> u8 {
    let (adc_min, adc_max) = (config.adc_min as u32, config.adc_max as u32);
    let (midi_min, midi_max) = (config.midi_min as u32, config.midi_max as u32);

    if adc_max <= adc_min {
        return config.midi_min;
    }

    let offset = (raw as u32).clamp(adc_min, adc_max) - adc_min;
    let span_in = adc_max - adc_min;
    let span_out = midi_max.saturating_sub(midi_min);

    let scaled = midi_min + (offset * span_out + span_in / 2) / span_in;
    scaled.min(midi_max) as u8
}

/// Suppresses repeated and jittering analog values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogFilter {
    last_sent: Option<u8>,
}

impl AnalogFilter {
    pub const fn new() -> Self {
        Self { last_sent: None }
    }

    /// Last value passed through, if any
    pub fn last_sent(&self) -> Option<u8> {
        self.last_sent
    }

    /// Decide whether `value` should be sent
    ///
    /// The first value always passes. Later values pass when they differ
    /// from the last one by more than the slot's hysteresis, or when they
    /// land exactly on `midi_min` or `midi_max`.
    pub fn update(&mut self, value: u8, config: &PedalConfig) -> Option<u8> {
        let pass = match self.last_sent {
            None => true,
            Some(last) if last == value => false,
            Some(last) => {
                last.abs_diff(value) > config.hysteresis
                    || value == config.midi_min
                    || value == config.midi_max
            }
        };

        if pass {
            self.last_sent = Some(value);
            Some(value)
        } else {
            None
        }
    }
}
