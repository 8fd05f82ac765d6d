//! ADC channel management
//!
//! RP2040 has a single 12-bit ADC with 5 channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//! - ADC4: Internal temperature sensor

use embassy_rp::adc::{Adc, Blocking, Channel};
use stompcc_hal::{AdcError, AnalogReader};

/// Native ADC resolution
pub const ADC_RESOLUTION_BITS: u8 = 12;

/// ADC channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// ADC0 on GPIO26
    Adc0,
    /// ADC1 on GPIO27
    Adc1,
    /// ADC2 on GPIO28
    Adc2,
    /// ADC3 on GPIO29
    Adc3,
    /// Internal temperature sensor
    Temperature,
}

impl AdcChannel {
    /// Get the GPIO pin for this ADC channel
    pub fn gpio(&self) -> Option<u8> {
        match self {
            AdcChannel::Adc0 => Some(26),
            AdcChannel::Adc1 => Some(27),
            AdcChannel::Adc2 => Some(28),
            AdcChannel::Adc3 => Some(29),
            AdcChannel::Temperature => None,
        }
    }

    /// Get ADC channel from GPIO pin
    pub fn from_gpio(gpio: u8) -> Option<Self> {
        match gpio {
            26 => Some(AdcChannel::Adc0),
            27 => Some(AdcChannel::Adc1),
            28 => Some(AdcChannel::Adc2),
            29 => Some(AdcChannel::Adc3),
            _ => None,
        }
    }

    /// Index among the GPIO-bonded channels
    fn slot(&self) -> Option<usize> {
        self.gpio().map(|gpio| (gpio - 26) as usize)
    }
}

/// Check whether a GPIO can be sampled by the ADC
pub fn is_adc_capable(gpio: u8) -> bool {
    AdcChannel::from_gpio(gpio).is_some()
}

/// Blocking ADC with the channels configured for analog pedals
pub struct RpAdc {
    adc: Adc<'static, Blocking>,
    channels: [Option<Channel<'static>>; 4],
}

impl RpAdc {
    pub fn new(adc: Adc<'static, Blocking>) -> Self {
        Self {
            adc,
            channels: [None, None, None, None],
        }
    }

    /// Attach a configured channel to the GPIO it samples
    pub fn add_channel(&mut self, gpio: u8, channel: Channel<'static>) -> Result<(), AdcError> {
        let slot = AdcChannel::from_gpio(gpio)
            .and_then(|c| c.slot())
            .ok_or(AdcError::InvalidChannel(gpio))?;
        self.channels[slot] = Some(channel);
        Ok(())
    }
}

impl AnalogReader for RpAdc {
    fn resolution_bits(&self) -> u8 {
        ADC_RESOLUTION_BITS
    }

    fn read_raw(&mut self, pin: u8) -> Result<u16, AdcError> {
        let channel = AdcChannel::from_gpio(pin)
            .and_then(|c| c.slot())
            .and_then(|slot| self.channels[slot].as_mut())
            .ok_or(AdcError::InvalidChannel(pin))?;
        self.adc
            .blocking_read(channel)
            .map_err(|_| AdcError::Conversion)
    }
}
