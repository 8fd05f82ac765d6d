//! Taking pins by number for config-driven setup
//!
//! Pedal pins come from the configuration file, so they are only known at
//! boot. GPIO1-25 are erased to `AnyPin` and handed out by number.
//! GPIO26-29 stay typed because the ADC needs the concrete pin type; they
//! can still be taken as plain digital pins. GPIO0 is MIDI out.

use embassy_rp::adc::Channel;
use embassy_rp::gpio::{AnyPin, Pull};
use embassy_rp::peripherals::{ADC, PIN_0, PIN_26, PIN_27, PIN_28, PIN_29, UART0};
use embassy_rp::{Peri, Peripherals};

/// Number of pins erased to `AnyPin` (GPIO0-25, GPIO0 never handed out)
const BANK_SIZE: usize = 26;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin already taken
    AlreadyTaken(u8),
    /// Pin reserved for MIDI out
    Reserved(u8),
    /// Pin has no ADC channel
    NotAnalog(u8),
}

/// GPIO26-29, kept typed for the ADC
struct AdcPins {
    pin26: Option<Peri<'static, PIN_26>>,
    pin27: Option<Peri<'static, PIN_27>>,
    pin28: Option<Peri<'static, PIN_28>>,
    pin29: Option<Peri<'static, PIN_29>>,
}

/// Pins available to pedal jacks, taken by number
pub struct Board {
    pins: [Option<Peri<'static, AnyPin>>; BANK_SIZE],
    adc_pins: AdcPins,
}

/// Non-GPIO peripherals that remain after creating the board
pub struct BoardPeripherals {
    /// ADC peripheral
    pub adc: Peri<'static, ADC>,
    /// UART used for MIDI out
    pub uart0: Peri<'static, UART0>,
    /// MIDI out TX pin
    pub midi_tx: Peri<'static, PIN_0>,
}

impl Board {
    /// Split the embassy peripherals
    pub fn split(p: Peripherals) -> (Self, BoardPeripherals) {
        let board = Self {
            pins: [
                None, // GPIO0: MIDI out
                Some(p.PIN_1.into()),
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
            ],
            adc_pins: AdcPins {
                pin26: Some(p.PIN_26),
                pin27: Some(p.PIN_27),
                pin28: Some(p.PIN_28),
                pin29: Some(p.PIN_29),
            },
        };
        let rest = BoardPeripherals {
            adc: p.ADC,
            uart0: p.UART0,
            midi_tx: p.PIN_0,
        };
        (board, rest)
    }

    /// Take a pin by number for digital use
    pub fn take(&mut self, pin: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        match pin {
            0 => Err(PinError::Reserved(pin)),
            1..=25 => self.pins[pin as usize]
                .take()
                .ok_or(PinError::AlreadyTaken(pin)),
            26 => self.adc_pins.pin26.take().map(Into::into).ok_or(PinError::AlreadyTaken(pin)),
            27 => self.adc_pins.pin27.take().map(Into::into).ok_or(PinError::AlreadyTaken(pin)),
            28 => self.adc_pins.pin28.take().map(Into::into).ok_or(PinError::AlreadyTaken(pin)),
            29 => self.adc_pins.pin29.take().map(Into::into).ok_or(PinError::AlreadyTaken(pin)),
            _ => Err(PinError::InvalidPin(pin)),
        }
    }

    /// Take an ADC-capable pin as an analog channel
    pub fn take_analog(&mut self, pin: u8) -> Result<Channel<'static>, PinError> {
        let taken = PinError::AlreadyTaken(pin);
        let channel = match pin {
            26 => Channel::new_pin(self.adc_pins.pin26.take().ok_or(taken)?, Pull::None),
            27 => Channel::new_pin(self.adc_pins.pin27.take().ok_or(taken)?, Pull::None),
            28 => Channel::new_pin(self.adc_pins.pin28.take().ok_or(taken)?, Pull::None),
            29 => Channel::new_pin(self.adc_pins.pin29.take().ok_or(taken)?, Pull::None),
            30.. => return Err(PinError::InvalidPin(pin)),
            _ => return Err(PinError::NotAnalog(pin)),
        };
        Ok(channel)
    }
}
