//! Pin-addressed pedal inputs
//!
//! Collects the digital inputs and the ADC a board exposes on its jacks
//! and serves them to the engine by pin number.

use heapless::{LinearMap, Vec};
use stompcc_core::traits::PedalInputs;
use stompcc_hal::{AnalogReader, InputPin};

/// Resolution the engine expects analog readings in
pub const ADC_BITS: u8 = 10;

/// Errors while populating a pin bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinBankError {
    /// Pin registered twice
    Duplicate(u8),
    /// No room for another pin
    Full,
}

/// Digital inputs and an ADC, addressed by pin number
///
/// Reads of a pin that was never registered return a released switch.
/// A failed ADC conversion returns the last good reading of that pin, or
/// zero if there is none.
pub struct PinBank<D, A, const N: usize> {
    digital: Vec<(u8, D), N>,
    adc: A,
    last_analog: LinearMap<u8, u16, N>,
}

impl<D: InputPin, A: AnalogReader, const N: usize> PinBank<D, A, N> {
    /// Create a bank around an ADC with no digital inputs yet
    pub fn new(adc: A) -> Self {
        Self {
            digital: Vec::new(),
            adc,
            last_analog: LinearMap::new(),
        }
    }

    /// Register a digital input under `pin`
    pub fn add_input(&mut self, pin: u8, input: D) -> Result<(), PinBankError> {
        if self.digital.iter().any(|(p, _)| *p == pin) {
            return Err(PinBankError::Duplicate(pin));
        }
        self.digital
            .push((pin, input))
            .map_err(|_| PinBankError::Full)
    }

    /// Number of registered digital inputs
    pub fn input_count(&self) -> usize {
        self.digital.len()
    }

    /// Mutable access to the ADC, for adding channels
    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }
}

impl<D: InputPin, A: AnalogReader, const N: usize> PedalInputs for PinBank<D, A, N> {
    fn read_digital(&mut self, pin: u8) -> bool {
        self.digital
            .iter()
            .find(|(p, _)| *p == pin)
            .is_some_and(|(_, input)| input.is_high())
    }

    fn read_analog(&mut self, pin: u8) -> u16 {
        match self.adc.read_scaled(pin, ADC_BITS) {
            Ok(value) => {
                // Cache is best-effort once full
                let _ = self.last_analog.insert(pin, value);
                value
            }
            Err(_) => self.last_analog.get(&pin).copied().unwrap_or(0),
        }
    }
}
