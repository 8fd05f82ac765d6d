//! GPIO allocation and adapters
//!
//! Tracks which GPIO pins are in use so two pedal slots (or a pedal and
//! the MIDI port) cannot claim the same pin.

use embassy_rp::gpio::{Input, Output};
use heapless::FnvIndexSet;

/// Number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// GPIO allocation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin already in use
    InUse(u8),
}

/// GPIO allocator to track pin usage
pub struct GpioAllocator {
    allocated: FnvIndexSet<u8, 32>,
}

impl Default for GpioAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioAllocator {
    pub fn new() -> Self {
        Self {
            allocated: FnvIndexSet::new(),
        }
    }

    /// Allocate a GPIO pin
    pub fn allocate(&mut self, pin: u8) -> Result<(), GpioError> {
        if pin >= GPIO_COUNT {
            return Err(GpioError::InvalidPin(pin));
        }
        if self.allocated.contains(&pin) {
            return Err(GpioError::InUse(pin));
        }
        self.allocated
            .insert(pin)
            .map(|_| ())
            .map_err(|_| GpioError::InvalidPin(pin))
    }

    /// Release a GPIO pin
    pub fn release(&mut self, pin: u8) {
        self.allocated.remove(&pin);
    }

    /// Check if a pin is allocated
    pub fn is_allocated(&self, pin: u8) -> bool {
        self.allocated.contains(&pin)
    }

    /// Get the number of allocated pins
    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }
}

/// A parsed pin reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSpec {
    pub pin: u8,
    /// Active-low (`!` prefix)
    pub inverted: bool,
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio11" -> pin 11
/// - "!gpio12" -> pin 12, active-low
/// - "11" -> pin 11
pub fn parse_pin_string(s: &str) -> Option<PinSpec> {
    let s = s.trim();
    let (s, inverted) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let digits = s.strip_prefix("gpio").unwrap_or(s);
    let pin: u8 = digits.parse().ok()?;
    if pin >= GPIO_COUNT {
        return None;
    }

    Some(PinSpec { pin, inverted })
}

/// Digital input backed by an embassy-rp pin
pub struct RpInput(Input<'static>);

impl RpInput {
    pub fn new(input: Input<'static>) -> Self {
        Self(input)
    }
}

impl stompcc_hal::InputPin for RpInput {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Digital output backed by an embassy-rp pin
pub struct RpOutput(Output<'static>);

impl RpOutput {
    pub fn new(output: Output<'static>) -> Self {
        Self(output)
    }
}

impl stompcc_hal::OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator() {
        let mut alloc = GpioAllocator::new();

        assert!(alloc.allocate(11).is_ok());
        assert!(alloc.is_allocated(11));

        // Can't allocate same pin twice
        assert_eq!(alloc.allocate(11), Err(GpioError::InUse(11)));
        assert_eq!(alloc.allocate(30), Err(GpioError::InvalidPin(30)));

        // Release and re-allocate
        alloc.release(11);
        assert!(!alloc.is_allocated(11));
        assert!(alloc.allocate(11).is_ok());
        assert_eq!(alloc.allocated_count(), 1);
    }

    #[test]
    fn test_parse_pin_string() {
        let plain = parse_pin_string("gpio11").unwrap();
        assert_eq!((plain.pin, plain.inverted), (11, false));

        let inverted = parse_pin_string("!gpio12").unwrap();
        assert_eq!((inverted.pin, inverted.inverted), (12, true));

        assert_eq!(parse_pin_string(" 7 ").map(|p| p.pin), Some(7));
        assert_eq!(parse_pin_string("gpio29").map(|p| p.pin), Some(29));

        // Invalid
        assert_eq!(parse_pin_string("gpio30"), None);
        assert_eq!(parse_pin_string("pin11"), None);
        assert_eq!(parse_pin_string("!!gpio3"), None);
        assert_eq!(parse_pin_string(""), None);
    }
}
