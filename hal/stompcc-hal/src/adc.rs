//! Analog-to-digital converter abstraction

/// ADC read errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Channel does not exist on this converter
    InvalidChannel(u8),
    /// Conversion failed or timed out
    Conversion,
}

/// A multi-channel ADC
///
/// Channels are addressed by the GPIO number they are bonded to, the same
/// identifiers the pedal configuration uses.
pub trait AnalogReader {
    /// Resolution of raw readings in bits
    fn resolution_bits(&self) -> u8;

    /// Take one raw reading from the channel on `pin`
    fn read_raw(&mut self, pin: u8) -> Result<u16, AdcError>;

    /// Take one reading rescaled to `bits` of resolution
    fn read_scaled(&mut self, pin: u8, bits: u8) -> Result<u16, AdcError> {
        let raw = self.read_raw(pin)?;
        let native = self.resolution_bits();
        Ok(if native > bits {
            raw >> (native - bits)
        } else {
            raw << (bits - native)
        })
    }
}
