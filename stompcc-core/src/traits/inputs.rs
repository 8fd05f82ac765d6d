//! Pedal input sampling

/// Access to the pins pedals are plugged into
///
/// Reads are treated as side-effect free samples of the physical state
/// at call time. Pins are addressed by the identifiers used in
/// [`PedalConfig`](crate::config::PedalConfig).
///
/// Takes `&mut self` because ADC conversions typically require mutable
/// access to the converter.
pub trait PedalInputs {
    /// Read the logic level of a digital pin (`true` = high)
    fn read_digital(&mut self, pin: u8) -> bool;

    /// Read an analog pin, scaled to the 10-bit range `0..=1023`
    fn read_analog(&mut self, pin: u8) -> u16;
}

impl<T: PedalInputs + ?Sized> PedalInputs for &mut T {
    fn read_digital(&mut self, pin: u8) -> bool {
        (**self).read_digital(pin)
    }

    fn read_analog(&mut self, pin: u8) -> u16 {
        (**self).read_analog(pin)
    }
}
