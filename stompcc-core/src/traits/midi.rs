//! MIDI output

/// Sink for Control Change messages
///
/// The engine does not care whether messages go out over a DIN serial
/// port, USB-MIDI or somewhere else. Retrying failed sends is up to the
/// implementation; the engine only counts failures.
pub trait MidiTransport {
    /// Error type for send operations
    type Error;

    /// Send a Control Change message
    ///
    /// `controller` and `value` are both in `0..=127`.
    fn send_control_change(&mut self, controller: u8, value: u8) -> Result<(), Self::Error>;
}

impl<T: MidiTransport + ?Sized> MidiTransport for &mut T {
    type Error = T::Error;

    fn send_control_change(&mut self, controller: u8, value: u8) -> Result<(), Self::Error> {
        (**self).send_control_change(controller, value)
    }
}
