//! Serial MIDI output
//!
//! Writes Control Change messages to a UART running at MIDI rate
//! (31250 baud, 8N1).

use stompcc_core::traits::MidiTransport;
use stompcc_hal::UartTx;
use stompcc_midi::{CcEncoder, Channel, MidiError};

/// Serial MIDI send errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialMidiError<E> {
    /// Message could not be encoded
    Midi(MidiError),
    /// UART write failed
    Uart(E),
}

impl<E> From<MidiError> for SerialMidiError<E> {
    fn from(err: MidiError) -> Self {
        SerialMidiError::Midi(err)
    }
}

/// MIDI transport over a UART
pub struct SerialMidi<U> {
    uart: U,
    encoder: CcEncoder,
}

impl<U: UartTx> SerialMidi<U> {
    /// Create a transport sending on `channel`
    ///
    /// With `running_status` the status byte is omitted while it repeats.
    pub fn new(uart: U, channel: Channel, running_status: bool) -> Self {
        Self {
            uart,
            encoder: CcEncoder::new(channel, running_status),
        }
    }

    /// Channel messages are sent on
    pub fn channel(&self) -> Channel {
        self.encoder.channel()
    }

    /// Flush the UART
    pub fn flush(&mut self) -> Result<(), SerialMidiError<U::Error>> {
        self.uart.flush().map_err(SerialMidiError::Uart)
    }

    /// Release the UART
    pub fn into_inner(self) -> U {
        self.uart
    }
}

impl<U: UartTx> MidiTransport for SerialMidi<U> {
    type Error = SerialMidiError<U::Error>;

    fn send_control_change(&mut self, controller: u8, value: u8) -> Result<(), Self::Error> {
        let bytes = self.encoder.encode(controller, value)?;
        self.uart.write_blocking(&bytes).map_err(|err| {
            // The receiver may have missed the status byte
            self.encoder.reset();
            SerialMidiError::Uart(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock UART capturing written bytes
    #[derive(Default)]
    struct MockUart {
        written: heapless::Vec<u8, 32>,
        fail_next: bool,
    }

    impl UartTx for MockUart {
        type Error = ();

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail_next {
                self.fail_next = false;
                return Err(());
            }
            self.written.extend_from_slice(data).map_err(|_| ())
        }

        fn flush(&mut self) -> Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn test_sends_full_message() {
        let mut midi = SerialMidi::new(MockUart::default(), Channel::default(), false);

        midi.send_control_change(64, 127).unwrap();
        midi.send_control_change(64, 0).unwrap();
        assert_eq!(midi.into_inner().written.as_slice(), &[0xB0, 64, 127, 0xB0, 64, 0]);
    }

    #[test]
    fn test_running_status() {
        let channel = Channel::from_number(2).unwrap();
        let mut midi = SerialMidi::new(MockUart::default(), channel, true);

        midi.send_control_change(11, 1).unwrap();
        midi.send_control_change(11, 2).unwrap();
        assert_eq!(midi.into_inner().written.as_slice(), &[0xB1, 11, 1, 11, 2]);
    }

    #[test]
    fn test_uart_failure_resends_status() {
        let mut midi = SerialMidi::new(MockUart::default(), Channel::default(), true);

        midi.send_control_change(1, 1).unwrap();
        midi.uart.fail_next = true;
        assert_eq!(midi.send_control_change(1, 2), Err(SerialMidiError::Uart(())));
        midi.send_control_change(1, 3).unwrap();

        assert_eq!(midi.into_inner().written.as_slice(), &[0xB0, 1, 1, 0xB0, 1, 3]);
    }

    #[test]
    fn test_invalid_data_is_not_written() {
        let mut midi = SerialMidi::new(MockUart::default(), Channel::default(), false);

        assert_eq!(
            midi.send_control_change(130, 1),
            Err(SerialMidiError::Midi(MidiError::InvalidData(130)))
        );
        assert!(midi.into_inner().written.is_empty());
    }
}
