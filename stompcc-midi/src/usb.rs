//! USB-MIDI event packets
//!
//! Each MIDI message travels in a 4-byte packet. The header byte holds the
//! virtual cable number in the high nibble and the Code Index Number in
//! the low nibble.

use crate::message::{ControlChange, MidiError};

/// Code Index Number for Control Change
pub const CIN_CONTROL_CHANGE: u8 = 0x0B;

/// A 4-byte USB-MIDI event packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsbMidiPacket([u8; 4]);

impl UsbMidiPacket {
    /// Wrap a Control Change for the given virtual cable (0-15)
    pub fn control_change(cable: u8, message: &ControlChange) -> Result<Self, MidiError> {
        if cable > 0x0F {
            return Err(MidiError::InvalidChannel(cable));
        }
        let [status, controller, value] = message.to_bytes();
        Ok(Self([(cable << 4) | CIN_CONTROL_CHANGE, status, controller, value]))
    }

    /// Virtual cable number
    pub fn cable(&self) -> u8 {
        self.0[0] >> 4
    }

    /// Code Index Number
    pub fn code_index(&self) -> u8 {
        self.0[0] & 0x0F
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Channel;

    #[test]
    fn test_packet_layout() {
        let cc = ControlChange::new(Channel::new(1).unwrap(), 64, 127).unwrap();
        let packet = UsbMidiPacket::control_change(0, &cc).unwrap();

        assert_eq!(packet.as_bytes(), &[0x0B, 0xB1, 64, 127]);
        assert_eq!(packet.code_index(), CIN_CONTROL_CHANGE);
    }

    #[test]
    fn test_cable_number() {
        let cc = ControlChange::new(Channel::default(), 1, 2).unwrap();
        let packet = UsbMidiPacket::control_change(3, &cc).unwrap();

        assert_eq!(packet.cable(), 3);
        assert_eq!(packet.as_bytes()[0], 0x3B);
        assert!(UsbMidiPacket::control_change(16, &cc).is_err());
    }
}
