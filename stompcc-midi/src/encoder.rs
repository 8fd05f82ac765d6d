//! Stateful serial encoder with optional running status

use heapless::Vec;

use crate::message::{Channel, ControlChange, MidiError};

/// Longest encoded message (status + two data bytes)
pub const MAX_MESSAGE_SIZE: usize = 3;

/// Encodes Control Change messages for a serial MIDI link
///
/// With running status enabled the status byte is only sent when it
/// differs from the previous message. Call [`reset`](Self::reset) after
/// anything else has been written to the link.
#[derive(Debug, Clone)]
pub struct CcEncoder {
    channel: Channel,
    running_status: bool,
    last_status: Option<u8>,
}

impl CcEncoder {
    pub fn new(channel: Channel, running_status: bool) -> Self {
        Self {
            channel,
            running_status,
            last_status: None,
        }
    }

    /// Channel all messages are sent on
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Forget the last status byte so the next message carries it
    pub fn reset(&mut self) {
        self.last_status = None;
    }

    /// Encode a controller change on the encoder's channel
    pub fn encode(
        &mut self,
        controller: u8,
        value: u8,
    ) -> Result<Vec<u8, MAX_MESSAGE_SIZE>, MidiError> {
        let message = ControlChange::new(self.channel, controller, value)?;
        let status = message.status();

        let mut bytes = Vec::new();
        if !self.running_status || self.last_status != Some(status) {
            bytes.push(status).map_err(|_| MidiError::BufferTooSmall)?;
        }
        bytes
            .extend_from_slice(&[message.controller, message.value])
            .map_err(|_| MidiError::BufferTooSmall)?;

        self.last_status = Some(status);
        Ok(bytes)
    }
}
