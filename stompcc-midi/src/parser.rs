//! Incoming MIDI byte stream parsing
//!
//! Extracts Control Change messages from a serial stream. Real-time bytes
//! may appear anywhere and are skipped. Other message types are consumed
//! and dropped.

use crate::message::{Channel, ControlChange, MidiError};

/// First real-time status byte (clock, start, stop, ...)
const REALTIME_START: u8 = 0xF8;

/// State machine for parsing Control Change messages
#[derive(Debug, Clone)]
pub struct MidiParser {
    state: ParseState,
    status: u8,
    controller: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// No status seen yet
    Idle,
    /// Inside a message type we do not decode
    Skipping,
    /// Have a CC status, waiting for the controller number
    WaitingForController,
    /// Waiting for the value
    WaitingForValue,
}

impl Default for MidiParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MidiParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Idle,
            status: 0,
            controller: 0,
        }
    }

    /// Reset the parser state, dropping any running status
    pub fn reset(&mut self) {
        self.state = ParseState::Idle;
        self.status = 0;
        self.controller = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(message))` when a Control Change is complete,
    /// `Ok(None)` when more bytes are needed, or `Err` for a data byte
    /// that has no status to belong to.
    pub fn feed(&mut self, byte: u8) -> Result<Option<ControlChange>, MidiError> {
        if byte >= REALTIME_START {
            return Ok(None);
        }

        if byte & 0x80 != 0 {
            if byte & 0xF0 == crate::message::STATUS_CONTROL_CHANGE {
                self.status = byte;
                self.state = ParseState::WaitingForController;
            } else {
                self.state = ParseState::Skipping;
            }
            return Ok(None);
        }

        match self.state {
            ParseState::Idle => Err(MidiError::UnexpectedData(byte)),
            ParseState::Skipping => Ok(None),
            ParseState::WaitingForController => {
                self.controller = byte;
                self.state = ParseState::WaitingForValue;
                Ok(None)
            }
            ParseState::WaitingForValue => {
                // Running status: the next data byte starts a new message
                self.state = ParseState::WaitingForController;
                let channel = Channel::new(self.status & 0x0F)?;
                ControlChange::new(channel, self.controller, byte).map(Some)
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete message found, if any.
    /// Remaining bytes after a complete message are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<ControlChange>, MidiError> {
        for &byte in bytes {
            if let Some(message) = self.feed(byte)? {
                return Ok(Some(message));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::CcEncoder;
    use proptest::prelude::*;

    fn collect(parser: &mut MidiParser, bytes: &[u8]) -> heapless::Vec<ControlChange, 16> {
        let mut out = heapless::Vec::new();
        for &byte in bytes {
            if let Ok(Some(message)) = parser.feed(byte) {
                out.push(message).unwrap();
            }
        }
        out
    }

    #[test]
    fn test_parse_single_message() {
        let mut parser = MidiParser::new();
        let message = parser.feed_bytes(&[0xB3, 7, 100]).unwrap().unwrap();

        assert_eq!(message.channel.index(), 3);
        assert_eq!(message.controller, 7);
        assert_eq!(message.value, 100);
    }

    #[test]
    fn test_running_status() {
        let mut parser = MidiParser::new();
        let messages = collect(&mut parser, &[0xB0, 64, 127, 64, 0, 11, 50]);

        assert_eq!(messages.len(), 3);
        assert_eq!((messages[1].controller, messages[1].value), (64, 0));
        assert_eq!((messages[2].controller, messages[2].value), (11, 50));
    }

    #[test]
    fn test_realtime_bytes_are_transparent() {
        let mut parser = MidiParser::new();
        let messages = collect(&mut parser, &[0xF8, 0xB0, 0xF8, 64, 0xFE, 127]);

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].value, 127);
    }

    #[test]
    fn test_other_messages_are_skipped() {
        let mut parser = MidiParser::new();
        // Note on with running status, then a CC
        let messages = collect(&mut parser, &[0x90, 60, 100, 62, 100, 0xB1, 1, 2]);

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].channel.index(), 1);
    }

    #[test]
    fn test_data_without_status() {
        let mut parser = MidiParser::new();
        assert_eq!(parser.feed(0x40), Err(MidiError::UnexpectedData(0x40)));
    }

    proptest! {
        #[test]
        fn prop_encoder_output_parses_back(
            channel in 0u8..16,
            running_status: bool,
            pairs in proptest::collection::vec((0u8..=127, 0u8..=127), 1..8),
        ) {
            let mut encoder = CcEncoder::new(Channel::new(channel).unwrap(), running_status);
            let mut parser = MidiParser::new();

            for (controller, value) in pairs {
                let bytes = encoder.encode(controller, value).unwrap();
                let message = parser.feed_bytes(&bytes).unwrap().unwrap();
                prop_assert_eq!(message.channel.index(), channel);
                prop_assert_eq!((message.controller, message.value), (controller, value));
            }
        }
    }
}
