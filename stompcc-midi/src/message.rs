//! Control Change message

/// Status nibble of a Control Change message
pub const STATUS_CONTROL_CHANGE: u8 = 0xB0;

/// Highest value a MIDI data byte can carry
pub const DATA_MAX: u8 = 0x7F;

/// Errors from building, encoding or parsing MIDI messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MidiError {
    /// Channel outside 0-15 (or 1-16 when given as a user number)
    InvalidChannel(u8),
    /// Data byte with the high bit set
    InvalidData(u8),
    /// Data byte received without a preceding status
    UnexpectedData(u8),
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// MIDI channel, stored zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

impl Channel {
    /// Create from a zero-based index (0-15)
    pub const fn new(index: u8) -> Result<Self, MidiError> {
        if index > 15 {
            return Err(MidiError::InvalidChannel(index));
        }
        Ok(Self(index))
    }

    /// Create from the 1-16 numbering shown to users
    pub const fn from_number(number: u8) -> Result<Self, MidiError> {
        if number == 0 || number > 16 {
            return Err(MidiError::InvalidChannel(number));
        }
        Ok(Self(number - 1))
    }

    /// Zero-based index
    pub const fn index(&self) -> u8 {
        self.0
    }

    /// 1-16 numbering
    pub const fn number(&self) -> u8 {
        self.0 + 1
    }
}

/// A Control Change message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlChange {
    pub channel: Channel,
    pub controller: u8,
    pub value: u8,
}

impl ControlChange {
    /// Create a message, checking both data bytes
    pub fn new(channel: Channel, controller: u8, value: u8) -> Result<Self, MidiError> {
        check_data(controller)?;
        check_data(value)?;
        Ok(Self {
            channel,
            controller,
            value,
        })
    }

    /// Status byte: `0xB0 | channel`
    pub fn status(&self) -> u8 {
        STATUS_CONTROL_CHANGE | self.channel.index()
    }

    /// Full three-byte message
    pub fn to_bytes(&self) -> [u8; 3] {
        [self.status(), self.controller, self.value]
    }

    /// Encode into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, MidiError> {
        let bytes = self.to_bytes();
        let target = buffer
            .get_mut(..bytes.len())
            .ok_or(MidiError::BufferTooSmall)?;
        target.copy_from_slice(&bytes);
        Ok(bytes.len())
    }
}

pub(crate) fn check_data(byte: u8) -> Result<u8, MidiError> {
    if byte > DATA_MAX {
        Err(MidiError::InvalidData(byte))
    } else {
        Ok(byte)
    }
}
