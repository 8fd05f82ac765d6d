//! MIDI Control Change wire formats
//!
//! Only the subset of MIDI 1.0 a pedal controller needs: Control Change
//! messages on a single channel.
//!
//! # Serial (DIN / TRS) format
//!
//! ```text
//! ┌─────────────┬────────────┬───────┐
//! │ STATUS      │ CONTROLLER │ VALUE │
//! │ 0xB0 | chan │ 0-127      │ 0-127 │
//! └─────────────┴────────────┴───────┘
//! ```
//!
//! With running status the status byte is left out while it does not
//! change. USB-MIDI wraps the same three bytes in a 4-byte event packet
//! whose header carries the cable number and the Code Index Number.

#![no_std]
#![deny(unsafe_code)]

pub mod encoder;
pub mod message;
pub mod parser;
pub mod usb;

pub use encoder::{CcEncoder, MAX_MESSAGE_SIZE};
pub use message::{Channel, ControlChange, MidiError, STATUS_CONTROL_CHANGE};
pub use parser::MidiParser;
pub use usb::{UsbMidiPacket, CIN_CONTROL_CHANGE};
