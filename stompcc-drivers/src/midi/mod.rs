//! MIDI transports

pub mod serial;

pub use serial::{SerialMidi, SerialMidiError};
