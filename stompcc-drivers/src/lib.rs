//! Hardware driver implementations
//!
//! Concrete implementations of the traits defined in stompcc-core, built
//! on the stompcc-hal abstractions:
//!
//! - Pedal inputs (GPIO switches, ADC wipers, sleeve drive)
//! - MIDI output (serial DIN/TRS)

#![no_std]
#![deny(unsafe_code)]

pub mod input;
pub mod midi;
