//! StompCC Hardware Abstraction Layer
//!
//! Traits implemented by chip-specific HALs so the pedal drivers can be
//! built and tested without real hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  stompcc-firmware                       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stompcc-drivers (PinBank, SerialMidi)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stompcc-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  stompcc-hal-rp2040                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`], [`gpio::OutputPin`] - Digital I/O
//! - [`adc::AnalogReader`] - Analog sampling
//! - [`uart::UartTx`] - Serial transmit

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod uart;

pub use adc::{AdcError, AnalogReader};
pub use gpio::{InputPin, OutputPin};
pub use uart::{UartConfig, UartTx, MIDI_BAUDRATE};
