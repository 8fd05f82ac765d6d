//! RP2040-specific HAL for the pedal controller firmware
//!
//! Implements the shared `stompcc-hal` traits for embassy-rp types, plus
//! RP2040-specific functionality:
//!
//! - GPIO allocation and pin string parsing
//! - Taking pins by number for config-driven setup
//! - ADC channel mapping and blocking reads
//! - Blocking UART transmit for MIDI

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod pins;
pub mod uart;

pub use adc::{AdcChannel, RpAdc};
pub use gpio::{parse_pin_string, GpioAllocator, GpioError, PinSpec, RpInput, RpOutput};
pub use pins::{Board, BoardPeripherals, PinError};
pub use uart::RpUartTx;

// Re-export shared traits from stompcc-hal for convenience
pub use stompcc_hal::{AdcError, AnalogReader, InputPin, OutputPin, UartConfig, UartTx};
