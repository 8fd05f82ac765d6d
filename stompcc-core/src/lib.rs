//! Board-agnostic core logic for the pedal controller firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Pedal configuration table and its validation
//! - Rollover-safe tick timing
//! - Debouncing of footswitches and scaling of expression pedals
//! - The sampling engine turning pedal state into MIDI CC events
//! - Traits for the collaborators the engine talks to (inputs, clock, MIDI)

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod time;
pub mod traits;

pub use config::{ConfigError, PedalConfig, PedalMode, PedalTable, PEDAL_COUNT};
pub use engine::{Engine, MidiCcEvent, TickReport};
pub use time::{TimeState, DEBOUNCE_MICROS};
