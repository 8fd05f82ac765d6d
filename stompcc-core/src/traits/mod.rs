//! Collaborator traits
//!
//! These traits define the interface between the sampling engine and
//! the hardware it runs on.

pub mod clock;
pub mod inputs;
pub mod midi;

pub use clock::MicrosClock;
pub use inputs::PedalInputs;
pub use midi::MidiTransport;
