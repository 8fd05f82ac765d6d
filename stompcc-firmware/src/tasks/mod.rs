//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod midi_tx;
pub mod pedal;

pub use midi_tx::midi_tx_task;
pub use pedal::{pedal_task, PedalEngine};
