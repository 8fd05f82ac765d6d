//! Engine-side MIDI transport and clock
//!
//! The engine sends into the MIDI queue; the MIDI TX task drains it.

use embassy_time::Instant;
use stompcc_core::traits::{MicrosClock, MidiTransport};

use crate::channels::{OutgoingCc, MIDI_CHANNEL};

/// The MIDI queue was full, the message was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull;

/// Transport that enqueues messages for the MIDI TX task
pub struct QueueTransport;

impl MidiTransport for QueueTransport {
    type Error = QueueFull;

    fn send_control_change(&mut self, controller: u8, value: u8) -> Result<(), Self::Error> {
        MIDI_CHANNEL
            .try_send(OutgoingCc { controller, value })
            .map_err(|_| QueueFull)
    }
}

/// Microsecond clock from the embassy time driver
///
/// Truncated to 32 bits, so it wraps about every 71 minutes.
pub struct EmbassyClock;

impl MicrosClock for EmbassyClock {
    fn now_micros(&self) -> u32 {
        Instant::now().as_micros() as u32
    }
}
