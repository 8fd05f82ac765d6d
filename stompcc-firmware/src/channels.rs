//! Inter-task communication channels
//!
//! Control Changes leave the pedal task through a bounded queue so a slow
//! UART never stretches a tick.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Queue depth for outgoing Control Changes
const MIDI_CHANNEL_SIZE: usize = 16;

/// A Control Change waiting to be written to the MIDI port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutgoingCc {
    pub controller: u8,
    pub value: u8,
}

/// Control Changes from the pedal task to the MIDI TX task
pub static MIDI_CHANNEL: Channel<CriticalSectionRawMutex, OutgoingCc, MIDI_CHANNEL_SIZE> =
    Channel::new();
