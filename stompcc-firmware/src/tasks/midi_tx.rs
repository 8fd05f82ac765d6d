//! MIDI TX task
//!
//! Drains the MIDI queue onto the serial port.

use defmt::*;

use stompcc_core::traits::MidiTransport;
use stompcc_drivers::midi::SerialMidi;
use stompcc_hal_rp2040::RpUartTx;

use crate::channels::MIDI_CHANNEL;

/// MIDI TX task - writes queued Control Changes to the UART
#[embassy_executor::task]
pub async fn midi_tx_task(mut midi: SerialMidi<RpUartTx>) {
    info!("MIDI TX task started on channel {}", midi.channel().number());

    loop {
        let cc = MIDI_CHANNEL.receive().await;

        if let Err(e) = midi.send_control_change(cc.controller, cc.value) {
            warn!("MIDI send failed for CC {}: {}", cc.controller, e);
        }
    }
}
