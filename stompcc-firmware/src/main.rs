//! StompCC - MIDI Pedal Controller Firmware
//!
//! Main firmware binary for RP2040-based pedal controllers. Up to three
//! TRS jacks take footswitches or expression pedals; their state goes out
//! as MIDI Control Change messages on the serial MIDI port.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::uart::UartTx;
use {defmt_rtt as _, panic_probe as _};

use stompcc_core::config::PedalTable;
use stompcc_core::Engine;
use stompcc_drivers::input::Sleeves;
use stompcc_drivers::midi::SerialMidi;
use stompcc_hal_rp2040::uart::uart_config;
use stompcc_hal_rp2040::{Board, RpUartTx, UartConfig};

mod channels;
mod config;
mod pedals;
mod tasks;
mod transport;

/// Embedded pedal configuration (compiled into firmware)
/// Edit pedals.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../pedals.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("StompCC firmware starting...");

    let p = embassy_rp::init(Default::default());
    let (mut board, rest) = Board::split(p);
    info!("Peripherals initialized");

    let config = config::load_config(EMBEDDED_CONFIG);

    // Pedal inputs
    let mut inputs = pedals::input_bank(rest.adc);
    let (table, sleeves) = match pedals::setup(&config.table, &mut board, &mut inputs) {
        Ok(sleeves) => {
            info!("Pedal inputs initialized ({} sleeve pin(s))", sleeves.len());
            (config.table, sleeves)
        }
        Err(e) => {
            error!("Pedal setup failed: {}", e);
            warn!("Running with all pedal slots unused");
            (PedalTable::empty(), Sleeves::new(heapless::Vec::new()))
        }
    };
    let engine = Engine::new(table, inputs);

    // MIDI out on UART0 TX
    let uart_settings = UartConfig {
        baudrate: config.midi.baud,
        ..Default::default()
    };
    let tx = UartTx::new_blocking(rest.uart0, rest.midi_tx, uart_config(&uart_settings));
    let midi = SerialMidi::new(
        RpUartTx::new(tx),
        config.midi.channel,
        config.midi.running_status,
    );
    info!("MIDI UART initialized at {} baud", config.midi.baud);

    // Spawn tasks
    spawner.spawn(tasks::midi_tx_task(midi)).unwrap();
    spawner
        .spawn(tasks::pedal_task(engine, config.tick_us, sleeves))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
