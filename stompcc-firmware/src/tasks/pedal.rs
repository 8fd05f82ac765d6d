//! Pedal sampling task
//!
//! Runs the engine once per tick. Owns the engine, the time state and the
//! sleeve pins; nothing else touches them.

use defmt::*;
use embassy_time::{Duration, Ticker};

use stompcc_core::traits::MicrosClock;
use stompcc_core::{Engine, TimeState};

use crate::pedals::{Inputs, SleevePins};
use crate::transport::{EmbassyClock, QueueTransport};

/// Ticks between heartbeat traces
const HEARTBEAT_TICKS: u32 = 10_000;

/// A tick taking longer than this many periods is reported
const SLOW_TICK_FACTOR: u32 = 4;

/// The engine as wired on this board
pub type PedalEngine = Engine<Inputs>;

/// Pedal task - samples every slot each tick and queues MIDI output
#[embassy_executor::task]
pub async fn pedal_task(mut engine: PedalEngine, tick_us: u32, _sleeves: SleevePins) {
    info!(
        "Pedal task started: {} active slot(s), tick {} us",
        engine.table().active_count(),
        tick_us
    );

    let clock = EmbassyClock;
    let mut transport = QueueTransport;
    let mut time = TimeState::starting_at(clock.now_micros());
    let mut ticker = Ticker::every(Duration::from_micros(tick_us as u64));
    let slow_tick_us = tick_us.saturating_mul(SLOW_TICK_FACTOR);
    let mut ticks: u32 = 0;

    loop {
        ticker.next().await;

        let report = engine.run_tick(&mut time, clock.now_micros(), &mut transport);

        for event in report.events.iter() {
            debug!(
                "Pedal {}: CC {} = {}",
                event.slot, event.controller, event.value
            );
        }
        if report.failures > 0 {
            warn!("MIDI queue full, dropped {} event(s)", report.failures);
        }
        if report.elapsed_micros > slow_tick_us {
            warn!("Slow tick: {} us since last tick", report.elapsed_micros);
        }

        ticks = ticks.wrapping_add(1);
        if ticks % HEARTBEAT_TICKS == 0 {
            trace!("Pedal task heartbeat, tick {}", ticks);
        }
    }
}
