//! Pedal sampling engine
//!
//! Turns raw pin readings into MIDI Control Change events. Each tick
//! visits the slots in index order and produces at most one event per
//! slot, only when the slot's logical value changed.

pub mod debounce;
pub mod scale;

pub use debounce::Debouncer;
pub use scale::{scale_adc, AnalogFilter};

use heapless::{Deque, Vec};

use crate::config::{PedalConfig, PedalMode, PedalTable, PEDAL_COUNT};
use crate::time::TimeState;
use crate::traits::{MidiTransport, PedalInputs};

/// A Control Change produced by one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MidiCcEvent {
    /// Slot the event came from
    pub slot: u8,
    /// Controller number (0-127)
    pub controller: u8,
    /// Controller value, within the slot's MIDI range
    pub value: u8,
}

/// Outcome of one control loop tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Time since the previous tick (µs)
    pub elapsed_micros: u32,
    /// Events produced this tick, in slot order
    pub events: Vec<MidiCcEvent, PEDAL_COUNT>,
    /// Number of events the transport refused
    pub failures: u8,
}

impl TickReport {
    /// Number of events handed to the transport successfully
    pub fn sent(&self) -> usize {
        self.events.len() - self.failures as usize
    }
}

/// Accepted switch changes a slot can hold back between ticks
const PENDING_CAPACITY: usize = 4;

/// Per-slot runtime state
#[derive(Debug, Clone, Default)]
struct SlotState {
    tip: Debouncer,
    ring: Debouncer,
    analog: AnalogFilter,
    /// Accepted `(controller, value)` pairs not yet emitted, oldest first
    pending: Deque<(u8, u8), PENDING_CAPACITY>,
}

/// The pedal sampling engine
///
/// Owns the validated pedal table, the per-slot debounce and filter state
/// and the input source. Not shared: the single context that ticks owns
/// the engine.
pub struct Engine<I> {
    table: PedalTable,
    slots: [SlotState; PEDAL_COUNT],
    inputs: I,
}

impl<I: PedalInputs> Engine<I> {
    /// Create an engine with all switches released and no analog history
    pub fn new(table: PedalTable, inputs: I) -> Self {
        Self {
            table,
            slots: core::array::from_fn(|_| SlotState::default()),
            inputs,
        }
    }

    /// The pedal table this engine runs
    pub fn table(&self) -> &PedalTable {
        &self.table
    }

    /// Mutable access to the input source
    pub fn inputs_mut(&mut self) -> &mut I {
        &mut self.inputs
    }

    /// Release the input source
    pub fn into_inputs(self) -> I {
        self.inputs
    }

    /// Sample one slot
    ///
    /// Returns an event if the slot's value changed. Unused slots and
    /// out-of-range indices are skipped without touching the inputs.
    pub fn sample(&mut self, slot: usize, now: u32) -> Option<MidiCcEvent> {
        let config = *self.table.get(slot)?;
        if config.is_unused() {
            return None;
        }

        let state = &mut self.slots[slot];
        let (controller, value) = match config.mode {
            PedalMode::Single => Self::sample_single(&mut self.inputs, state, &config, now)?,
            PedalMode::Double if !config.uses_ring() => {
                Self::sample_single(&mut self.inputs, state, &config, now)?
            }
            PedalMode::Double => Self::sample_double(&mut self.inputs, state, &config, now)?,
            PedalMode::Analog => Self::sample_analog(&mut self.inputs, state, &config)?,
        };

        Some(MidiCcEvent {
            slot: slot as u8,
            controller,
            value,
        })
    }

    /// Run one control loop tick
    ///
    /// Captures `now` into `time`, samples every slot in index order and
    /// forwards each event to `transport`. Transport errors are counted,
    /// not retried.
    pub fn run_tick<T: MidiTransport>(
        &mut self,
        time: &mut TimeState,
        now: u32,
        transport: &mut T,
    ) -> TickReport {
        let mut report = TickReport {
            elapsed_micros: time.begin(now),
            ..Default::default()
        };

        for slot in 0..PEDAL_COUNT {
            let Some(event) = self.sample(slot, time.current_micros) else {
                continue;
            };
            if transport
                .send_control_change(event.controller, event.value)
                .is_err()
            {
                report.failures += 1;
            }
            // One event per slot at most, capacity cannot be exceeded
            let _ = report.events.push(event);
        }

        time.finish();
        report
    }

    fn read_switch(inputs: &mut I, pin: u8, config: &PedalConfig) -> bool {
        inputs.read_digital(pin) != config.inverted
    }

    fn switch_value(pressed: bool, config: &PedalConfig) -> u8 {
        if pressed {
            config.midi_max
        } else {
            config.midi_min
        }
    }

    fn sample_single(
        inputs: &mut I,
        state: &mut SlotState,
        config: &PedalConfig,
        now: u32,
    ) -> Option<(u8, u8)> {
        let pressed = Self::read_switch(inputs, config.tip_pin, config);
        let accepted = state.tip.update(pressed, now)?;
        Some((config.midi_cc, Self::switch_value(accepted, config)))
    }

    fn sample_double(
        inputs: &mut I,
        state: &mut SlotState,
        config: &PedalConfig,
        now: u32,
    ) -> Option<(u8, u8)> {
        let tip = Self::read_switch(inputs, config.tip_pin, config);
        let ring = Self::read_switch(inputs, config.ring_pin, config);
        state.tip.observe(tip, now);
        state.ring.observe(ring, now);

        // Both switches commit every tick, emission is one per tick, tip first
        if let Some(accepted) = state.tip.commit(now) {
            let _ = state
                .pending
                .push_back((config.midi_cc, Self::switch_value(accepted, config)));
        }
        if let Some(accepted) = state.ring.commit(now) {
            let _ = state
                .pending
                .push_back((config.ring_controller(), Self::switch_value(accepted, config)));
        }
        state.pending.pop_front()
    }

    fn sample_analog(
        inputs: &mut I,
        state: &mut SlotState,
        config: &PedalConfig,
    ) -> Option<(u8, u8)> {
        let raw = inputs.read_analog(config.tip_pin);
        let value = state.analog.update(scale_adc(raw, config), config)?;
        Some((config.midi_cc, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::DEBOUNCE_MICROS;
    use proptest::prelude::*;

    /// Pin levels set by the test, with a read counter
    #[derive(Default)]
    struct MockInputs {
        digital: [bool; 32],
        analog: [u16; 32],
        reads: usize,
    }

    impl MockInputs {
        fn set(&mut self, pin: u8, level: bool) {
            self.digital[pin as usize] = level;
        }

        fn set_analog(&mut self, pin: u8, value: u16) {
            self.analog[pin as usize] = value;
        }
    }

    impl PedalInputs for MockInputs {
        fn read_digital(&mut self, pin: u8) -> bool {
            self.reads += 1;
            self.digital[pin as usize]
        }

        fn read_analog(&mut self, pin: u8) -> u16 {
            self.reads += 1;
            self.analog[pin as usize]
        }
    }

    /// Records sent messages, optionally refusing all of them
    #[derive(Default)]
    struct MockTransport {
        sent: heapless::Vec<(u8, u8), 64>,
        fail: bool,
    }

    impl MidiTransport for MockTransport {
        type Error = ();

        fn send_control_change(&mut self, controller: u8, value: u8) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.sent.push((controller, value)).map_err(|_| ())
        }
    }

    fn table(slots: [PedalConfig; PEDAL_COUNT]) -> PedalTable {
        PedalTable::new(slots).unwrap()
    }

    /// Run ticks every 1000 µs from `start` to `end` (inclusive)
    fn run(
        engine: &mut Engine<MockInputs>,
        time: &mut TimeState,
        transport: &mut MockTransport,
        start: u32,
        end: u32,
    ) -> usize {
        let mut events = 0;
        let mut now = start;
        while now <= end {
            events += engine.run_tick(time, now, transport).events.len();
            now += 1000;
        }
        events
    }

    #[test]
    fn test_single_press_held_emits_once() {
        let mut engine = Engine::new(
            table([PedalConfig::single(2, 64), PedalConfig::default(), PedalConfig::default()]),
            MockInputs::default(),
        );
        let mut time = TimeState::starting_at(0);
        let mut transport = MockTransport::default();

        engine.inputs_mut().set(2, true);
        let events = run(&mut engine, &mut time, &mut transport, 0, 6000);

        assert_eq!(events, 1);
        assert_eq!(transport.sent.as_slice(), &[(64, 127)]);
    }

    #[test]
    fn test_press_shorter_than_window_is_ignored() {
        let mut engine = Engine::new(
            table([PedalConfig::single(2, 64), PedalConfig::default(), PedalConfig::default()]),
            MockInputs::default(),
        );

        engine.inputs_mut().set(2, true);
        assert_eq!(engine.sample(0, 0), None);
        assert_eq!(engine.sample(0, DEBOUNCE_MICROS), None);
        engine.inputs_mut().set(2, false);
        assert_eq!(engine.sample(0, DEBOUNCE_MICROS + 1), None);
        assert_eq!(engine.sample(0, 20_000), None);
    }

    #[test]
    fn test_release_sends_midi_min() {
        let mut config = PedalConfig::single(2, 64);
        config.midi_min = 10;
        config.midi_max = 100;
        let mut engine = Engine::new(
            table([config, PedalConfig::default(), PedalConfig::default()]),
            MockInputs::default(),
        );

        engine.inputs_mut().set(2, true);
        engine.sample(0, 0);
        assert_eq!(engine.sample(0, 6000).map(|e| e.value), Some(100));

        engine.inputs_mut().set(2, false);
        engine.sample(0, 10_000);
        assert_eq!(engine.sample(0, 16_000).map(|e| e.value), Some(10));
    }

    #[test]
    fn test_inverted_switch() {
        let mut config = PedalConfig::single(2, 64);
        config.inverted = true;
        let mut engine = Engine::new(
            table([config, PedalConfig::default(), PedalConfig::default()]),
            MockInputs::default(),
        );

        // Low pin reads as pressed
        engine.sample(0, 0);
        assert_eq!(
            engine.sample(0, 6000),
            Some(MidiCcEvent { slot: 0, controller: 64, value: 127 })
        );
    }

    #[test]
    fn test_analog_midpoint() {
        let mut engine = Engine::new(
            table([PedalConfig::default(), PedalConfig::analog(26, 11), PedalConfig::default()]),
            MockInputs::default(),
        );

        engine.inputs_mut().set_analog(26, 512);
        assert_eq!(
            engine.sample(1, 0),
            Some(MidiCcEvent { slot: 1, controller: 11, value: 64 })
        );
        // Unchanged value is not repeated
        assert_eq!(engine.sample(1, 1000), None);
    }

    #[test]
    fn test_unused_slots_never_read_or_emit() {
        let mut engine = Engine::new(PedalTable::empty(), MockInputs::default());
        let mut time = TimeState::starting_at(0);
        let mut transport = MockTransport::default();

        engine.inputs_mut().digital = [true; 32];
        assert_eq!(run(&mut engine, &mut time, &mut transport, 0, 50_000), 0);
        assert_eq!(engine.into_inputs().reads, 0);
        assert!(transport.sent.is_empty());
    }

    #[test]
    fn test_double_reports_ring_on_its_own_controller() {
        let mut engine = Engine::new(
            table([
                PedalConfig::double(3, 4, 80, 81),
                PedalConfig::default(),
                PedalConfig::default(),
            ]),
            MockInputs::default(),
        );

        engine.inputs_mut().set(4, true);
        engine.sample(0, 0);
        assert_eq!(
            engine.sample(0, 6000),
            Some(MidiCcEvent { slot: 0, controller: 81, value: 127 })
        );
    }

    #[test]
    fn test_double_same_tick_commit_defers_ring() {
        let mut engine = Engine::new(
            table([
                PedalConfig::double(3, 4, 80, 81),
                PedalConfig::default(),
                PedalConfig::default(),
            ]),
            MockInputs::default(),
        );
        let mut time = TimeState::starting_at(0);
        let mut transport = MockTransport::default();

        engine.inputs_mut().set(3, true);
        engine.inputs_mut().set(4, true);

        let mut per_tick = heapless::Vec::<usize, 16>::new();
        for tick in 0..8u32 {
            let report = engine.run_tick(&mut time, tick * 1000, &mut transport);
            per_tick.push(report.events.len()).unwrap();
        }

        assert!(per_tick.iter().all(|&n| n <= 1));
        assert_eq!(transport.sent.as_slice(), &[(80, 127), (81, 127)]);
    }

    #[test]
    fn test_double_ring_released_after_same_tick_commit() {
        let mut engine = Engine::new(
            table([
                PedalConfig::double(3, 4, 80, 81),
                PedalConfig::default(),
                PedalConfig::default(),
            ]),
            MockInputs::default(),
        );
        let mut time = TimeState::starting_at(0);
        let mut transport = MockTransport::default();

        engine.inputs_mut().set(3, true);
        engine.inputs_mut().set(4, true);
        run(&mut engine, &mut time, &mut transport, 0, 6000);

        // Ring held 6000 µs, released before its event goes out
        engine.inputs_mut().set(4, false);
        let events = run(&mut engine, &mut time, &mut transport, 7000, 20_000);

        assert_eq!(events, 2);
        assert_eq!(transport.sent.as_slice(), &[(80, 127), (81, 127), (81, 0)]);
    }

    #[test]
    fn test_double_without_ring_uses_tip_only() {
        // Validation rejects this slot, so drive the sampler directly
        let mut config = PedalConfig::double(3, 4, 80, 81);
        config.ring_pin = 0;
        let mut inputs = MockInputs::default();
        let mut state = SlotState::default();

        inputs.set(3, true);
        Engine::sample_single(&mut inputs, &mut state, &config, 0);
        assert_eq!(
            Engine::sample_single(&mut inputs, &mut state, &config, 6000),
            Some((80, 127))
        );
    }

    #[test]
    fn test_slots_emit_in_index_order() {
        let mut engine = Engine::new(
            table([
                PedalConfig::single(2, 64),
                PedalConfig::analog(26, 11),
                PedalConfig::single(5, 67),
            ]),
            MockInputs::default(),
        );
        let mut time = TimeState::starting_at(0);
        let mut transport = MockTransport::default();

        engine.inputs_mut().set(2, true);
        engine.inputs_mut().set(5, true);
        engine.inputs_mut().set_analog(26, 1023);
        engine.run_tick(&mut time, 0, &mut transport);
        let report = engine.run_tick(&mut time, 6000, &mut transport);

        let slots: heapless::Vec<u8, 3> = report.events.iter().map(|e| e.slot).collect();
        assert_eq!(slots.as_slice(), &[0, 2]);
        assert_eq!(transport.sent.as_slice(), &[(11, 127), (64, 127), (67, 127)]);
    }

    #[test]
    fn test_tick_updates_time_state() {
        let mut engine = Engine::new(PedalTable::empty(), MockInputs::default());
        let mut time = TimeState::starting_at(u32::MAX - 9);
        let mut transport = MockTransport::default();

        let report = engine.run_tick(&mut time, 5, &mut transport);
        assert_eq!(report.elapsed_micros, 15);
        assert_eq!(time.current_micros, 5);
        assert_eq!(time.last_micros, 5);
    }

    #[test]
    fn test_transport_failures_are_counted() {
        let mut engine = Engine::new(
            table([
                PedalConfig::analog(26, 11),
                PedalConfig::analog(27, 12),
                PedalConfig::default(),
            ]),
            MockInputs::default(),
        );
        let mut time = TimeState::starting_at(0);
        let mut transport = MockTransport {
            fail: true,
            ..Default::default()
        };

        let report = engine.run_tick(&mut time, 0, &mut transport);
        assert_eq!(report.events.len(), 2);
        assert_eq!(report.failures, 2);
        assert_eq!(report.sent(), 0);
    }

    proptest! {
        #[test]
        fn prop_fast_toggling_never_emits(
            toggles in proptest::collection::vec(1u32..=DEBOUNCE_MICROS, 1..40),
            step in 100u32..1000,
        ) {
            let mut engine = Engine::new(
                table([PedalConfig::single(2, 64), PedalConfig::default(), PedalConfig::default()]),
                MockInputs::default(),
            );
            let mut now = 0u32;
            let mut level = false;
            let mut events = 0;

            // Every level lasts at most the debounce window, sampled throughout
            for gap in toggles {
                level = !level;
                engine.inputs_mut().set(2, level);
                let end = now + gap;
                while now < end {
                    events += engine.sample(0, now).is_some() as usize;
                    now = (now + step).min(end);
                }
            }
            prop_assert_eq!(events, 0);
        }

        #[test]
        fn prop_held_level_emits_exactly_once(
            toggles in proptest::collection::vec(1u32..=DEBOUNCE_MICROS, 0..20),
            step in 100u32..1000,
        ) {
            let mut engine = Engine::new(
                table([PedalConfig::single(2, 64), PedalConfig::default(), PedalConfig::default()]),
                MockInputs::default(),
            );
            let mut now = 0u32;
            let mut level = false;
            let mut events = 0;

            // Bounce, then hold pressed well past the window
            for gap in toggles {
                level = !level;
                engine.inputs_mut().set(2, level);
                let end = now + gap;
                while now < end {
                    events += engine.sample(0, now).is_some() as usize;
                    now = (now + step).min(end);
                }
            }
            engine.inputs_mut().set(2, true);
            let end = now + 3 * DEBOUNCE_MICROS;
            while now <= end {
                events += engine.sample(0, now).is_some() as usize;
                now += step;
            }
            prop_assert_eq!(events, 1);
        }

        #[test]
        fn prop_analog_value_within_range(
            raw in 0u16..=1023,
            midi_min in 0u8..=63,
            midi_max in 64u8..=127,
        ) {
            let mut config = PedalConfig::analog(26, 11);
            config.midi_min = midi_min;
            config.midi_max = midi_max;
            let mut engine = Engine::new(
                table([config, PedalConfig::default(), PedalConfig::default()]),
                MockInputs::default(),
            );

            engine.inputs_mut().set_analog(26, raw);
            let event = engine.sample(0, 0).unwrap();
            prop_assert!(event.value >= midi_min && event.value <= midi_max);
        }
    }
}
