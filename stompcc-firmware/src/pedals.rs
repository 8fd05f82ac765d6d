//! Pedal hardware setup
//!
//! Claims the pins the pedal table names and wires them into the input
//! bank the engine reads from.

use embassy_rp::adc::{Adc, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::ADC;
use embassy_rp::Peri;
use heapless::Vec;

use stompcc_core::config::{PedalConfig, PedalMode, PedalTable, PEDAL_COUNT, UNUSED_PIN};
use stompcc_drivers::input::{PinBank, PinBankError, Sleeves};
use stompcc_hal_rp2040::uart::MIDI_TX_GPIO;
use stompcc_hal_rp2040::{
    AdcError, Board, GpioAllocator, GpioError, PinError, RpAdc, RpInput, RpOutput,
};

/// At most a tip and a ring switch per slot
pub const MAX_INPUTS: usize = PEDAL_COUNT * 2;

/// Input bank the engine samples
pub type Inputs = PinBank<RpInput, RpAdc, MAX_INPUTS>;

/// GPIO-driven jack sleeves
pub type SleevePins = Sleeves<RpOutput, PEDAL_COUNT>;

/// Pedal hardware setup errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    Gpio(GpioError),
    Pin(PinError),
    Bank(PinBankError),
    Adc(AdcError),
}

impl From<GpioError> for SetupError {
    fn from(e: GpioError) -> Self {
        SetupError::Gpio(e)
    }
}

impl From<PinError> for SetupError {
    fn from(e: PinError) -> Self {
        SetupError::Pin(e)
    }
}

impl From<PinBankError> for SetupError {
    fn from(e: PinBankError) -> Self {
        SetupError::Bank(e)
    }
}

impl From<AdcError> for SetupError {
    fn from(e: AdcError) -> Self {
        SetupError::Adc(e)
    }
}

/// Create an empty input bank around the blocking ADC
pub fn input_bank(adc: Peri<'static, ADC>) -> Inputs {
    let adc = Adc::new_blocking(adc, AdcConfig::default());
    PinBank::new(RpAdc::new(adc))
}

/// Claim and configure every pin the table uses
///
/// Pins already claimed stay in `inputs` when an error is returned.
pub fn setup(
    table: &PedalTable,
    board: &mut Board,
    inputs: &mut Inputs,
) -> Result<SleevePins, SetupError> {
    let mut allocator = GpioAllocator::new();
    allocator.allocate(MIDI_TX_GPIO)?;

    let mut sleeves = Vec::new();
    for pedal in table.iter().filter(|p| !p.is_unused()) {
        for pin in pedal.pins() {
            allocator.allocate(pin)?;
        }

        match pedal.mode {
            PedalMode::Analog => {
                let channel = board.take_analog(pedal.tip_pin)?;
                inputs.adc_mut().add_channel(pedal.tip_pin, channel)?;
            }
            PedalMode::Single => add_switch(board, inputs, pedal, pedal.tip_pin)?,
            PedalMode::Double => {
                add_switch(board, inputs, pedal, pedal.tip_pin)?;
                if pedal.ring_pin != UNUSED_PIN {
                    add_switch(board, inputs, pedal, pedal.ring_pin)?;
                }
            }
        }

        if pedal.ground_pin != UNUSED_PIN {
            let output = Output::new(board.take(pedal.ground_pin)?, Level::Low);
            // One sleeve per slot, capacity is PEDAL_COUNT
            let _ = sleeves.push(RpOutput::new(output));
        }
    }

    Ok(Sleeves::new(sleeves))
}

/// Switches idle at the opposite level of "pressed"
fn add_switch(
    board: &mut Board,
    inputs: &mut Inputs,
    pedal: &PedalConfig,
    pin: u8,
) -> Result<(), SetupError> {
    let pull = if pedal.inverted { Pull::Up } else { Pull::Down };
    let input = Input::new(board.take(pin)?, pull);
    inputs.add_input(pin, RpInput::new(input))?;
    Ok(())
}
