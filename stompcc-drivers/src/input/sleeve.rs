//! Sleeve (ground) drive
//!
//! Boards that wire a jack's sleeve to a GPIO instead of ground hold that
//! pin low for as long as the pedal is in use.

use stompcc_hal::OutputPin;

/// Output pins that act as pedal ground
pub struct Sleeves<O, const N: usize> {
    pins: heapless::Vec<O, N>,
}

impl<O: OutputPin, const N: usize> Sleeves<O, N> {
    /// Take ownership of the pins and drive them all low
    pub fn new(pins: heapless::Vec<O, N>) -> Self {
        let mut sleeves = Self { pins };
        for pin in sleeves.pins.iter_mut() {
            pin.set_low();
        }
        sleeves
    }

    /// Number of driven sleeves
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}
