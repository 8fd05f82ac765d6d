//! Pedal jack inputs

pub mod pin_bank;
pub mod sleeve;

pub use pin_bank::{PinBank, PinBankError, ADC_BITS};
pub use sleeve::Sleeves;
