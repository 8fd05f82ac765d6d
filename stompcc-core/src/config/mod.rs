//! Configuration types
//!
//! Board-agnostic pedal configuration. Loading it from a file is the
//! firmware's job; this module only defines and validates it.

pub mod pedal;
pub mod table;

pub use pedal::*;
pub use table::*;
