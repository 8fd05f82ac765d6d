//! Timestamp source

/// Free-running microsecond counter
///
/// Must increase monotonically and wrap from `u32::MAX` to zero.
pub trait MicrosClock {
    /// Current timestamp in microseconds
    fn now_micros(&self) -> u32;
}
