//! Blocking UART transmit
//!
//! MIDI out uses UART0 TX on GPIO0.

use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{Blocking, Config, Error, UartTx};

/// GPIO carrying MIDI out
pub const MIDI_TX_GPIO: u8 = 0;

/// Build an embassy-rp UART config from the shared one
pub fn uart_config(config: &stompcc_hal::UartConfig) -> Config {
    use embassy_rp::uart::{DataBits, Parity, StopBits};
    use stompcc_hal::uart as hal;

    let mut out = Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        hal::DataBits::Seven => DataBits::DataBits7,
        hal::DataBits::Eight => DataBits::DataBits8,
    };
    out.parity = match config.parity {
        hal::Parity::None => Parity::ParityNone,
        hal::Parity::Even => Parity::ParityEven,
        hal::Parity::Odd => Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        hal::StopBits::One => StopBits::STOP1,
        hal::StopBits::Two => StopBits::STOP2,
    };
    out
}

/// UART0 transmitter
pub struct RpUartTx(UartTx<'static, UART0, Blocking>);

impl RpUartTx {
    pub fn new(tx: UartTx<'static, UART0, Blocking>) -> Self {
        Self(tx)
    }
}

impl stompcc_hal::UartTx for RpUartTx {
    type Error = Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.blocking_write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.blocking_flush()
    }
}
