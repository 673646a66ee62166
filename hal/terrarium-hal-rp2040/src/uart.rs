//! Console UART
//!
//! Wraps the buffered embassy UART so the console can poll it: the
//! interrupt-driven ring buffer fills in the background and
//! [`UartRx::read_available`] drains whatever has arrived.

use embassy_rp::uart::{self, BufferedUart};
use embedded_io::{Read, ReadReady, Write};

use terrarium_hal::uart::{DataBits, Parity, StopBits};
use terrarium_hal::{UartConfig, UartRx, UartTx};

/// Translate the board UART settings into the embassy driver config
pub fn rp_config(config: &UartConfig) -> uart::Config {
    let mut cfg = uart::Config::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    cfg.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    cfg.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    cfg
}

/// Serial link to the host controller
pub struct ConsoleSerial {
    uart: BufferedUart,
}

impl ConsoleSerial {
    pub fn new(uart: BufferedUart) -> Self {
        Self { uart }
    }
}

impl UartTx for ConsoleSerial {
    type Error = uart::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        Write::write_all(&mut self.uart, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Write::flush(&mut self.uart)
    }
}

impl UartRx for ConsoleSerial {
    type Error = uart::Error;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() || !ReadReady::read_ready(&mut self.uart)? {
            return Ok(0);
        }
        Read::read(&mut self.uart, buf)
    }
}
