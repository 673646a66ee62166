//! In-memory hardware for unit tests

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use terrarium_hal::{AnalogInputs, DigitalOutputs, Level, PinError, PinMode, UartTx};

const PIN_COUNT: usize = 20;

pub struct MockOutputs {
    modes: [Option<PinMode>; PIN_COUNT],
    levels: [Option<Level>; PIN_COUNT],
    writes: usize,
    configures: usize,
}

impl MockOutputs {
    pub fn new() -> Self {
        Self {
            modes: [None; PIN_COUNT],
            levels: [None; PIN_COUNT],
            writes: 0,
            configures: 0,
        }
    }

    pub fn all_configured() -> Self {
        let mut outputs = Self::new();
        outputs.modes = [Some(PinMode::Output); PIN_COUNT];
        outputs
    }

    pub fn level(&self, pin: u8) -> Option<Level> {
        self.levels[pin as usize]
    }

    pub fn mode(&self, pin: u8) -> Option<PinMode> {
        self.modes[pin as usize]
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn configures(&self) -> usize {
        self.configures
    }
}

impl DigitalOutputs for MockOutputs {
    fn configure(&mut self, pin: u8, mode: PinMode) -> Result<(), PinError> {
        let slot = self
            .modes
            .get_mut(pin as usize)
            .ok_or(PinError::InvalidPin)?;
        *slot = Some(mode);
        self.configures += 1;
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), PinError> {
        match self.modes.get(pin as usize) {
            None => Err(PinError::InvalidPin),
            Some(Some(PinMode::Output)) => {
                self.levels[pin as usize] = Some(level);
                self.writes += 1;
                Ok(())
            }
            Some(_) => Err(PinError::NotConfigured),
        }
    }
}

pub struct MockInputs {
    readings: [u16; 8],
    fail_next: bool,
}

impl MockInputs {
    pub fn new() -> Self {
        Self {
            readings: [0; 8],
            fail_next: false,
        }
    }

    pub fn set(&mut self, pin: u8, reading: u16) {
        self.readings[pin as usize] = reading;
    }

    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }
}

impl AnalogInputs for MockInputs {
    fn read(&mut self, pin: u8) -> Result<u16, PinError> {
        if core::mem::take(&mut self.fail_next) {
            return Err(PinError::Conversion);
        }
        self.readings
            .get(pin as usize)
            .copied()
            .ok_or(PinError::InvalidPin)
    }
}

pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

pub struct MockSerial {
    written: Vec<u8, 256>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self {
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[u8] {
        &self.written
    }
}

impl UartTx for MockSerial {
    type Error = Infallible;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.written
            .extend_from_slice(data)
            .expect("mock serial buffer overflow");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Transmit error raised by [`FlakySerial`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialFault;

/// Serial port whose first `n` writes fail
pub struct FlakySerial {
    failures_left: usize,
    written: Vec<u8, 256>,
}

impl FlakySerial {
    pub fn failing(n: usize) -> Self {
        Self {
            failures_left: n,
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[u8] {
        &self.written
    }
}

impl UartTx for FlakySerial {
    type Error = SerialFault;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(SerialFault);
        }
        self.written
            .extend_from_slice(data)
            .expect("mock serial buffer overflow");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
