//! Host-side hardware doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;

use embedded_hal::delay::DelayNs;
use terrarium_hal::{AnalogInputs, DigitalOutputs, Level, PinError, PinMode, UartTx};

#[derive(Default)]
pub struct RecordingOutputs {
    pub modes: HashMap<u8, PinMode>,
    pub levels: HashMap<u8, Level>,
    pub history: Vec<(u8, Level)>,
}

impl DigitalOutputs for RecordingOutputs {
    fn configure(&mut self, pin: u8, mode: PinMode) -> Result<(), PinError> {
        self.modes.insert(pin, mode);
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), PinError> {
        if self.modes.get(&pin) != Some(&PinMode::Output) {
            return Err(PinError::NotConfigured);
        }
        self.levels.insert(pin, level);
        self.history.push((pin, level));
        Ok(())
    }
}

/// Analog inputs that return `base + pin` unless overridden
#[derive(Default)]
pub struct FixedInputs {
    pub base: u16,
    pub overrides: HashMap<u8, u16>,
    pub reads: Vec<u8>,
}

impl AnalogInputs for FixedInputs {
    fn read(&mut self, pin: u8) -> Result<u16, PinError> {
        self.reads.push(pin);
        Ok(self
            .overrides
            .get(&pin)
            .copied()
            .unwrap_or(self.base + pin as u16))
    }
}

#[derive(Default)]
pub struct CountingDelay {
    pub calls_ms: Vec<u32>,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.calls_ms.push(ms);
    }
}

#[derive(Default)]
pub struct CapturedSerial {
    pub bytes: Vec<u8>,
}

impl CapturedSerial {
    /// Transmitted output split into lines, line endings removed
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.bytes)
            .split_terminator("\r\n")
            .map(str::to_owned)
            .collect()
    }
}

impl UartTx for CapturedSerial {
    type Error = Infallible;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bytes.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
