//! Digital output bank
//!
//! Holds the flexible GPIO pins the board exposes as digital outputs and
//! maps board pin numbers onto them.

use embassy_rp::gpio::{self, Flex};

use terrarium_hal::{DigitalOutputs, Level, PinError, PinMode};

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

fn to_rp_level(level: Level) -> gpio::Level {
    match level {
        Level::Low => gpio::Level::Low,
        Level::High => gpio::Level::High,
    }
}

/// Bank of `N` digital pins addressed by GPIO number
///
/// Pins start as inputs; [`DigitalOutputs::configure`] must switch a pin
/// to output before it can be written.
pub struct FlexOutputs<const N: usize> {
    pins: [(u8, Flex<'static>); N],
    outputs: [bool; N],
}

impl<const N: usize> FlexOutputs<N> {
    /// Create a bank from `(gpio number, pin)` pairs
    pub fn new(pins: [(u8, Flex<'static>); N]) -> Self {
        Self {
            pins,
            outputs: [false; N],
        }
    }

    fn index(&self, pin: u8) -> Result<usize, PinError> {
        if pin >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        self.pins
            .iter()
            .position(|(number, _)| *number == pin)
            .ok_or(PinError::InvalidPin)
    }
}

impl<const N: usize> DigitalOutputs for FlexOutputs<N> {
    fn configure(&mut self, pin: u8, mode: PinMode) -> Result<(), PinError> {
        let idx = self.index(pin)?;
        let flex = &mut self.pins[idx].1;

        match mode {
            PinMode::Output => {
                // Latch low before enabling the driver so the pin never glitches high
                flex.set_low();
                flex.set_as_output();
            }
            PinMode::Input => flex.set_as_input(),
        }
        self.outputs[idx] = mode == PinMode::Output;
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), PinError> {
        let idx = self.index(pin)?;
        if !self.outputs[idx] {
            return Err(PinError::NotConfigured);
        }
        self.pins[idx].1.set_level(to_rp_level(level));
        Ok(())
    }
}
