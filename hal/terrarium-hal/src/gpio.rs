//! GPIO pin abstractions
//!
//! Pins are addressed by board pin number so the console can drive any
//! output named in the board configuration without owning a typed pin.

/// Logic level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if this is the high level
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Check if this is the low level
    pub fn is_low(self) -> bool {
        !self.is_high()
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Output,
    Input,
}

/// Errors reported by pin-level operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number is not wired on this board
    InvalidPin,
    /// Pin was written before being configured as an output
    NotConfigured,
    /// Analog conversion failed
    Conversion,
}

/// Bank of digital pins addressed by board pin number
///
/// Implementations handle the actual hardware register manipulation
/// for the specific chip.
pub trait DigitalOutputs {
    /// Set the direction of a pin
    fn configure(&mut self, pin: u8, mode: PinMode) -> Result<(), PinError>;

    /// Drive an output pin to the given level
    fn write(&mut self, pin: u8, level: Level) -> Result<(), PinError>;
}

impl<T: DigitalOutputs + ?Sized> DigitalOutputs for &mut T {
    fn configure(&mut self, pin: u8, mode: PinMode) -> Result<(), PinError> {
        T::configure(self, pin, mode)
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), PinError> {
        T::write(self, pin, level)
    }
}
