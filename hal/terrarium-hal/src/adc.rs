//! Analog input abstractions

use crate::gpio::PinError;

/// Bank of analog inputs addressed by analog pin number (A0 = 0, A1 = 1, ...)
pub trait AnalogInputs {
    /// Sample an analog input
    ///
    /// Returns the raw conversion result in `[0, platform_max]`.
    fn read(&mut self, pin: u8) -> Result<u16, PinError>;
}

impl<T: AnalogInputs + ?Sized> AnalogInputs for &mut T {
    fn read(&mut self, pin: u8) -> Result<u16, PinError> {
        T::read(self, pin)
    }
}
