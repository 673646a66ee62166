//! Analog inputs through a CD4051-style multiplexer
//!
//! RP2040 has only four external ADC inputs, so the sensors sit behind an
//! 8:1 analog multiplexer whose common line feeds one ADC pin:
//! - S0/S1/S2: mux address (analog pin number, A0 = 0)
//! - COM: ADC input

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::{Level, Output};
use embassy_time::{block_for, Duration};

use terrarium_hal::{AnalogInputs, PinError};

/// Inputs on the multiplexer
pub const MUX_CHANNELS: u8 = 8;

/// Time for the mux output to settle after switching address
pub const MUX_SETTLE: Duration = Duration::from_micros(20);

/// Right shift applied to the 12-bit conversion.
///
/// The host side calibrates against 10-bit readings (0-1023).
pub const READING_SHIFT: u8 = 2;

/// Analog inputs behind an 8:1 multiplexer
pub struct MuxedAdc {
    adc: Adc<'static, Blocking>,
    common: Channel<'static>,
    select: [Output<'static>; 3],
}

impl MuxedAdc {
    /// Create the input bank
    ///
    /// `select` is `[S0, S1, S2]`.
    pub fn new(adc: Adc<'static, Blocking>, common: Channel<'static>, select: [Output<'static>; 3]) -> Self {
        Self {
            adc,
            common,
            select,
        }
    }

    fn select(&mut self, address: u8) {
        for (bit, line) in self.select.iter_mut().enumerate() {
            let level = if address & (1 << bit) != 0 {
                Level::High
            } else {
                Level::Low
            };
            line.set_level(level);
        }
    }
}

impl AnalogInputs for MuxedAdc {
    fn read(&mut self, pin: u8) -> Result<u16, PinError> {
        if pin >= MUX_CHANNELS {
            return Err(PinError::InvalidPin);
        }

        self.select(pin);
        block_for(MUX_SETTLE);

        let raw = self
            .adc
            .blocking_read(&mut self.common)
            .map_err(|_| PinError::Conversion)?;
        Ok(raw >> READING_SHIFT)
    }
}
