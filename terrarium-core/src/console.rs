//! Serial command console
//!
//! Owns the line framer and the hardware. Every completed line is echoed
//! back verbatim and then dispatched.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;

use terrarium_hal::{AnalogInputs, DigitalOutputs, Level, PinError, PinMode, UartTx};
use terrarium_protocol::{echo_line, Line, LineFramer};

use crate::config::BoardConfig;
use crate::dispatch::{ConsoleError, Dispatched, Dispatcher, Hardware};

/// A line the console has finished handling
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Handled<E = Infallible> {
    pub line: Line,
    pub outcome: Dispatched,
    /// Result of the diagnostic echo; the dispatch ran either way
    pub echo: Result<(), E>,
}

/// Line framer + dispatcher bound to a set of hardware
pub struct Console<'t, O, A, D> {
    framer: LineFramer,
    dispatcher: Dispatcher<'t>,
    hw: Hardware<O, A, D>,
}

impl<'t, O, A, D> Console<'t, O, A, D>
where
    O: DigitalOutputs,
    A: AnalogInputs,
    D: DelayNs,
{
    pub fn new(dispatcher: Dispatcher<'t>, hw: Hardware<O, A, D>) -> Self {
        Self {
            framer: LineFramer::new(),
            dispatcher,
            hw,
        }
    }

    /// Configure every output pin of the board and drive it low
    ///
    /// Call once before feeding any input. Returns the number of pins
    /// configured.
    pub fn setup(&mut self, config: &BoardConfig) -> Result<usize, PinError> {
        for output in config.outputs() {
            self.hw.outputs.configure(output.pin, PinMode::Output)?;
            self.hw.outputs.write(output.pin, Level::Low)?;
        }
        Ok(config.outputs().len())
    }

    /// Feed one received byte
    ///
    /// Returns `Some` once the byte completes a line. The dispatch runs
    /// even if the echo could not be sent; the echo result travels in
    /// [`Handled::echo`] next to the outcome.
    pub fn feed<T: UartTx>(
        &mut self,
        byte: u8,
        tx: &mut T,
    ) -> Result<Option<Handled<T::Error>>, ConsoleError<T::Error>> {
        let Some(line) = self.framer.feed(byte) else {
            return Ok(None);
        };

        let echo = tx.write_blocking(&echo_line(&line));
        let outcome = self.dispatcher.dispatch(&line, &mut self.hw, tx)?;

        Ok(Some(Handled {
            line,
            outcome,
            echo,
        }))
    }

    /// Bytes of the line currently being received
    pub fn pending(&self) -> usize {
        self.framer.pending()
    }

    pub fn hardware(&self) -> &Hardware<O, A, D> {
        &self.hw
    }

    pub fn hardware_mut(&mut self) -> &mut Hardware<O, A, D> {
        &mut self.hw
    }
}
