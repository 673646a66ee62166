//! Command dispatcher
//!
//! Turns a completed line into at most one pin action. Unknown codes and
//! unparseable lines are absorbed without any output.

use embedded_hal::delay::DelayNs;

use terrarium_hal::{AnalogInputs, DigitalOutputs, Level, PinError, UartTx};
use terrarium_protocol::{parse_code, Line, Report, ReportError};

use crate::action::{Action, ActionTable};
use crate::config::Device;

/// Errors raised while handling a line
///
/// None of these reach the host; the caller logs them and carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError<E> {
    /// Pin write or analog read failed
    Pin(PinError),
    /// Serial transmit failed
    Serial(E),
    /// Report line could not be encoded
    Report(ReportError),
}

impl<E> From<PinError> for ConsoleError<E> {
    fn from(e: PinError) -> Self {
        ConsoleError::Pin(e)
    }
}

impl<E> From<ReportError> for ConsoleError<E> {
    fn from(e: ReportError) -> Self {
        ConsoleError::Report(e)
    }
}

/// Result of dispatching one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatched {
    /// An output was driven
    Wrote {
        code: i32,
        device: Device,
        pin: u8,
        level: Level,
    },
    /// A sensor was sampled and reported
    Reported {
        code: i32,
        device: Device,
        channel: u8,
        reading: u16,
    },
    /// No action is bound to the code
    Ignored { code: i32 },
}

/// Hardware the dispatcher acts on
pub struct Hardware<O, A, D> {
    pub outputs: O,
    pub inputs: A,
    pub delay: D,
}

impl<O, A, D> Hardware<O, A, D> {
    pub fn new(outputs: O, inputs: A, delay: D) -> Self {
        Self {
            outputs,
            inputs,
            delay,
        }
    }
}

/// Stateless line → action dispatcher
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'t> {
    table: &'t ActionTable,
    settle_delay_ms: u32,
}

impl<'t> Dispatcher<'t> {
    pub fn new(table: &'t ActionTable, settle_delay_ms: u32) -> Self {
        Self {
            table,
            settle_delay_ms,
        }
    }

    /// Parse a line and perform the bound action
    ///
    /// Report actions transmit `<channel> <reading> <line>` and then block
    /// for the settle delay before returning, whether or not the transmit
    /// succeeded.
    pub fn dispatch<O, A, D, T>(
        &self,
        line: &Line,
        hw: &mut Hardware<O, A, D>,
        tx: &mut T,
    ) -> Result<Dispatched, ConsoleError<T::Error>>
    where
        O: DigitalOutputs,
        A: AnalogInputs,
        D: DelayNs,
        T: UartTx,
    {
        let code = parse_code(line.as_bytes());

        match self.table.lookup(code) {
            Some(Action::Write { device, pin, level }) => {
                hw.outputs.write(pin, level)?;
                Ok(Dispatched::Wrote {
                    code,
                    device,
                    pin,
                    level,
                })
            }
            Some(Action::Report {
                device,
                pin,
                channel,
            }) => {
                let reading = hw.inputs.read(pin)?;
                let report = Report::new(channel, reading, line.as_bytes()).encode()?;
                let sent = tx.write_blocking(&report);
                // Settle even if the report was lost
                hw.delay.delay_ms(self.settle_delay_ms);
                sent.map_err(ConsoleError::Serial)?;

                Ok(Dispatched::Reported {
                    code,
                    device,
                    channel,
                    reading,
                })
            }
            None => Ok(Dispatched::Ignored { code }),
        }
    }
}
