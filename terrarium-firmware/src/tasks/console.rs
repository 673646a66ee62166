//! Serial console task
//!
//! Polls the host UART, feeds every byte through the console and logs
//! what each completed line did.

use defmt::*;
use embassy_rp::uart;
use embassy_time::{Delay, Timer};

use terrarium_core::{Console, ConsoleError, Dispatched, Handled, MoistureCalibration};
use terrarium_hal::UartRx;
use terrarium_hal_rp2040::{ConsoleSerial, FlexOutputs, MuxedAdc};

use crate::board::{OUTPUT_PIN_COUNT, UART_BUF_SIZE};

/// Idle time between UART polls
const POLL_INTERVAL_MS: u64 = 5;

/// Console bound to the board peripherals
pub type ConsoleHardware = Console<'static, FlexOutputs<OUTPUT_PIN_COUNT>, MuxedAdc, Delay>;

/// Console task - runs the host command loop forever
#[embassy_executor::task]
pub async fn console_task(mut console: ConsoleHardware, mut serial: ConsoleSerial) {
    info!("Console task started");

    let calibration = MoistureCalibration::default();
    let mut buf = [0u8; UART_BUF_SIZE];

    loop {
        match serial.read_available(&mut buf) {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match console.feed(byte, &mut serial) {
                        Ok(Some(handled)) => log_handled(&handled, &calibration),
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(ConsoleError::Pin(e)) => warn!("Pin error: {:?}", e),
                        Err(ConsoleError::Serial(e)) => warn!("Report write error: {:?}", e),
                        Err(ConsoleError::Report(e)) => warn!("Report encode error: {:?}", e),
                    }
                }
                // Sweep up bytes that arrived while dispatching
                continue;
            }
            Ok(_) => {
                // Nothing pending
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }

        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}

fn log_handled(handled: &Handled<uart::Error>, calibration: &MoistureCalibration) {
    if let Err(e) = handled.echo {
        warn!("Echo write error: {:?}", e);
    }

    match handled.outcome {
        Dispatched::Wrote {
            code,
            device,
            pin,
            level,
        } => {
            debug!("{} -> {:?} D{} {:?}", code, device, pin, level);
        }
        Dispatched::Reported {
            code,
            device,
            channel,
            reading,
        } => {
            if device.is_soil_sensor() {
                match calibration.percent(reading) {
                    Some(pct) => debug!(
                        "{} -> {:?} ch{} = {} ({}% moist)",
                        code, device, channel, reading, pct
                    ),
                    None => debug!(
                        "{} -> {:?} ch{} = {} (out of calibration)",
                        code, device, channel, reading
                    ),
                }
            } else {
                debug!("{} -> {:?} ch{} = {}", code, device, channel, reading);
            }
        }
        Dispatched::Ignored { code } => {
            trace!("{} ignored: {:?}", code, handled.line);
        }
    }
}
