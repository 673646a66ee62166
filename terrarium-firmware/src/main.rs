//! Terrarium - Plant Console Firmware
//!
//! Main firmware binary for the RP2040 plant care board. A host
//! controller sends numeric command lines over UART; each line is echoed
//! back, then switches an output or answers with a sensor report.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use terrarium_core::{ActionTable, BoardConfig, Console, Dispatcher, Hardware};
use terrarium_hal_rp2040::uart::rp_config;
use terrarium_hal_rp2040::{ConsoleSerial, FlexOutputs, MuxedAdc};

use crate::board::UART_BUF_SIZE;

mod board;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; UART_BUF_SIZE]> = StaticCell::new();

// Board wiring and command table, borrowed by the console task
static BOARD: StaticCell<BoardConfig> = StaticCell::new();
static ACTIONS: StaticCell<ActionTable> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Terrarium firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let (board, actions) = match config::load() {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("No usable board configuration: {:?}", e);
            return;
        }
    };
    let board: &'static BoardConfig = BOARD.init(board);
    let actions: &'static ActionTable = ACTIONS.init(actions);

    for a in board.assignments() {
        info!("{:?} on pin {} ({:?})", a.device, a.pin, a.direction);
    }
    for (code, action) in actions.iter() {
        debug!("code {} -> {:?}", code, action);
    }
    info!(
        "{} command codes, {}ms settle delay",
        actions.len(),
        board.settle_delay_ms()
    );

    // Console UART to the host controller
    let serial_config = config::serial_config();
    let tx_buf = TX_BUF.init([0u8; UART_BUF_SIZE]);
    let rx_buf = RX_BUF.init([0u8; UART_BUF_SIZE]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, rp_config(&serial_config));
    let serial = ConsoleSerial::new(uart.into_buffered(Irqs, tx_buf, rx_buf));
    info!("UART initialized at {} baud", serial_config.baudrate);

    // Digital outputs D2-D13
    let outputs = FlexOutputs::new([
        (2, Flex::new(p.PIN_2)),
        (3, Flex::new(p.PIN_3)),
        (4, Flex::new(p.PIN_4)),
        (5, Flex::new(p.PIN_5)),
        (6, Flex::new(p.PIN_6)),
        (7, Flex::new(p.PIN_7)),
        (8, Flex::new(p.PIN_8)),
        (9, Flex::new(p.PIN_9)),
        (10, Flex::new(p.PIN_10)),
        (11, Flex::new(p.PIN_11)),
        (12, Flex::new(p.PIN_12)),
        (13, Flex::new(p.PIN_13)),
    ]);

    // Analog inputs A0-A7 through the mux on ADC0
    let inputs = MuxedAdc::new(
        Adc::new_blocking(p.ADC, adc::Config::default()),
        Channel::new_pin(p.PIN_26, Pull::None),
        [
            Output::new(p.PIN_18, Level::Low),
            Output::new(p.PIN_19, Level::Low),
            Output::new(p.PIN_20, Level::Low),
        ],
    );

    let hw = Hardware::new(outputs, inputs, Delay);
    let mut console = Console::new(Dispatcher::new(actions, board.settle_delay_ms()), hw);

    match console.setup(board) {
        Ok(n) => info!("{} outputs configured low", n),
        Err(e) => error!("Output setup failed: {:?}", e),
    }

    spawner.spawn(tasks::console_task(console, serial)).unwrap();

    info!("Console running");
}
