//! Pin map of the RP2040 plant board
//!
//! - GPIO0/1: UART0 TX/RX to the host controller
//! - GPIO2-13: digital outputs D2-D13
//! - GPIO18/19/20: analog mux select S0/S1/S2
//! - GPIO26 (ADC0): analog mux common
//!
//! Shared with the build script, which checks board.toml against it.

/// Lowest digital pin wired to an output driver
pub const FIRST_OUTPUT_PIN: u8 = 2;

/// Highest digital pin wired to an output driver
pub const LAST_OUTPUT_PIN: u8 = 13;

/// Number of digital output pins
pub const OUTPUT_PIN_COUNT: usize = (LAST_OUTPUT_PIN - FIRST_OUTPUT_PIN + 1) as usize;

/// Analog pins reachable through the mux (A0-A7)
pub const ANALOG_PIN_COUNT: u8 = 8;

/// Receive/transmit ring buffer size for the console UART
pub const UART_BUF_SIZE: usize = 64;
