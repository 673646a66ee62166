//! RP2040-specific HAL for the plant console firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `terrarium-hal` traits:
//!
//! - Digital output bank on flexible GPIO pins
//! - Analog inputs behind an 8-channel multiplexer on one ADC pin
//! - Console UART on the buffered embassy driver

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod uart;

pub use adc::MuxedAdc;
pub use gpio::FlexOutputs;
pub use uart::ConsoleSerial;
