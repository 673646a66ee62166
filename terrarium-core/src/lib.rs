//! Board-agnostic console logic for the plant care firmware
//!
//! This crate contains everything between the serial bytes and the pins
//! that does not depend on a specific chip:
//!
//! - Pin assignments and board configuration
//! - Action table (command code → pin action)
//! - Command dispatcher
//! - Console (line framing, diagnostic echo, dispatch)
//! - Soil moisture calibration

#![no_std]
#![deny(unsafe_code)]

pub mod action;
pub mod config;
pub mod console;
pub mod dispatch;
pub mod moisture;

#[cfg(test)]
mod mock;

pub use action::{Action, ActionTable};
pub use config::{BoardConfig, ConfigError, Device, Direction, OutputBinding, PinAssignment, SensorBinding};
pub use console::{Console, Handled};
pub use dispatch::{ConsoleError, Dispatched, Dispatcher, Hardware};
pub use moisture::MoistureCalibration;
