//! Terrarium Hardware Abstraction Layer
//!
//! This crate defines the hardware boundary the console logic talks to.
//! Chip-specific crates implement these traits; host tests implement
//! them with in-memory mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  terrarium-core (console, dispatcher)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  terrarium-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌─────────────────────┐
//!          │ terrarium-hal-rp2040│
//!          └─────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalOutputs`] - Pin direction and output level
//! - [`adc::AnalogInputs`] - Analog sampling
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInputs;
pub use gpio::{DigitalOutputs, Level, PinError, PinMode};
pub use uart::{UartConfig, UartRx, UartTx};
