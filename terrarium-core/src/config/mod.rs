//! Configuration types
//!
//! The board configuration is built once at startup and never mutated.

pub mod board;
pub mod device;

pub use board::*;
pub use device::*;
