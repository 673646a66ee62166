//! Plant Console Serial Protocol
//!
//! This crate defines the text protocol spoken between the host controller
//! and the Terrarium board over a 9600 baud UART.
//!
//! # Protocol Overview
//!
//! Requests are ASCII decimal command codes, one per line:
//! ```text
//! host  → board   "4\n"            LED 1 on
//! host  → board   "40\n"           LED 1 off
//! host  → board   "24\n"           sample soil sensor 1
//! board → host    "24\r\n"         diagnostic echo of every line
//! board → host    "1 431 24\r\n"   <channel> <reading> <request>
//! ```
//!
//! Lines longer than eleven characters are cut at the buffer limit, and
//! anything that does not parse as a number is treated as code 0, which
//! no command uses. The board never answers with an error.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod framer;
pub mod report;

pub use command::{high_code, low_code, parse_code, Request};
pub use framer::{echo_line, Line, LineFramer, LINE_TERMINATOR, MAX_LINE_LEN, MAX_MESSAGE_LENGTH};
pub use report::{ParsedReport, Report, ReportError, MAX_REPORT_LEN};

/// Line ending appended to every line the board transmits
pub const LINE_ENDING: &[u8] = b"\r\n";
