//! Command code decoding and encoding
//!
//! Decoding is deliberately permissive: existing senders rely on garbage
//! and empty lines being read as code 0, which no command uses.

use core::fmt::Write;

use heapless::String;

use crate::framer::{LINE_TERMINATOR, MAX_MESSAGE_LENGTH};

/// Factor between the code that sets an output high and the one that sets it low
pub const LOW_CODE_FACTOR: i32 = 10;

/// Parse a command line into a code
///
/// Follows C `atoi`: leading ASCII whitespace is skipped, an optional sign
/// is accepted, then decimal digits are consumed up to the first non-digit.
/// Anything else yields 0. Values outside `i32` saturate.
pub fn parse_code(line: &[u8]) -> i32 {
    let mut bytes = line
        .iter()
        .copied()
        .skip_while(|b| b.is_ascii_whitespace() || *b == 0x0B)
        .peekable();

    let negative = match bytes.peek() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    let mut value: i32 = 0;
    for byte in bytes {
        if !byte.is_ascii_digit() {
            break;
        }
        let digit = (byte - b'0') as i32;
        // Accumulate toward the sign so i32::MIN is reachable
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Code that drives an output high
pub const fn high_code(base: i32) -> i32 {
    base
}

/// Code that drives an output low, `None` on overflow
pub const fn low_code(base: i32) -> Option<i32> {
    base.checked_mul(LOW_CODE_FACTOR)
}

/// A command as sent by the host controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request {
    pub code: i32,
}

impl Request {
    pub const fn new(code: i32) -> Self {
        Self { code }
    }

    /// Request that switches the output with `base` code on or off
    pub fn switch(base: i32, on: bool) -> Option<Self> {
        if on {
            Some(Self::new(high_code(base)))
        } else {
            low_code(base).map(Self::new)
        }
    }

    /// Encode as a terminated command line
    pub fn encode(&self) -> String<MAX_MESSAGE_LENGTH> {
        let mut out = String::new();
        // Cannot fail: the longest i32 is 11 characters plus the terminator
        let _ = write!(out, "{}", self.code);
        let _ = out.push(LINE_TERMINATOR as char);
        out
    }
}
