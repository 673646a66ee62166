//! Sensor report lines
//!
//! Report format (one line per analog read):
//! ```text
//! <channel-digit> SP <reading> SP <request line> CR LF
//! ```
//! The request line is echoed exactly as received, so the host can match
//! a report to the command that produced it. Everything after the second
//! space is request text, decoded with the same lenient rules the board
//! applies to incoming lines.

use core::fmt::Write;
use core::str::FromStr;

use heapless::{String, Vec};

use crate::command::parse_code;
use crate::framer::MAX_LINE_LEN;
use crate::LINE_ENDING;

/// Longest possible report line
///
/// channel (1) + SP + u16 reading (5) + SP + request + CR LF
pub const MAX_REPORT_LEN: usize = 1 + 1 + 5 + 1 + MAX_LINE_LEN + 2;

/// Highest channel that fits in a single digit
pub const MAX_CHANNEL: u8 = 9;

/// Errors that can occur while encoding or decoding a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// Channel is not a single decimal digit
    InvalidChannel,
    /// Encoded report does not fit the output buffer
    BufferTooSmall,
    /// Fewer than three fields
    MissingField,
    /// A field is not a decimal number
    InvalidNumber,
}

/// A sensor reading to be sent to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report<'a> {
    /// Fixed channel digit of the sensor
    pub channel: u8,
    /// Raw conversion result
    pub reading: u16,
    /// Request line exactly as received
    pub request: &'a [u8],
}

impl<'a> Report<'a> {
    pub fn new(channel: u8, reading: u16, request: &'a [u8]) -> Self {
        Self {
            channel,
            reading,
            request,
        }
    }

    /// Encode this report as a terminated line
    pub fn encode(&self) -> Result<Vec<u8, MAX_REPORT_LEN>, ReportError> {
        if self.channel > MAX_CHANNEL {
            return Err(ReportError::InvalidChannel);
        }

        let mut head: String<8> = String::new();
        write!(head, "{} {} ", self.channel, self.reading)
            .map_err(|_| ReportError::BufferTooSmall)?;

        let mut out = Vec::new();
        out.extend_from_slice(head.as_bytes())
            .map_err(|_| ReportError::BufferTooSmall)?;
        out.extend_from_slice(self.request)
            .map_err(|_| ReportError::BufferTooSmall)?;
        out.extend_from_slice(LINE_ENDING)
            .map_err(|_| ReportError::BufferTooSmall)?;
        Ok(out)
    }
}

/// A report line decoded on the host side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParsedReport {
    pub channel: u8,
    pub reading: u16,
    /// Command code that requested the reading, as the board decoded it
    pub request: i32,
}

impl ParsedReport {
    /// Decode a report line, with or without its line ending
    pub fn parse(line: &[u8]) -> Result<Self, ReportError> {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        let mut fields = line.splitn(3, |&b| b == b' ');
        let channel_field = fields.next().ok_or(ReportError::MissingField)?;
        let reading_field = fields.next().ok_or(ReportError::MissingField)?;
        let request_text = fields.next().ok_or(ReportError::MissingField)?;

        let channel = match channel_field {
            [digit] if digit.is_ascii_digit() => digit - b'0',
            [] => return Err(ReportError::MissingField),
            _ => return Err(ReportError::InvalidChannel),
        };

        Ok(Self {
            channel,
            reading: parse_field(reading_field)?,
            request: parse_code(request_text),
        })
    }
}

fn parse_field<T: FromStr>(field: &[u8]) -> Result<T, ReportError> {
    let text = core::str::from_utf8(field).map_err(|_| ReportError::InvalidNumber)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(ReportError::MissingField);
    }
    text.parse().map_err(|_| ReportError::InvalidNumber)
}
