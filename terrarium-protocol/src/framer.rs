//! Line framing for incoming command bytes.
//!
//! The framer accumulates bytes until a `\n` arrives or the buffer holds
//! [`MAX_LINE_LEN`] bytes. The byte that triggers the flush is consumed:
//! a terminator is never part of a line, and a byte that arrives while the
//! buffer is full is dropped and the buffered bytes are emitted as a
//! truncated line. Input after that starts the next line.

use heapless::Vec;

use crate::LINE_ENDING;

/// Size of the receive buffer including the string terminator slot
pub const MAX_MESSAGE_LENGTH: usize = 12;

/// Maximum number of bytes in a completed line
pub const MAX_LINE_LEN: usize = MAX_MESSAGE_LENGTH - 1;

/// Byte that completes a line
pub const LINE_TERMINATOR: u8 = b'\n';

/// A completed command line
///
/// Holds the raw received bytes; nothing guarantees they are UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8, MAX_LINE_LEN>,
}

impl Line {
    /// Build a line from raw bytes, truncating at [`MAX_LINE_LEN`]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let len = bytes.len().min(MAX_LINE_LEN);
        let mut line = Self::default();
        // Cannot fail: len is clamped to capacity
        let _ = line.bytes.extend_from_slice(&bytes[..len]);
        line
    }

    /// Raw bytes of the line
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Line contents as text, if they are valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Line {
    fn format(&self, fmt: defmt::Formatter) {
        match self.as_str() {
            Some(text) => defmt::write!(fmt, "{=str}", text),
            None => defmt::write!(fmt, "{=[u8]}", self.as_bytes()),
        }
    }
}

/// Accumulates serial bytes into [`Line`]s
#[derive(Debug, Clone, Default)]
pub struct LineFramer {
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl LineFramer {
    /// Create an empty framer
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Discard any partially received line
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Number of bytes waiting for a terminator
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the framer
    ///
    /// Returns `Some(line)` when the byte completes a line (terminator or
    /// full buffer), `None` when more bytes are needed.
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        if byte != LINE_TERMINATOR && !self.buffer.is_full() {
            // Cannot fail: the buffer is not full
            let _ = self.buffer.push(byte);
            return None;
        }

        let line = Line {
            bytes: self.buffer.clone(),
        };
        self.reset();
        Some(line)
    }
}

/// Diagnostic echo of a received line, as transmitted back to the host
pub fn echo_line(line: &Line) -> Vec<u8, { MAX_LINE_LEN + 2 }> {
    let mut out = Vec::new();
    // Cannot fail: capacity covers the longest line plus the line ending
    let _ = out.extend_from_slice(line.as_bytes());
    let _ = out.extend_from_slice(LINE_ENDING);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(framer: &mut LineFramer, bytes: &[u8]) -> Option<Line> {
        let mut last = None;
        for &byte in bytes {
            if let Some(line) = framer.feed(byte) {
                last = Some(line);
            }
        }
        last
    }

    #[test]
    fn test_line_completed_by_terminator() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.feed(b'2'), None);
        assert_eq!(framer.feed(b'3'), None);
        let line = framer.feed(b'\n').unwrap();

        assert_eq!(line.as_bytes(), b"23");
        assert_eq!(framer.pending(), 0);
    }

    #[test]
    fn test_empty_line() {
        let mut framer = LineFramer::new();
        let line = framer.feed(b'\n').unwrap();
        assert!(line.is_empty());
    }

    #[test]
    fn test_full_buffer_forces_flush() {
        let mut framer = LineFramer::new();
        for &byte in b"12345678901" {
            assert_eq!(framer.feed(byte), None);
        }
        assert_eq!(framer.pending(), MAX_LINE_LEN);

        // The twelfth byte flushes and is not stored anywhere
        let line = framer.feed(b'X').unwrap();
        assert_eq!(line.as_bytes(), b"12345678901");
        assert_eq!(framer.pending(), 0);
    }

    #[test]
    fn test_remainder_starts_next_line() {
        let mut framer = LineFramer::new();
        let first = feed_all(&mut framer, b"123456789012").unwrap();
        assert_eq!(first.as_bytes(), b"12345678901");

        let second = feed_all(&mut framer, b"345\n").unwrap();
        assert_eq!(second.as_bytes(), b"345");
    }

    #[test]
    fn test_carriage_return_is_kept() {
        let mut framer = LineFramer::new();
        let line = feed_all(&mut framer, b"24\r\n").unwrap();
        assert_eq!(line.as_bytes(), b"24\r");
    }

    #[test]
    fn test_reset_discards_partial_line() {
        let mut framer = LineFramer::new();
        feed_all(&mut framer, b"99");
        framer.reset();
        let line = feed_all(&mut framer, b"4\n").unwrap();
        assert_eq!(line.as_bytes(), b"4");
    }

    #[test]
    fn test_echo_appends_line_ending() {
        let line = Line::from_bytes(b"23");
        assert_eq!(&echo_line(&line)[..], b"23\r\n");
    }

    #[test]
    fn test_from_bytes_truncates() {
        let line = Line::from_bytes(b"0123456789abcdef");
        assert_eq!(line.as_bytes(), b"0123456789a");
    }

    #[test]
    fn test_as_str_rejects_invalid_utf8() {
        let line = Line::from_bytes(&[0xFF, b'4']);
        assert_eq!(line.as_str(), None);
        assert_eq!(Line::from_bytes(b"40").as_str(), Some("40"));
    }
}
