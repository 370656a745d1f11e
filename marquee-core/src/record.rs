//! Display records and payload sources
//!
//! A [`DisplayRecord`] is one queued screen update: up to three short text
//! lines, a style code selecting the layout, and a scroll code selecting the
//! current phase of its animation.

use heapless::String;

use crate::layout::Style;
use crate::scheduler::TickStatus;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Storage size of one payload line, terminator included
pub const PAYLOAD_CAPACITY: usize = 20;

/// Maximum number of data bytes in one payload line
pub const PAYLOAD_MAX_LEN: usize = PAYLOAD_CAPACITY - 1;

/// Number of payload lines per record
pub const RECORD_LINES: usize = 3;

/// Reserved payload meaning "render the live clock on this row"
pub const CLOCK_MARKER: &str = "Timestamp";

/// Payload stored when a line was given no source at all
pub const ERROR_MARKER: &str = "ERROR!";

/// Fixed-capacity text line
///
/// Holds at most [`PAYLOAD_MAX_LEN`] bytes. Longer input is truncated on a
/// character boundary, never overrunning the buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Payload(String<PAYLOAD_MAX_LEN>);

impl Payload {
    /// Empty payload
    pub const fn new() -> Self {
        Self(String::new())
    }

    /// Copy text, truncating to capacity
    pub fn from_text(text: &str) -> Self {
        let mut line = String::new();
        for ch in text.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
        Self(line)
    }

    /// Copy a caller buffer byte by byte
    ///
    /// Copying stops at the first nul byte or at capacity, whichever comes
    /// first. Bytes that are not valid UTF-8 end the copy.
    pub fn from_buffer(buf: &[u8]) -> Self {
        let end = buf
            .iter()
            .take(PAYLOAD_MAX_LEN)
            .position(|&b| b == 0)
            .unwrap_or_else(|| buf.len().min(PAYLOAD_MAX_LEN));

        let text = match core::str::from_utf8(&buf[..end]) {
            Ok(text) => text,
            Err(e) => {
                // valid_up_to() is always a char boundary
                core::str::from_utf8(&buf[..e.valid_up_to()]).unwrap_or("")
            }
        };

        Self::from_text(text)
    }

    /// The reserved clock marker
    pub fn clock_marker() -> Self {
        Self::from_text(CLOCK_MARKER)
    }

    /// The fixed error marker
    pub fn error_marker() -> Self {
        Self::from_text(ERROR_MARKER)
    }

    /// Text content
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if this payload is the reserved clock marker
    pub fn is_clock_marker(&self) -> bool {
        self.0.as_str() == CLOCK_MARKER
    }
}

/// Origin of one payload line passed to the push protocol
///
/// A line comes from exactly one place. `Absent` is not a hard failure:
/// the line is stored as [`ERROR_MARKER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource<'a> {
    /// Long-lived literal, copied verbatim
    Literal(&'static str),
    /// Caller-owned buffer, copied up to capacity or the first nul
    Buffer(&'a [u8]),
    /// No source given
    Absent,
}

impl<'a> PayloadSource<'a> {
    /// Buffer source from a borrowed string
    pub fn text(text: &'a str) -> Self {
        PayloadSource::Buffer(text.as_bytes())
    }

    /// Resolve this source into a stored payload
    pub fn resolve(self) -> Payload {
        match self {
            PayloadSource::Literal(text) => Payload::from_text(text),
            PayloadSource::Buffer(buf) => Payload::from_buffer(buf),
            PayloadSource::Absent => {
                #[cfg(feature = "defmt")]
                defmt::debug!("payload source absent, storing error marker");
                Payload::error_marker()
            }
        }
    }
}

impl From<&'static str> for PayloadSource<'_> {
    fn from(text: &'static str) -> Self {
        PayloadSource::Literal(text)
    }
}

/// One queued display update
///
/// `style` and `scroll` are kept as raw codes: out-of-range values are
/// tolerated and handled at dispatch time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayRecord {
    /// Line payloads (row 0, row 1, row 2)
    pub payloads: [Payload; RECORD_LINES],
    /// Layout style code, nominally 0-7
    pub style: u8,
    /// Scroll phase code, nominally 0-4
    pub scroll: u8,
    /// Outcome of the tick that displayed this record
    ///
    /// Only set on records returned by the scheduler after a tick.
    pub result: Option<TickStatus>,
}

impl DisplayRecord {
    /// Build a record from already-resolved payloads
    pub fn new(style: u8, scroll: u8, payloads: [Payload; RECORD_LINES]) -> Self {
        Self {
            payloads,
            style,
            scroll,
            result: None,
        }
    }

    /// Build a record through payload normalization
    ///
    /// Each source is resolved independently. For styles that reserve the
    /// last row for the live clock, the third payload is replaced with the
    /// clock marker regardless of `sources[2]`.
    pub fn from_sources(style: u8, scroll: u8, sources: [PayloadSource<'_>; RECORD_LINES]) -> Self {
        let [s0, s1, s2] = sources;
        let third = if Style::from_code(style).is_some_and(|s| s.reserves_clock_row()) {
            Payload::clock_marker()
        } else {
            s2.resolve()
        };

        Self::new(style, scroll, [s0.resolve(), s1.resolve(), third])
    }

    /// Text of one line (empty for out-of-range lines)
    pub fn line(&self, index: usize) -> &str {
        self.payloads.get(index).map(Payload::as_str).unwrap_or("")
    }

    /// Decoded style, `None` for unknown codes
    pub fn style_kind(&self) -> Option<Style> {
        Style::from_code(self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_truncates_long_text() {
        let p = Payload::from_text("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(p.len(), PAYLOAD_MAX_LEN);
        assert_eq!(p.as_str(), "abcdefghijklmnopqrs");
    }

    #[test]
    fn test_buffer_stops_at_nul() {
        let p = Payload::from_buffer(b"Hi\0garbage");
        assert_eq!(p.as_str(), "Hi");
    }

    #[test]
    fn test_buffer_truncates_without_nul() {
        let buf = [b'x'; 32];
        let p = Payload::from_buffer(&buf);
        assert_eq!(p.len(), PAYLOAD_MAX_LEN);
    }

    #[test]
    fn test_buffer_invalid_utf8_cut() {
        let p = Payload::from_buffer(&[b'o', b'k', 0xFF, b'z']);
        assert_eq!(p.as_str(), "ok");
    }

    #[test]
    fn test_multibyte_truncation_on_char_boundary() {
        // 9 two-byte chars = 18 bytes, the tenth does not fit
        let p = Payload::from_text("éééééééééé");
        assert_eq!(p.len(), 18);
        assert!(p.as_str().chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_absent_source_is_error_marker() {
        assert_eq!(PayloadSource::Absent.resolve().as_str(), ERROR_MARKER);
    }

    #[test]
    fn test_clock_styles_override_third_line() {
        for style in 0..=2 {
            let rec = DisplayRecord::from_sources(
                style,
                4,
                [
                    PayloadSource::Literal("top"),
                    PayloadSource::Literal("mid"),
                    PayloadSource::Literal("caller text"),
                ],
            );
            assert_eq!(rec.line(2), CLOCK_MARKER);
            assert!(rec.payloads[2].is_clock_marker());
        }
    }

    #[test]
    fn test_free_styles_keep_third_line() {
        let rec = DisplayRecord::from_sources(
            4,
            4,
            [
                PayloadSource::Literal("a"),
                PayloadSource::text("b"),
                PayloadSource::Absent,
            ],
        );
        assert_eq!(rec.line(0), "a");
        assert_eq!(rec.line(1), "b");
        assert_eq!(rec.line(2), ERROR_MARKER);
    }

    #[test]
    fn test_unknown_style_keeps_third_line() {
        let rec = DisplayRecord::from_sources(
            42,
            4,
            [
                PayloadSource::Literal("a"),
                PayloadSource::Literal("b"),
                PayloadSource::Literal("c"),
            ],
        );
        assert_eq!(rec.line(2), "c");
        assert_eq!(rec.style_kind(), None);
    }
}
