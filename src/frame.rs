//! Line-delimited serial frames and the inline baud-rate directive.
//!
//! A [`Frame`] is one unit of serial data as read from the transport: the
//! bytes up to and including a `\n` delimiter, or whatever partial bytes were
//! on the wire when the read deadline expired. The DUT signals baud switches
//! in-band with a textual `Baudrate: <digits>` directive embedded in a frame;
//! extraction is pure and independent of the transport.

use memchr::memmem;
use thiserror::Error;

/// Byte that terminates a frame on the wire.
pub const FRAME_DELIMITER: u8 = b'\n';

/// Literal marker that introduces a baud-rate directive.
const DIRECTIVE_MARKER: &[u8] = b"Baudrate:";

/// Errors from directive extraction.
#[derive(Debug, Error)]
pub enum DirectiveError {
    /// The directive pattern matched but the captured digits are not a baud
    /// rate the transport can accept (zero, or larger than `u32::MAX`).
    #[error("baud directive value '{digits}' is not an acceptable baud rate")]
    MalformedValue { digits: String },
}

/// One line-delimited unit of serial data, immutable once read.
///
/// A short or empty frame is a legal value: it is what a read produces when
/// the deadline expires before the delimiter arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8>,
}

impl Frame {
    /// Wrap raw bytes as read from the transport.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The frame's bytes, including any trailing delimiter.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the frame, yielding its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Escaped-ASCII rendition for diagnostic logging.
    pub fn printable(&self) -> String {
        self.bytes.escape_ascii().to_string()
    }

    /// Extract the baud-rate directive from this frame, if present.
    ///
    /// Grammar: the literal marker `Baudrate:`, followed by one or more ASCII
    /// whitespace bytes, followed by a maximal run of ASCII decimal digits.
    /// The first full match wins. A marker that is not followed by
    /// whitespace-then-digits is not a directive and yields `Ok(None)`.
    pub fn baud_directive(&self) -> Result<Option<u32>, DirectiveError> {
        for marker_at in memmem::find_iter(&self.bytes, DIRECTIVE_MARKER) {
            let rest = &self.bytes[marker_at + DIRECTIVE_MARKER.len()..];

            let ws = rest
                .iter()
                .take_while(|b| b.is_ascii_whitespace())
                .count();
            if ws == 0 {
                continue;
            }

            let digits: &[u8] = {
                let after_ws = &rest[ws..];
                let n = after_ws.iter().take_while(|b| b.is_ascii_digit()).count();
                &after_ws[..n]
            };
            if digits.is_empty() {
                continue;
            }

            // The digit run is pure ASCII digits, so utf8 conversion cannot fail
            // and parse only fails on overflow.
            let text = String::from_utf8_lossy(digits).into_owned();
            return match text.parse::<u32>() {
                Ok(rate) if rate > 0 => Ok(Some(rate)),
                _ => Err(DirectiveError::MalformedValue { digits: text }),
            };
        }

        Ok(None)
    }
}

impl From<&[u8]> for Frame {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Frame {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}
