//! Core trait for the UART transport.
//!
//! The dispatcher drives the DUT through [`UartTransport`], allowing a real
//! serial port and a scripted mock to be used interchangeably.

use super::error::PortError;
use crate::frame::Frame;
use std::time::Duration;

/// Tunable parameters for a fixture port.
///
/// Line parameters are not tunable: the fixture always runs 8 data bits, no
/// parity, 1 stop bit, no flow control, set once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSettings {
    /// Initial baud rate (bits per second).
    pub baud_rate: u32,

    /// Deadline for a single frame read. Expiry yields a partial frame.
    pub read_timeout: Duration,
}

impl Default for PortSettings {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            read_timeout: Duration::from_secs(15),
        }
    }
}

/// Duplex byte channel to the DUT with a mutable baud rate.
pub trait UartTransport: Send + std::fmt::Debug {
    /// Read one frame: bytes up to and including the `\n` delimiter.
    ///
    /// If the read deadline elapses first, whatever bytes were accumulated
    /// (possibly none) are returned as a short frame rather than an error.
    fn read_frame(&mut self) -> Result<Frame, PortError>;

    /// Write the frame's bytes verbatim. No delimiter is appended; the frame
    /// already carries any trailing delimiter from when it was read.
    fn write_frame(&mut self, frame: &Frame) -> Result<(), PortError>;

    /// Reconfigure the active baud rate for all subsequent reads and writes.
    fn set_baud_rate(&mut self, baud: u32) -> Result<(), PortError>;

    /// The device name/path of this transport.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_reference_wiring() {
        let settings = PortSettings::default();
        assert_eq!(settings.baud_rate, 115_200);
        assert_eq!(settings.read_timeout, Duration::from_secs(15));
    }
}
