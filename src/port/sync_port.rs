//! Synchronous serial transport over the `serialport` crate.

use super::error::PortError;
use super::traits::{PortSettings, UartTransport};
use crate::frame::{Frame, FRAME_DELIMITER};
use std::io::{ErrorKind, Read, Write};
use std::time::{Duration, Instant};

/// Real serial port wired to the DUT, wrapping `serialport::SerialPort`.
pub struct SyncUartPort {
    /// The underlying serial port implementation.
    port: Box<dyn serialport::SerialPort>,
    /// The device path for identification.
    name: String,
    /// Overall deadline for a single `read_frame` call.
    read_timeout: Duration,
}

impl SyncUartPort {
    /// Open a serial device with the given settings.
    ///
    /// Line parameters are fixed at 8N1 with no flow control; only the baud
    /// rate is reconfigurable afterwards, via [`UartTransport::set_baud_rate`].
    pub fn open(device: &str, settings: PortSettings) -> Result<Self, PortError> {
        let port = serialport::new(device, settings.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .timeout(settings.read_timeout)
            .open()
            .map_err(|e| match e.kind() {
                serialport::ErrorKind::NoDevice => PortError::not_found(device),
                serialport::ErrorKind::InvalidInput => PortError::config(e.to_string()),
                _ => PortError::Serial(e),
            })?;

        Ok(Self {
            port,
            name: device.to_string(),
            read_timeout: settings.read_timeout,
        })
    }

    /// Open a serial device with default settings (115200, 15 s read deadline).
    pub fn open_default(device: &str) -> Result<Self, PortError> {
        Self::open(device, PortSettings::default())
    }
}

impl UartTransport for SyncUartPort {
    fn read_frame(&mut self) -> Result<Frame, PortError> {
        let deadline = Instant::now() + self.read_timeout;
        let mut bytes = Vec::new();
        let mut byte = [0u8; 1];

        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            // Per-byte reads against the remaining budget give read-until
            // semantics with an overall deadline for the whole frame.
            self.port.set_timeout(deadline - now)?;

            match self.port.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    bytes.push(byte[0]);
                    if byte[0] == FRAME_DELIMITER {
                        break;
                    }
                }
                // Deadline expiry is a legal partial-frame result.
                Err(e) if e.kind() == ErrorKind::TimedOut => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(PortError::Io(e)),
            }
        }

        Ok(Frame::new(bytes))
    }

    fn write_frame(&mut self, frame: &Frame) -> Result<(), PortError> {
        self.port.write_all(frame.as_bytes())?;
        self.port.flush()?;
        Ok(())
    }

    fn set_baud_rate(&mut self, baud: u32) -> Result<(), PortError> {
        self.port.set_baud_rate(baud).map_err(PortError::Serial)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for SyncUartPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncUartPort")
            .field("name", &self.name)
            .field("baud_rate", &self.port.baud_rate())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_device_reports_not_found() {
        let result = SyncUartPort::open_default("/dev/nonexistent_uart_12345");

        assert!(result.is_err());
        if let Err(e) = result {
            match e {
                PortError::NotFound(name) => assert!(name.contains("nonexistent")),
                _ => panic!("Expected NotFound error, got: {:?}", e),
            }
        }
    }
}
