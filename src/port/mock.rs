//! Scripted transport for testing the relay modes without hardware.

use super::error::PortError;
use super::traits::UartTransport;
use crate::frame::Frame;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Inner state of the mock port, behind a mutex for interior mutability.
#[derive(Debug, Default)]
struct MockPortState {
    /// Frames returned by successive `read_frame` calls, in order. A read
    /// with an empty queue yields an empty frame, modeling a deadline that
    /// expired with nothing on the wire.
    scripted_reads: VecDeque<Vec<u8>>,
    /// Every frame written to the port, verbatim.
    write_log: Vec<Vec<u8>>,
    /// Every baud rate applied, in order.
    baud_log: Vec<u32>,
    /// The currently active baud rate.
    current_baud: u32,
    /// Total `read_frame` calls performed.
    reads_performed: usize,
    /// When set, the next read fails with a channel error.
    fail_next_read: bool,
}

/// Mock transport that scripts incoming frames and records all effects.
///
/// Clones share state, so a test can hand one handle to the dispatcher and
/// keep another for assertions.
#[derive(Clone)]
pub struct MockUartPort {
    name: String,
    state: Arc<Mutex<MockPortState>>,
}

impl MockUartPort {
    /// Create a new mock port with the given name, at 115200 baud.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockPortState {
                current_baud: 115_200,
                ..Default::default()
            })),
        }
    }

    /// Script a frame to be returned by the next unscripted `read_frame`.
    pub fn push_frame(&self, bytes: &[u8]) {
        let mut state = self.state.lock().unwrap();
        state.scripted_reads.push_back(bytes.to_vec());
    }

    /// All frames written so far, in order.
    pub fn write_log(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().write_log.clone()
    }

    /// All baud rates applied so far, in order.
    pub fn baud_changes(&self) -> Vec<u32> {
        self.state.lock().unwrap().baud_log.clone()
    }

    /// The currently active baud rate.
    pub fn current_baud(&self) -> u32 {
        self.state.lock().unwrap().current_baud
    }

    /// Total `read_frame` calls performed so far.
    pub fn reads_performed(&self) -> usize {
        self.state.lock().unwrap().reads_performed
    }

    /// Make the next `read_frame` fail with a channel error.
    pub fn fail_next_read(&self) {
        self.state.lock().unwrap().fail_next_read = true;
    }
}

impl UartTransport for MockUartPort {
    fn read_frame(&mut self) -> Result<Frame, PortError> {
        let mut state = self.state.lock().unwrap();
        state.reads_performed += 1;

        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(PortError::Io(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "serial device lost",
            )));
        }

        // Queue exhaustion models a read deadline that expired empty-handed.
        let bytes = state.scripted_reads.pop_front().unwrap_or_default();
        Ok(Frame::new(bytes))
    }

    fn write_frame(&mut self, frame: &Frame) -> Result<(), PortError> {
        let mut state = self.state.lock().unwrap();
        state.write_log.push(frame.as_bytes().to_vec());
        Ok(())
    }

    fn set_baud_rate(&mut self, baud: u32) -> Result<(), PortError> {
        let mut state = self.state.lock().unwrap();
        state.baud_log.push(baud);
        state.current_baud = baud;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for MockUartPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockUartPort")
            .field("name", &self.name)
            .field("current_baud", &self.current_baud())
            .finish()
    }
}
