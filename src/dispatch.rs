//! Relay mode selection and the three DUT-facing state machines.
//!
//! Every run acquires the readiness gate exactly once, before the first frame
//! read, then drives the selected relay behavior to completion:
//!
//! - Write/Read Sync: one frame in, the identical frame echoed back.
//! - Baud Change: four frames; directive frames switch the baud rate and are
//!   not echoed, payload frames are echoed unmodified.
//! - Write Async: one frame in, nothing written back.
//!
//! A selector outside {0,1,2} still performs the handshake, then does nothing
//! further. That path is degenerate but valid and exits cleanly.

use crate::error::FixtureError;
use crate::port::UartTransport;
use crate::rendezvous::ReadinessGate;
use tracing::{debug, info, warn};

/// Number of read iterations in Baud Change mode.
pub const BAUD_CHANGE_ITERATIONS: usize = 4;

/// The three relay behaviors, selected once at start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestMode {
    /// Read one frame, echo it back verbatim.
    WriteReadSync,
    /// Four iterations; switch baud on directive frames, echo the rest.
    BaudChange,
    /// Read one frame, no reply.
    WriteAsync,
}

impl TestMode {
    /// Map the command-line selector to a mode. Anything outside {0,1,2} has
    /// no matching mode.
    pub fn from_selector(selector: i64) -> Option<Self> {
        match selector {
            0 => Some(Self::WriteReadSync),
            1 => Some(Self::BaudChange),
            2 => Some(Self::WriteAsync),
            _ => None,
        }
    }
}

/// Run the fixture: acquire the gate once, then drive the selected mode.
pub fn run_fixture<G, T>(
    selector: i64,
    gate: &mut G,
    transport: &mut T,
) -> Result<(), FixtureError>
where
    G: ReadinessGate + ?Sized,
    T: UartTransport + ?Sized,
{
    gate.await_ready()?;

    match TestMode::from_selector(selector) {
        Some(TestMode::WriteReadSync) => write_read_sync(transport),
        Some(TestMode::BaudChange) => baud_change(transport),
        Some(TestMode::WriteAsync) => write_async(transport),
        None => {
            warn!(selector, "no relay mode matches selector; idle after handshake");
            Ok(())
        }
    }
}

/// Mode 0: basic echo validation. One frame in, the same bytes out.
fn write_read_sync<T: UartTransport + ?Sized>(transport: &mut T) -> Result<(), FixtureError> {
    let frame = transport.read_frame()?;
    info!("received frame: {}", frame.printable());
    transport.write_frame(&frame)?;
    Ok(())
}

/// Mode 1: baud-switch-aware echo. The DUT announces switches inline with
/// payload traffic, so each frame is branched on content, not position.
fn baud_change<T: UartTransport + ?Sized>(transport: &mut T) -> Result<(), FixtureError> {
    for _ in 0..BAUD_CHANGE_ITERATIONS {
        let frame = transport.read_frame()?;
        info!("received frame: {}", frame.printable());

        match frame.baud_directive()? {
            Some(rate) => {
                // A directive frame reconfigures the line and gets no echo.
                transport.set_baud_rate(rate)?;
                debug!(rate, "switched baud rate");
            }
            None => transport.write_frame(&frame)?,
        }
    }
    Ok(())
}

/// Mode 2: fire-and-forget capture of DUT output, no reply expected.
fn write_async<T: UartTransport + ?Sized>(transport: &mut T) -> Result<(), FixtureError> {
    let frame = transport.read_frame()?;
    info!("received frame: {}", frame.printable());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_mapping() {
        assert_eq!(TestMode::from_selector(0), Some(TestMode::WriteReadSync));
        assert_eq!(TestMode::from_selector(1), Some(TestMode::BaudChange));
        assert_eq!(TestMode::from_selector(2), Some(TestMode::WriteAsync));
        assert_eq!(TestMode::from_selector(3), None);
        assert_eq!(TestMode::from_selector(-1), None);
    }
}
