//! One-shot readiness handshake with the test orchestrator.
//!
//! The fixture binds a TCP listener on a well-known port and blocks until the
//! orchestrator connects. No bytes are exchanged; the accepted connection's
//! only meaning is "the orchestrator is now waiting for the DUT to speak".
//! The signal is consumed exactly once per run, then the listening socket is
//! released.

use std::io;
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Poll interval while waiting for the orchestrator to connect.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Errors from the readiness handshake.
#[derive(Debug, Error)]
pub enum GateError {
    /// No orchestrator connected within the wait bound. Fatal; there is no
    /// retry.
    #[error("no orchestrator connection within {0:?}")]
    Timeout(Duration),

    /// The one-shot signal was already consumed by an earlier call.
    #[error("readiness signal already consumed")]
    Consumed,

    /// Socket-level failure while binding or accepting.
    #[error("rendezvous I/O error: {0}")]
    Io(#[from] io::Error),
}

/// One-shot rendezvous primitive, blocking until the orchestrator signals.
pub trait ReadinessGate {
    /// Block until exactly one inbound connection arrives, then return,
    /// discarding the connection. Must be called exactly once per run,
    /// before any frame is read.
    fn await_ready(&mut self) -> Result<(), GateError>;
}

/// TCP implementation of the readiness gate.
pub struct TcpRendezvous {
    /// Taken on first use; the gate is spent afterwards.
    listener: Option<TcpListener>,
    accept_timeout: Duration,
}

impl TcpRendezvous {
    /// Bind the rendezvous listener. The socket starts listening immediately,
    /// so an orchestrator may connect before `await_ready` is called.
    pub fn bind(addr: impl ToSocketAddrs, accept_timeout: Duration) -> Result<Self, GateError> {
        let listener = TcpListener::bind(addr)?;
        // Polled accept keeps the wait bounded without threads or a runtime.
        listener.set_nonblocking(true)?;

        Ok(Self {
            listener: Some(listener),
            accept_timeout,
        })
    }

    /// The bound address, useful when binding to port 0 in tests.
    pub fn local_addr(&self) -> Result<SocketAddr, GateError> {
        match &self.listener {
            Some(listener) => Ok(listener.local_addr()?),
            None => Err(GateError::Consumed),
        }
    }
}

impl ReadinessGate for TcpRendezvous {
    fn await_ready(&mut self) -> Result<(), GateError> {
        // Taking the listener out makes the gate one-shot and guarantees the
        // socket is released when this call returns, on every path.
        let listener = self.listener.take().ok_or(GateError::Consumed)?;
        let deadline = Instant::now() + self.accept_timeout;

        loop {
            match listener.accept() {
                Ok((_conn, peer)) => {
                    debug!(%peer, "orchestrator connected; fixture is live");
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    if Instant::now() >= deadline {
                        return Err(GateError::Timeout(self.accept_timeout));
                    }
                    std::thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl std::fmt::Debug for TcpRendezvous {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpRendezvous")
            .field("consumed", &self.listener.is_none())
            .field("accept_timeout", &self.accept_timeout)
            .finish()
    }
}
