//! Unified top-level error type.
//!
//! Every fatal condition aborts the run; there is no retry policy anywhere.
//! Frame read timeouts never appear here: they yield a short or empty frame
//! that downstream modes process normally.

use crate::config::ConfigError;
use crate::frame::DirectiveError;
use crate::port::PortError;
use crate::rendezvous::GateError;
use thiserror::Error;

/// Unified fixture error. `From` conversions let `?` flow through `main`.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Readiness handshake failed; most commonly the orchestrator never
    /// connected within the wait bound.
    #[error("readiness handshake failed: {0}")]
    Gate(#[from] GateError),

    /// The serial channel failed (device unavailable, I/O error).
    #[error("serial transport failure: {0}")]
    Port(#[from] PortError),

    /// A baud directive matched but carried an unacceptable value. Surfaced,
    /// never silently ignored.
    #[error(transparent)]
    Directive(#[from] DirectiveError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
