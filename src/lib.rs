//! UART hardware-in-the-loop test fixture.
//!
//! Runs on a companion board wired to a device-under-test (DUT) over a
//! physical serial line. A one-shot TCP rendezvous tells the external test
//! orchestrator when the fixture is live; the fixture then relays, echoes, or
//! reconfigures serial traffic according to one of three selectable test
//! modes, so the DUT's UART driver can be validated for basic
//! transmit/receive, full-duplex echo correctness, and dynamic baud-rate
//! switching.
//!
//! # Modules
//!
//! - `config`: TOML configuration with env-variable overrides
//! - `dispatch`: mode selection and the three relay state machines
//! - `error`: unified error handling
//! - `frame`: line-delimited frames and the baud-rate directive parser
//! - `port`: DUT-facing serial transport (real port + scripted mock)
//! - `rendezvous`: one-shot readiness handshake with the orchestrator

pub mod config;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod port;
pub mod rendezvous;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigError, ConfigLoader, ConfigResult};
pub use dispatch::{run_fixture, TestMode, BAUD_CHANGE_ITERATIONS};
pub use error::FixtureError;
pub use frame::{DirectiveError, Frame, FRAME_DELIMITER};
pub use port::{MockUartPort, PortError, PortSettings, SyncUartPort, UartTransport};
pub use rendezvous::{GateError, ReadinessGate, TcpRendezvous};
