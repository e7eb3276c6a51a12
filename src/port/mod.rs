//! Transport layer for the DUT-facing serial channel.
//!
//! The dispatcher only sees the [`UartTransport`] trait; the real port and the
//! scripted mock are interchangeable behind it.

pub mod error;
pub mod mock;
pub mod sync_port;
pub mod traits;

pub use error::PortError;
pub use mock::MockUartPort;
pub use sync_port::SyncUartPort;
pub use traits::{PortSettings, UartTransport};
