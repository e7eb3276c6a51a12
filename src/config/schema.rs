//! Configuration schema definitions.
//!
//! Defaults mirror the reference wiring: a Raspberry Pi GPIO UART at 115200
//! with a 15 second read deadline, and the rendezvous listener on all
//! interfaces at port 50007 with a 10 second accept bound.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// DUT-facing serial line
    pub serial: SerialConfig,
    /// Orchestrator-facing rendezvous listener
    pub rendezvous: RendezvousConfig,
}

/// Serial line configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path of the DUT-facing UART
    pub device: String,
    /// Initial baud rate; Baud Change mode may reconfigure it at runtime
    pub baud: u32,
    /// Frame read deadline in seconds; expiry yields a partial frame
    pub read_timeout_secs: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: "/dev/ttyAMA0".to_string(),
            baud: 115_200,
            read_timeout_secs: 15,
        }
    }
}

impl SerialConfig {
    /// Get the read deadline as a Duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

/// Rendezvous listener configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendezvousConfig {
    /// Address to bind the listener to
    pub host: String,
    /// Listener port the orchestrator connects to
    pub port: u16,
    /// Handshake wait bound in seconds; expiry is fatal
    pub accept_timeout_secs: u64,
}

impl Default for RendezvousConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 50007,
            accept_timeout_secs: 10,
        }
    }
}

impl RendezvousConfig {
    /// Get the accept bound as a Duration
    pub fn accept_timeout(&self) -> Duration {
        Duration::from_secs(self.accept_timeout_secs)
    }

    /// The socket address string to bind the listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
