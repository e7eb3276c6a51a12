//! Configuration for the UART fixture.
//!
//! TOML-based configuration with environment variable overrides.
//!
//! # Configuration Resolution
//!
//! Configuration is loaded from the following locations (in order of priority):
//!
//! 1. `UART_FIXTURE_CONFIG` environment variable (explicit path)
//! 2. `./uart-fixture.toml` (current directory)
//! 3. `~/.config/uart-fixture/uart-fixture.toml` (XDG on Linux/macOS)
//! 4. `%APPDATA%\uart-fixture\uart-fixture.toml` (Windows)
//! 5. Built-in defaults (no file required)
//!
//! # Environment Overrides
//!
//! Any scalar value can be overridden via `UART_FIXTURE_<SECTION>_<KEY>`,
//! e.g. `UART_FIXTURE_SERIAL_DEVICE=/dev/ttyUSB0` or
//! `UART_FIXTURE_RENDEZVOUS_PORT=40007`.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{resolve_config_path, ConfigLoader};
pub use schema::{Config, RendezvousConfig, SerialConfig};
