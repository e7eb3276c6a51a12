use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use uart_fixture::config::ConfigLoader;
use uart_fixture::dispatch::run_fixture;
use uart_fixture::error::FixtureError;
use uart_fixture::port::{PortSettings, SyncUartPort, UartTransport};
use uart_fixture::rendezvous::TcpRendezvous;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "uart-fixture",
    version,
    about = "Companion-board UART test fixture for validating DUT serial drivers.",
    long_about = "Bridges DUT serial traffic to a test orchestrator. Performs a one-shot TCP \
                  readiness handshake, then runs the selected relay mode against the serial line."
)]
struct Args {
    /// Assisted UART test selector: 0 = Write/Read Sync, 1 = Baud Change,
    /// 2 = Write Async. Extra selectors are accepted for orchestrator
    /// compatibility; only the first is used.
    #[arg(required = true, num_args = 1.., value_name = "MODE")]
    mode: Vec<i64>,

    /// Explicit configuration file path (bypasses the resolution order).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<(), FixtureError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let loader = match &args.config {
        Some(path) => ConfigLoader::load_from(path)?,
        None => ConfigLoader::load()?,
    };
    let config = loader.into_config();

    let settings = PortSettings {
        baud_rate: config.serial.baud,
        read_timeout: config.serial.read_timeout(),
    };
    let mut transport = SyncUartPort::open(&config.serial.device, settings)?;
    let mut gate = TcpRendezvous::bind(
        config.rendezvous.bind_addr().as_str(),
        config.rendezvous.accept_timeout(),
    )?;

    let selector = args.mode[0];
    info!(
        selector,
        device = transport.name(),
        rendezvous = %config.rendezvous.bind_addr(),
        "starting UART fixture"
    );

    run_fixture(selector, &mut gate, &mut transport)
}
