//! Logging setup.
//!
//! Logs go to local stdout by default. When a log collector endpoint is
//! configured, lines are shipped to it as JSON over TCP instead; if the
//! collector cannot be reached at startup, the subscriber falls back to
//! local output and the service keeps running.

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Mutex;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Initialize the tracing subscriber for this process.
pub fn init(collector: Option<&str>) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("cadastro_server=info".parse()?)
        .add_directive("cadastro_core=info".parse()?);

    match collector.map(|addr| (addr, connect(addr))) {
        Some((addr, Ok(stream))) => {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_ansi(false)
                        .with_writer(Mutex::new(stream)),
                )
                .with(filter)
                .init();
            info!("Shipping logs to collector at {addr}");
        }
        Some((addr, Err(err))) => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .init();
            warn!("Log collector {addr} unreachable ({err}), using local output");
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .init();
        }
    }

    Ok(())
}

fn connect(addr: &str) -> io::Result<TcpStream> {
    let resolved = addr.to_socket_addrs()?.next().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "collector address did not resolve")
    })?;
    TcpStream::connect_timeout(&resolved, CONNECT_TIMEOUT)
}
