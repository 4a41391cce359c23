//! Shared helpers for the lock tests.
//!
//! [`oracle`] holds deliberately naive reference implementations the lock
//! tests compare the kernel and search against.

#![forbid(unsafe_code)]

pub mod oracle;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_subscriber() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .with(filter)
        .try_init()
        .ok();
}
