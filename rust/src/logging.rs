//! Logging setup with verbosity level control.
//!
//! The library only emits `tracing` events; binaries decide whether and how
//! to print them. Verbosity levels:
//! - 0: SILENT (warnings and errors)
//! - 1: CHANGES (input read, network parsed, output written)
//! - 2: CHECKS (validation and scheduling pass details)
//! - 3: DEBUG (everything)

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Default filter directive for a verbosity level; levels above DEBUG saturate.
pub fn filter_directive(verbosity: u8) -> &'static str {
    match verbosity {
        VERBOSITY_SILENT => "warn",
        VERBOSITY_CHANGES => "parade=info,warn",
        VERBOSITY_CHECKS => "parade=debug,info",
        _ => "parade=trace,debug",
    }
}

/// Install a compact stderr subscriber. `RUST_LOG` overrides the verbosity.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(verbosity: u8) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
}
