//! Diagnostic logging through `tracing`.
//!
//! User-facing messages use the `status!`/`warn!` macros; this is for
//! request-level detail, off unless asked for.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a full filter directive, e.g.
/// `BABELCLIP_LOG=babelclip=trace`.
pub const LOG_ENV: &str = "BABELCLIP_LOG";

/// Filter for a `-v` count when `BABELCLIP_LOG` is unset.
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr subscriber. Safe to call more than once.
pub fn init(verbosity: u8) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
