//! Logging setup for the command-line tool.
//!
//! Installs a global tracing subscriber writing to standard error so that
//! standard output stays reserved for results.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive (e.g. `debug`)
pub const LOG_ENV: &str = "GITSEM_LOG";

/// Filter directive for a `-v` count when no environment override is set.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing.
///
/// `GITSEM_LOG` wins over the verbosity flag. Calling this more than once is
/// harmless: later calls leave the first subscriber in place.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
