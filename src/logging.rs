//! Logging setup
//!
//! Events go to stderr so table and JSON output on stdout stay clean.
//! `RUST_LOG` wins over the verbosity flag when it is set.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialise the global subscriber
///
/// # Example
/// ```no_run
/// off_the_books::logging::init(0);
/// ```
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Subscriber for unit tests, safe to call more than once
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
