//! Logging setup for the command-line front end

use tracing_subscriber::EnvFilter;

/// Initialise logging to stderr.
///
/// Without `verbose` only warnings and errors are shown, so command output
/// on stdout is not interleaved with log lines. With `verbose` the default
/// level is `debug` and `RUST_LOG` may override it.
pub fn init(verbose: bool) {
    // RUST_LOG is ignored unless verbose output was asked for
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
