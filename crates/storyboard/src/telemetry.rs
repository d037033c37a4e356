//! Logging setup for the binary.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Logs go to stderr so stdout stays clean for the storyboard itself.
/// `RUST_LOG` takes precedence; otherwise `verbose` picks DEBUG over INFO.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "debug,hyper_util=info,rustls=info,reqwest=info"
    } else {
        "info"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
