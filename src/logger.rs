use tracing_subscriber::EnvFilter;

/// Log level used when `RUST_LOG` is not set.
pub fn default_filter(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout only carries
/// the per-file progress lines.
pub fn init(quiet: bool, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(quiet, verbose)));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
