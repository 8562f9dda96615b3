//! Log output for the heartcore binary
//!
//! Installs a `tracing` subscriber that writes to stderr, keeping stdout free
//! for the JSON the CLI prints.

use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or debug
/// output when `verbose` is set. Stdout is left for command output.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
}
