//! Diagnostic logging for the CLI.
//!
//! Events go to stderr so prompts and hands on stdout stay clean.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber at `level` (`warn` by default).
///
/// Later calls are ignored; tests run many sessions in one process.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
