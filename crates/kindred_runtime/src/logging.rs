//! Log output for the shell.
//!
//! Events go to stderr so command output on stdout stays clean for piping.

use kindred_foundation::{Error, ErrorKind, Result};
use tracing_subscriber::EnvFilter;

/// Parses `tracing` filter directives such as `warn` or
/// `kindred_engine=debug,info`.
///
/// # Errors
///
/// Returns a `Command` error if the directives do not parse.
pub fn env_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| {
        Error::new(ErrorKind::Command(format!(
            "invalid log filter '{directives}': {e}"
        )))
    })
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already
/// installed.
pub fn init(directives: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives)?)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::new(ErrorKind::Internal(format!("logging setup failed: {e}"))))
}
