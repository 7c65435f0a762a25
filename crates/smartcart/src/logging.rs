//! Diagnostic logging setup
//!
//! Logs go to stderr so stdout stays clean for list and JSON output.
//! `RUST_LOG` overrides the level chosen from the CLI flags.

use tracing_subscriber::EnvFilter;

/// Default filter directive for the given verbosity flags
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "smartcart=debug,smartcart_core=debug,warn"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
