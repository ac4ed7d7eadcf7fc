//! Diagnostic logging on stderr.
//!
//! `RUST_LOG` wins when set. Otherwise the crate logs at `info`, or `debug`
//! with `--verbose`.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let fallback = if verbose {
        "pdf_organizer=debug"
    } else {
        "pdf_organizer=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
