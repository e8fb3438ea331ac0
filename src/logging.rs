//! diagnostic logging
//!
//! Events go to stderr through `tracing-subscriber` and are filtered by the
//! `ZZDIR_LOG` environment variable (`EnvFilter` syntax, e.g.
//! `ZZDIR_LOG=debug`). Nothing is logged unless the variable is set, so the
//! content table on stdout is never interleaved with log lines.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ZZDIR_LOG";

/// install the global subscriber; a second call is a no-op
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
