//! Tracing subscriber setup.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

static TRACING_INIT: Once = Once::new();

/// Installs the global fmt subscriber. `RUST_LOG` wins over `default_filter`
/// when set. Later calls, or a subscriber installed elsewhere, leave the
/// existing one in place.
pub fn init_tracing(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
