//! Tracing setup for the demo binary.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter when neither `--log-filter` nor `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "info";

/// Installs a global subscriber with thread names and uptime timestamps.
///
/// `directive` overrides `RUST_LOG`; an unparsable directive falls back to
/// the default filter.
pub fn init_tracing(directive: Option<&str>) {
    let filter = match directive {
        Some(d) => EnvFilter::try_new(d).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(true)
                .with_file(false)
                .with_line_number(false)
                .with_timer(fmt::time::uptime()),
        )
        .with(filter)
        .init();
}
