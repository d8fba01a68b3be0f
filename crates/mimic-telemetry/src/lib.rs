//! Telemetry for Mimic
//!
//! Structured logging via the `tracing` ecosystem. The proxy has no
//! metrics surface, so this is a plain fmt subscriber with env filtering.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` takes precedence; `default_filter` applies otherwise.
/// Call once at startup, before any request is served.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
