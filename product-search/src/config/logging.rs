//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use super::LogFormat;

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` and falls back to `info`.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
