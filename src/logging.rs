//! Logging initialization and configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "number_guess=info";

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Build a filter from a configured level.
///
/// A bare level such as `debug` is scoped to this crate plus HTTP tracing;
/// anything containing `=` or `,` is treated as a full directive string.
fn filter_for(level: &str) -> EnvFilter {
    let level = level.trim();
    if level.is_empty() {
        return default_filter();
    }

    let directives = if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("number_guess={level},tower_http={level}")
    };

    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the logging system with an explicit level or directive string.
///
/// An empty level defers to `RUST_LOG`, then to `number_guess=info`. Returns
/// `Err` if a subscriber has already been installed.
pub fn init_with_filter(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_an_error_not_a_panic() {
        let _ = init_with_filter("info");
        assert!(init_with_filter("info").is_err());
    }


    #[test]
    fn test_filter_for_bare_level() {
        let filter = filter_for("debug").to_string();
        assert!(filter.contains("number_guess=debug"));
        assert!(filter.contains("tower_http=debug"));
    }

    #[test]
    fn test_filter_for_directives() {
        let filter = filter_for("number_guess=trace,axum=warn").to_string();
        assert!(filter.contains("number_guess=trace"));
        assert!(filter.contains("axum=warn"));
    }

    #[test]
    fn test_logging_works() {
        let _ = init_with_filter("debug");

        tracing::info!("test info message");
        tracing::debug!(token = "00ff", "test debug message");
        tracing::warn!("test warn message");
    }
}
