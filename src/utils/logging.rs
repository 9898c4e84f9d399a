//! Logging setup

use super::config::LoggingSettings;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Parse a level name, falling back to INFO
pub fn parse_level(level: &str) -> Level {
    level.parse().unwrap_or(Level::INFO)
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Calling this twice is a no-op.
pub fn init_logging(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_level(&settings.level).as_str().to_lowercase()));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if settings.json_format {
        registry.with(fmt::layer().json().with_target(false)).try_init()
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()
    };
    result.ok();
}
