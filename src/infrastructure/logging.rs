//! Tracing subscriber setup for the admin API

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Without it,
/// the configured level applies crate-wide while sqlx statement logging
/// is capped at warn so admin traffic stays readable.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(&config.level));

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
    }

    tracing::info!(level = %config.level, "Tracing initialized");
}

fn default_filter(level: &str) -> EnvFilter {
    // sqlx logs every executed statement at info
    EnvFilter::new(format!("{level},sqlx=warn"))
}
