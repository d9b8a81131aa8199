//! Logging setup.
//!
//! Core operations log through `tracing`; this installs the subscriber.
//! `RUST_LOG` takes precedence over the configured level. Output goes to
//! stderr so stdout stays clean for command results.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, LoggingSection};

/// Build the level filter from `RUST_LOG` or the configured level.
pub fn env_filter(settings: &LoggingSection) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Safe to call once per process.
pub fn init_logging(settings: &LoggingSection) {
    let filter = env_filter(settings);

    let result = match settings.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    if let Err(err) = result {
        eprintln!("Warning: failed to initialize logging: {}", err);
    }
}
