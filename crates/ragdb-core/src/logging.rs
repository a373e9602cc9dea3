//! Process-wide tracing setup for binaries.
//!
//! Libraries only emit `tracing` events; whichever binary embeds them calls
//! [`init`] once. `RUST_LOG` takes precedence over the configured level.

use std::sync::Once;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Install a stderr fmt subscriber. Only the first call takes effect.
pub fn init(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(&config.level).unwrap_or_else(|e| {
                eprintln!("ragdb: invalid logging.level {:?} ({e}); using \"warn\"", config.level);
                EnvFilter::new("warn")
            })
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(filter);

        // A subscriber installed by the host (e.g. a test harness) wins.
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}
