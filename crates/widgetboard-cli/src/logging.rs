//! Tracing setup for the `widgetboard` binary.
//!
//! Log lines go to stderr so rendered output on stdout stays clean. The
//! filter comes from `WIDGETBOARD_LOG` and defaults to `warn`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter directives.
pub(crate) const LOG_ENV: &str = "WIDGETBOARD_LOG";

/// Install the global subscriber. Call once from `main`.
pub(crate) fn init() {
    tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}
