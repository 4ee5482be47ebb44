//! Log output setup.
//!
//! Development gets pretty, human-readable output with source locations. Production
//! gets one flattened JSON object per line, carrying the fields of the current span
//! (including the request id).

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Filter used when `RUST_LOG` is not set.
const fn default_directives(env: Environment) -> &'static str {
    if env.is_development() {
        "debug,tower_http=debug,sqlx=warn"
    } else {
        "info,tower_http=info,sqlx=warn"
    }
}

/// Install the global subscriber for `env`. `RUST_LOG` overrides the default filter
/// (e.g. `RUST_LOG=debug,tower_http=trace`).
pub fn init_tracing(env: Environment) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let output = if env.is_development() {
        fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(output.with_filter(env_filter))
        .try_init()?;

    tracing::info!(environment = ?env, "Tracing initialized");

    Ok(())
}
