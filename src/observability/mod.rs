//! # Observability
//!
//! Structured logging via the tracing ecosystem. Raw secrets never
//! appear in log fields; handlers and services log identifiers only.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::Result;

/// Initialize the tracing subscriber.
///
/// Filtering comes from `RUST_LOG` (default `info`); set
/// `WARDPLANE_LOG_JSON=true` for JSON output in production.
pub fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_output = std::env::var("WARDPLANE_LOG_JSON")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    Ok(())
}
