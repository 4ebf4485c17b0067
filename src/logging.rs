//! Logging initialization and configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "lcu_bridge=info";

/// Initialize the logging system with an explicit filter directive.
///
/// A bare level such as `debug` is scoped to this crate; anything else is
/// passed to [`EnvFilter`] as-is. Falls back to the default filter when the
/// directive does not parse.
pub fn init_with_filter(directive: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(filter_for(directive))
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

fn filter_for(directive: &str) -> EnvFilter {
    let directive = directive.trim();
    let is_bare_level = matches!(
        directive.to_ascii_lowercase().as_str(),
        "error" | "warn" | "info" | "debug" | "trace" | "off"
    );

    let resolved = if is_bare_level {
        format!("lcu_bridge={}", directive.to_ascii_lowercase())
    } else {
        directive.to_string()
    };

    EnvFilter::try_new(resolved).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
