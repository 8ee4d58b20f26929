//! Tracing subscriber setup
//!
//! - Production: structured JSON lines
//! - Anything else: colored, human-readable lines

use crate::config::get_environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber for the current `SIGNALSCOPE_ENV`.
pub fn init_logging() {
    init_for_environment(&get_environment());
}

/// Install the global subscriber for `environment`.
///
/// Returns `false` when a subscriber was already installed; the existing one
/// is kept.
pub fn init_for_environment(environment: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let is_production = matches!(environment, "production" | "prod");

    let installed = if is_production {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stdout),
            )
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true).with_ansi(true).with_writer(std::io::stdout))
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::debug!(environment = %environment, "Logging initialized");
    }
    installed
}
