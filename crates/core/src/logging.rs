//! Logging infrastructure for the admissions advisor.
//!
//! This module initializes the tracing subscriber for structured logging.
//! All logs are emitted to stderr to keep stdout clean for answer output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AppError;
use crate::error::AppResult;

/// Initialize the tracing subscriber with stderr output.
///
/// Filtering comes from `RUST_LOG` when set, otherwise from the provided
/// level, otherwise "info". At the default level the HTTP client internals
/// (reqwest/hyper) are capped at `warn` so per-request chatter does not
/// drown the pipeline stages.
///
/// # Arguments
/// * `log_level` - Optional log level override (e.g., "debug", "info")
/// * `no_color` - Disable colored output
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> AppResult<()> {
    let filter_str = match (std::env::var("RUST_LOG").ok(), log_level) {
        (Some(env), _) => env,
        (None, Some(level)) => level.to_string(),
        (None, None) => "info,reqwest=warn,hyper=warn".to_string(),
    };

    let env_filter = EnvFilter::try_new(&filter_str)
        .map_err(|e| AppError::Config(format!("Invalid log filter '{}': {}", filter_str, e)))?;

    // Answers go to stdout; everything diagnostic goes to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(!no_color && supports_color());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))?;

    Ok(())
}

/// Check if the terminal supports color output.
fn supports_color() -> bool {
    // NO_COLOR is honored unconditionally (https://no-color.org)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // For more robust terminal detection we would reach for `is-terminal`;
    // assume color support otherwise
    true
}
