//! Tracing setup shared by every `snowdesk` subcommand.
//!
//! Diagnostics go to stderr; stdout carries answers and journal listings.

use crate::error::{AppError, AppResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// `log_level` is an `EnvFilter` directive such as `debug` or
/// `snowdesk_agent=trace`; when absent, `RUST_LOG` is used, then `info`.
/// Installing twice in one process is a config error.
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> AppResult<()> {
    let directive = match log_level {
        Some(level) => level.to_string(),
        None => std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
    };

    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| AppError::Config(format!("Invalid log filter {:?}: {}", directive, e)))?;

    let ansi = !no_color && std::env::var_os("NO_COLOR").is_none();
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(ansi);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Logging already initialised: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_config_error() {
        let result = init_logging(Some("snowdesk=notalevel"), true);
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
