//! Forecast provider factory.
//!
//! Builds the forecast client named in configuration.

use crate::client::ForecastClient;
use crate::providers::{nws, NwsClient};
use snowdesk_core::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Create a forecast client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("nws")
/// * `base_url` - Service endpoint; empty selects the provider default
/// * `user_agent` - User-Agent sent with every request
/// * `timeout` - Bound applied to each network call
///
/// # Errors
/// Returns a config error if the provider is unknown, or a weather error if
/// the HTTP client cannot be initialised.
pub fn create_client(
    provider: &str,
    base_url: &str,
    user_agent: &str,
    timeout: Duration,
) -> AppResult<Arc<dyn ForecastClient>> {
    match provider.to_lowercase().as_str() {
        "nws" => {
            let base_url = if base_url.trim().is_empty() {
                nws::DEFAULT_BASE_URL
            } else {
                base_url
            };
            let client = NwsClient::new(base_url, user_agent, timeout)?;
            Ok(Arc::new(client))
        }
        _ => Err(AppError::Config(format!(
            "Unknown weather provider: {}",
            provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_nws_client() {
        let client = create_client("nws", "", "ads-agent", Duration::from_secs(20)).unwrap();
        assert_eq!(client.provider_name(), "nws");
    }

    #[test]
    fn test_provider_name_is_case_insensitive() {
        assert!(create_client("NWS", "http://localhost:1", "ua", Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("accuweather", "", "ua", Duration::from_secs(1)) {
            Err(AppError::Config(msg)) => assert!(msg.contains("Unknown weather provider")),
            Err(other) => panic!("Expected config error, got {}", other),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
