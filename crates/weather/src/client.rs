//! Forecast client abstraction.
//!
//! This module defines the seam between the weather tool and whatever service
//! turns coordinates into a forecast.

use crate::types::{Forecast, ForecastError};

/// Trait for forecast providers.
///
/// Implementations must bound every network call with a timeout and report
/// timeouts as a [`ForecastError`] like any other failure. No retries.
#[async_trait::async_trait]
pub trait ForecastClient: Send + Sync {
    /// Get the provider name (e.g., "nws").
    fn provider_name(&self) -> &str;

    /// Fetch the current forecast for a coordinate pair.
    ///
    /// # Arguments
    /// * `latitude` - Decimal degrees, north positive
    /// * `longitude` - Decimal degrees, east positive
    async fn get_forecast(&self, latitude: f64, longitude: f64)
        -> Result<Forecast, ForecastError>;
}
