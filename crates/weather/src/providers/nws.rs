//! National Weather Service forecast provider.
//!
//! The NWS API resolves a forecast in two requests:
//! 1. `GET {base}/points/{lat},{lon}` returns `properties.forecast`, the URL of
//!    the gridpoint forecast for that location
//! 2. `GET {properties.forecast}` returns `properties.periods`
//!
//! API docs: https://www.weather.gov/documentation/services-web-api

use crate::client::ForecastClient;
use crate::types::{Forecast, ForecastError, ForecastFailure, ForecastPeriod, ForecastStage};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use snowdesk_core::{AppError, AppResult};
use std::time::Duration;

/// Default NWS API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.weather.gov";

const GEO_JSON: &str = "application/geo+json";

#[derive(Debug, Deserialize)]
struct PointsResponse {
    #[serde(default)]
    properties: Option<PointsProperties>,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    #[serde(default)]
    forecast: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    properties: Option<ForecastProperties>,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Vec<ForecastPeriod>,
}

/// NWS forecast client.
pub struct NwsClient {
    /// Base URL for the NWS API
    base_url: String,

    /// User-Agent header; NWS rejects anonymous clients
    user_agent: String,

    /// HTTP client with the request timeout applied
    client: reqwest::Client,
}

impl NwsClient {
    /// Create a client against `base_url` with a per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Weather(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
            client,
        })
    }

    fn points_url(&self, latitude: f64, longitude: f64) -> String {
        format!("{}/points/{},{}", self.base_url, latitude, longitude)
    }

    /// GET `url` and decode the JSON body, mapping every failure to `stage`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        stage: ForecastStage,
    ) -> Result<T, ForecastError> {
        tracing::debug!("NWS {} request: {}", stage, url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, GEO_JSON)
            .send()
            .await
            .map_err(|e| ForecastError::new(stage, classify(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::new(
                stage,
                ForecastFailure::Status(status.as_u16()),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            let failure = if e.is_timeout() {
                ForecastFailure::Timeout
            } else {
                ForecastFailure::InvalidBody(e.to_string())
            };
            ForecastError::new(stage, failure)
        })
    }
}

/// Map a transport error to a forecast failure.
fn classify(err: reqwest::Error) -> ForecastFailure {
    if err.is_timeout() {
        ForecastFailure::Timeout
    } else {
        ForecastFailure::Transport(err.to_string())
    }
}

#[async_trait::async_trait]
impl ForecastClient for NwsClient {
    fn provider_name(&self) -> &str {
        "nws"
    }

    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Forecast, ForecastError> {
        let points: PointsResponse = self
            .get_json(&self.points_url(latitude, longitude), ForecastStage::Points)
            .await?;

        let forecast_url = points
            .properties
            .and_then(|p| p.forecast)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                ForecastError::new(ForecastStage::Points, ForecastFailure::MissingForecastUrl)
            })?;

        let forecast: ForecastResponse = self
            .get_json(&forecast_url, ForecastStage::Forecast)
            .await?;

        let periods = forecast.properties.map(|p| p.periods).unwrap_or_default();
        if periods.is_empty() {
            return Err(ForecastError::new(
                ForecastStage::Forecast,
                ForecastFailure::NoPeriods,
            ));
        }

        tracing::debug!("NWS returned {} forecast periods", periods.len());
        Ok(Forecast { periods })
    }
}
