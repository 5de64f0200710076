//! Forecast types shared by clients and the weather tool.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Placeholder used when a period carries no name.
pub const DEFAULT_PERIOD_NAME: &str = "Forecast";

/// One forecast period (e.g. "Tonight", "Saturday").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub detailed_forecast: Option<String>,
}

impl ForecastPeriod {
    pub fn new(name: impl Into<String>, detailed_forecast: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            detailed_forecast: Some(detailed_forecast.into()),
        }
    }

    /// `"{name}: {detail}"`, with missing fields replaced by placeholders.
    pub fn summary(&self) -> String {
        format!(
            "{}: {}",
            self.name.as_deref().unwrap_or(DEFAULT_PERIOD_NAME),
            self.detailed_forecast.as_deref().unwrap_or_default()
        )
    }
}

/// A structured forecast, periods in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub periods: Vec<ForecastPeriod>,
}

/// Which request of the two-step lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastStage {
    /// Coordinates to forecast-endpoint resolution
    Points,
    /// The forecast itself
    Forecast,
}

impl fmt::Display for ForecastStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastStage::Points => f.write_str("points"),
            ForecastStage::Forecast => f.write_str("forecast"),
        }
    }
}

/// Why a forecast request failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastFailure {
    /// Non-success HTTP status
    #[error("{0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    InvalidBody(String),

    #[error("missing forecast URL")]
    MissingForecastUrl,

    #[error("no forecast periods")]
    NoPeriods,
}

/// A failed forecast lookup.
///
/// Displays as `Weather API error (<stage>): <reason>`; this text is what ends
/// up in the answer, since weather failures never abort a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Weather API error ({stage}): {failure}")]
pub struct ForecastError {
    pub stage: ForecastStage,
    pub failure: ForecastFailure,
}

impl ForecastError {
    pub fn new(stage: ForecastStage, failure: ForecastFailure) -> Self {
        Self { stage, failure }
    }
}
