//! The weather tool used by the agent.
//!
//! Resolves a known place to coordinates, asks the forecast client for the
//! current forecast and condenses it to `"{period}: {detail}"`. Failures come
//! back as readable text rather than errors so the answer can still be
//! assembled.

use crate::client::ForecastClient;
use crate::types::{ForecastError, ForecastFailure, ForecastStage};
use snowdesk_core::KnownPlace;
use std::sync::Arc;

/// Place-aware forecast lookup.
pub struct WeatherTool {
    /// Known places, in priority order
    places: Vec<KnownPlace>,

    /// Lowercased trigger words
    trigger_words: Vec<String>,

    client: Arc<dyn ForecastClient>,
}

impl WeatherTool {
    pub fn new(
        places: Vec<KnownPlace>,
        trigger_words: Vec<String>,
        client: Arc<dyn ForecastClient>,
    ) -> Self {
        let places = places
            .into_iter()
            .map(|place| KnownPlace {
                name: place.name.trim().to_lowercase(),
                ..place
            })
            .collect();
        let trigger_words = trigger_words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            places,
            trigger_words,
            client,
        }
    }

    /// Case-insensitive exact lookup of a known place.
    pub fn find_place(&self, name: &str) -> Option<&KnownPlace> {
        let name = name.trim().to_lowercase();
        self.places.iter().find(|place| place.name == name)
    }

    /// Whether the question contains any trigger word (substring match).
    pub fn is_triggered(&self, question: &str) -> bool {
        let question = question.to_lowercase();
        self.trigger_words
            .iter()
            .any(|word| question.contains(word.as_str()))
    }

    /// First known place, in configured order, whose name occurs in the question.
    pub fn detect_place(&self, question: &str) -> Option<&KnownPlace> {
        let question = question.to_lowercase();
        self.places
            .iter()
            .find(|place| question.contains(place.name.as_str()))
    }

    /// The place to look up for this question, if it asks about weather at all.
    pub fn should_lookup(&self, question: &str) -> Option<&KnownPlace> {
        if !self.is_triggered(question) {
            return None;
        }
        self.detect_place(question)
    }

    /// Forecast summary for a known place.
    ///
    /// Returns `None` when `name` is not a known place. Otherwise always
    /// returns text: either the first period's summary or a
    /// `Weather API error (...)` description.
    pub async fn forecast_for_place(&self, name: &str) -> Option<String> {
        let place = self.find_place(name)?;

        tracing::info!(
            "Fetching {} forecast for {} ({}, {})",
            self.client.provider_name(),
            place.name,
            place.latitude,
            place.longitude
        );

        let result = self
            .client
            .get_forecast(place.latitude, place.longitude)
            .await
            .and_then(|forecast| {
                forecast.periods.first().map(|p| p.summary()).ok_or_else(|| {
                    ForecastError::new(ForecastStage::Forecast, ForecastFailure::NoPeriods)
                })
            });

        match result {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!("Forecast for {} failed: {}", place.name, e);
                Some(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Forecast, ForecastPeriod};
    use std::sync::Mutex;

    /// Client that replays a fixed result and records the coordinates asked for.
    struct ScriptedClient {
        result: Result<Forecast, ForecastError>,
        calls: Mutex<Vec<(f64, f64)>>,
    }

    impl ScriptedClient {
        fn new(result: Result<Forecast, ForecastError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl ForecastClient for ScriptedClient {
        fn provider_name(&self) -> &str {
            "scripted"
        }

        async fn get_forecast(
            &self,
            latitude: f64,
            longitude: f64,
        ) -> Result<Forecast, ForecastError> {
            self.calls.lock().unwrap().push((latitude, longitude));
            self.result.clone()
        }
    }

    fn places() -> Vec<KnownPlace> {
        vec![
            KnownPlace::new("anchorage", 61.2181, -149.9003),
            KnownPlace::new("Fairbanks", 64.8378, -147.7164),
            KnownPlace::new("juneau", 58.3019, -134.4197),
        ]
    }

    fn triggers() -> Vec<String> {
        ["weather", "forecast", "alert", "temperature", "snow"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn sunny() -> Result<Forecast, ForecastError> {
        Ok(Forecast {
            periods: vec![
                ForecastPeriod::new("Today", "Sunny, high near 20."),
                ForecastPeriod::new("Tonight", "Clear."),
            ],
        })
    }

    #[tokio::test]
    async fn test_forecast_for_known_place_uses_first_period() {
        let client = ScriptedClient::new(sunny());
        let tool = WeatherTool::new(places(), triggers(), client.clone());

        let summary = tool.forecast_for_place("ANCHORAGE").await;

        assert_eq!(summary.as_deref(), Some("Today: Sunny, high near 20."));
        assert_eq!(*client.calls.lock().unwrap(), vec![(61.2181, -149.9003)]);
    }

    #[tokio::test]
    async fn test_unknown_place_skips_client() {
        let client = ScriptedClient::new(sunny());
        let tool = WeatherTool::new(places(), triggers(), client.clone());

        assert_eq!(tool.forecast_for_place("nome").await, None);
        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_client_failure_becomes_text() {
        let client = ScriptedClient::new(Err(ForecastError::new(
            ForecastStage::Points,
            ForecastFailure::Status(500),
        )));
        let tool = WeatherTool::new(places(), triggers(), client);

        let summary = tool.forecast_for_place("juneau").await;
        assert_eq!(summary.as_deref(), Some("Weather API error (points): 500"));
    }

    #[tokio::test]
    async fn test_empty_forecast_becomes_text() {
        let client = ScriptedClient::new(Ok(Forecast::default()));
        let tool = WeatherTool::new(places(), triggers(), client);

        let summary = tool.forecast_for_place("juneau").await;
        assert_eq!(
            summary.as_deref(),
            Some("Weather API error (forecast): no forecast periods")
        );
    }

    #[test]
    fn test_detect_place_uses_configured_order() {
        let tool = WeatherTool::new(places(), triggers(), ScriptedClient::new(sunny()));

        // Mentioned order does not matter; list order does.
        let place = tool.detect_place("Juneau or Anchorage weather?").unwrap();
        assert_eq!(place.name, "anchorage");

        let place = tool.detect_place("snow in FAIRBANKS").unwrap();
        assert_eq!(place.name, "fairbanks");

        assert!(tool.detect_place("weather in nome").is_none());
    }

    #[test]
    fn test_should_lookup_needs_trigger_and_place() {
        let tool = WeatherTool::new(places(), triggers(), ScriptedClient::new(sunny()));

        assert!(tool.should_lookup("weather in anchorage").is_some());
        assert!(tool.should_lookup("Temperature in Juneau today").is_some());
        assert!(tool.should_lookup("anchorage city hall hours").is_none());
        assert!(tool.should_lookup("what is the weather like").is_none());
        // Substring triggers: "snowfall" contains "snow".
        assert!(tool.should_lookup("snowfall totals for fairbanks").is_some());
    }
}
