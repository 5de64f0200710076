//! Weather lookups for the Snowdesk service.
//!
//! This crate turns a place name mentioned in a question into a one-line
//! forecast summary. Network access goes through the [`ForecastClient`]
//! trait so callers can swap the provider.
//!
//! # Providers
//! - **NWS**: api.weather.gov (default)
//!
//! # Example
//! ```no_run
//! use snowdesk_core::KnownPlace;
//! use snowdesk_weather::{create_client, WeatherTool};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_client("nws", "", "ads-agent", Duration::from_secs(20))?;
//! let places = vec![KnownPlace::new("anchorage", 61.2181, -149.9003)];
//! let tool = WeatherTool::new(places, vec!["weather".to_string()], client);
//! if let Some(summary) = tool.forecast_for_place("Anchorage").await {
//!     println!("{}", summary);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod tool;
pub mod types;

// Re-export main types
pub use client::ForecastClient;
pub use factory::create_client;
pub use providers::NwsClient;
pub use tool::WeatherTool;
pub use types::{Forecast, ForecastError, ForecastFailure, ForecastPeriod, ForecastStage};
