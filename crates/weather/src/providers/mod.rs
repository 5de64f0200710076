//! Forecast provider implementations.

pub mod nws;

pub use nws::NwsClient;
