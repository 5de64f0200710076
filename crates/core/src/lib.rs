//! Snowdesk Core Library
//!
//! This crate provides the foundational utilities shared by every Snowdesk crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management (corpus, retrieval, safety, weather, journal)

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, KnownPlace};
pub use error::{AppError, AppResult};
