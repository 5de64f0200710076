//! Command handlers for the snowdesk CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod logs;
pub mod serve;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use logs::LogsCommand;
pub use serve::ServeCommand;
