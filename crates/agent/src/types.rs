//! Agent type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag recording which tool contributed to an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolTag {
    /// The safety gate refused the question
    Blocked,
    /// Corpus retrieval ran
    Rag,
    /// The weather service was queried
    WeatherApi,
}

impl ToolTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolTag::Blocked => "blocked",
            ToolTag::Rag => "rag",
            ToolTag::WeatherApi => "weather_api",
        }
    }
}

impl fmt::Display for ToolTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAnswer {
    /// Final answer text
    pub answer: String,

    /// Tools used, in invocation order
    pub tools_used: Vec<ToolTag>,
}
