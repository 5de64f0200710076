//! Question orchestration.
//!
//! Gate, retrieve, optionally look up the weather, assemble, journal. The
//! agent keeps no per-conversation state; concurrent calls only share the
//! read-mostly corpus index and the append-only journal.

use crate::answer::{assemble_answer, REFUSAL};
use crate::journal::{InteractionJournal, InteractionRecord};
use crate::safety::SafetyGate;
use crate::types::{AgentAnswer, ToolTag};
use snowdesk_core::{AppError, AppResult};
use snowdesk_knowledge::CorpusIndex;
use snowdesk_weather::WeatherTool;
use std::sync::Arc;

/// Answers questions about snow services and weather.
pub struct Agent {
    index: Arc<CorpusIndex>,
    gate: SafetyGate,
    weather: WeatherTool,
    journal: Arc<dyn InteractionJournal>,
    top_k: usize,
}

impl Agent {
    pub fn new(
        index: Arc<CorpusIndex>,
        gate: SafetyGate,
        weather: WeatherTool,
        journal: Arc<dyn InteractionJournal>,
        top_k: usize,
    ) -> Self {
        Self {
            index,
            gate,
            weather,
            journal,
            top_k,
        }
    }

    /// The corpus index questions are answered from.
    pub fn index(&self) -> &Arc<CorpusIndex> {
        &self.index
    }

    /// Answer one question. Never fails; tool problems end up in the text.
    pub async fn answer(&self, question: &str) -> AgentAnswer {
        if let Some(term) = self.gate.matched_term(question) {
            tracing::warn!("Rejected question containing deny-listed term '{}'", term);
            return self
                .finish(question, REFUSAL.to_string(), vec![ToolTag::Blocked])
                .await;
        }

        let mut tools = Vec::new();

        let chunks = self.index.retrieve(question, self.top_k);
        tools.push(ToolTag::Rag);
        tracing::debug!("Retrieved {} chunks", chunks.len());

        let mut weather = None;
        if let Some(place) = self.weather.should_lookup(question) {
            let name = place.name.clone();
            weather = self.weather.forecast_for_place(&name).await;
            tools.push(ToolTag::WeatherApi);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let answer = assemble_answer(&texts, weather.as_deref());

        self.finish(question, answer, tools).await
    }

    async fn finish(&self, question: &str, answer: String, tools: Vec<ToolTag>) -> AgentAnswer {
        let tags: Vec<&str> = tools.iter().map(ToolTag::as_str).collect();
        tracing::info!("Answered question using [{}]", tags.join(", "));

        let record = InteractionRecord::now(question, &answer, &tools);
        if let Err(e) = self.record(record).await {
            tracing::warn!("Failed to journal interaction: {}", e);
        }

        AgentAnswer {
            answer,
            tools_used: tools,
        }
    }

    /// Append on the blocking pool; journal writes lock and sync files.
    async fn record(&self, record: InteractionRecord) -> AppResult<()> {
        let journal = Arc::clone(&self.journal);
        tokio::task::spawn_blocking(move || journal.append(&record))
            .await
            .map_err(|e| AppError::Agent(format!("Journal task failed: {}", e)))?
    }
}
