//! Process-wide service state.
//!
//! Built once at startup from [`AppConfig`] and shared by every command and
//! HTTP handler.

use snowdesk_agent::{open_journal, Agent, SafetyGate};
use snowdesk_core::{config::AppConfig, AppResult};
use snowdesk_knowledge::{CorpusIndex, CorpusStats, DirectorySource, DocumentSource};
use snowdesk_weather::{create_client, WeatherTool};
use std::sync::Arc;
use std::time::Duration;

/// The agent plus where its corpus comes from.
pub struct AppState {
    pub agent: Arc<Agent>,

    /// Corpus source; `None` when no corpus root is configured
    source: Option<Arc<dyn DocumentSource>>,

    collection: String,
}

impl AppState {
    pub fn new(
        agent: Arc<Agent>,
        source: Option<Arc<dyn DocumentSource>>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            agent,
            source,
            collection: collection.into(),
        }
    }

    /// Wire up every component from configuration and load the corpus.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let index = Arc::new(CorpusIndex::new(
            config.corpus.chunk_size,
            config.corpus.chunk_overlap,
        )?);

        let weather_cfg = &config.weather;
        let client = create_client(
            &weather_cfg.provider,
            &weather_cfg.base_url,
            &weather_cfg.user_agent,
            Duration::from_secs(weather_cfg.timeout_secs),
        )?;
        let weather = WeatherTool::new(
            weather_cfg.places.clone(),
            weather_cfg.trigger_words.clone(),
            client,
        );

        let journal = open_journal(config.journal.backend, &config.journal.path)?;
        tracing::debug!(
            "Journal: {:?} at {:?}",
            config.journal.backend,
            config.journal.path
        );

        let agent = Agent::new(
            index,
            SafetyGate::new(&config.safety.blocked_terms),
            weather,
            journal,
            config.retrieval.top_k,
        );

        let source = config.corpus.root.as_ref().map(|root| {
            tracing::info!("Corpus root: {:?}", root);
            Arc::new(DirectorySource::new(root)) as Arc<dyn DocumentSource>
        });

        let state = Self::new(Arc::new(agent), source, config.corpus.collection.clone());
        state.reload().await?;
        Ok(state)
    }

    pub fn stats(&self) -> CorpusStats {
        self.agent.index().stats()
    }

    /// Rebuild the corpus index from the configured source.
    pub async fn reload(&self) -> AppResult<CorpusStats> {
        let index = self.agent.index();
        match &self.source {
            Some(source) => index.load_from(source.as_ref(), &self.collection).await,
            None => {
                tracing::warn!("No corpus root configured; no docs loaded");
                let none: [&str; 0] = [];
                index.rebuild(&none)
            }
        }
    }
}
