//! Configuration management for the Snowdesk service.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - A YAML config file (`snowdesk.yaml` or the path in `SNOWDESK_CONFIG`)
//! - Environment variables
//! - Command-line flags
//!
//! Nothing in the question-answering core reads this module directly; the
//! binary hands the relevant values to each component as parameters.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "snowdesk.yaml";

/// Weather providers understood by the client factory.
pub const KNOWN_WEATHER_PROVIDERS: &[&str] = &["nws"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Config file that was merged, if any
    pub config_file: Option<PathBuf>,

    /// Log filter override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    pub server: ServerConfig,
    pub corpus: CorpusConfig,
    pub retrieval: RetrievalConfig,
    pub safety: SafetyConfig,
    pub weather: WeatherConfig,
    pub journal: JournalConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Document collection and chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CorpusConfig {
    /// Root directory holding document collections. `None` means no corpus.
    pub root: Option<PathBuf>,

    /// Collection identifier, resolved as a sub-path of `root`
    pub collection: String,

    /// Chunk size in characters
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: None,
            collection: String::new(),
            chunk_size: 900,
            chunk_overlap: 150,
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetrievalConfig {
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

/// Safety gate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SafetyConfig {
    pub blocked_terms: Vec<String>,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            blocked_terms: vec!["hack".into(), "weapon".into(), "bomb".into()],
        }
    }
}

/// A named location that can trigger a forecast lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownPlace {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl KnownPlace {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Weather tool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeatherConfig {
    /// Forecast provider ("nws")
    pub provider: String,

    /// Base URL of the forecast service
    pub base_url: String,

    /// User-Agent sent with every forecast request
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Words that make a question eligible for a forecast lookup
    pub trigger_words: Vec<String>,

    /// Known places, in lookup priority order
    pub places: Vec<KnownPlace>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            provider: "nws".to_string(),
            base_url: "https://api.weather.gov".to_string(),
            user_agent: "ads-agent".to_string(),
            timeout_secs: 20,
            trigger_words: ["weather", "forecast", "alert", "temperature", "snow"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            places: vec![
                KnownPlace::new("anchorage", 61.2181, -149.9003),
                KnownPlace::new("fairbanks", 64.8378, -147.7164),
                KnownPlace::new("juneau", 58.3019, -134.4197),
            ],
        }
    }
}

/// Storage backend for the interaction journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalBackend {
    /// One JSON object per line, appended
    Jsonl,
    /// Embedded SQLite table
    Sqlite,
}

/// Interaction journal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JournalConfig {
    pub backend: JournalBackend,
    pub path: PathBuf,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            backend: JournalBackend::Jsonl,
            path: PathBuf::from("logs.jsonl"),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    server: Option<ServerConfig>,
    corpus: Option<CorpusConfig>,
    retrieval: Option<RetrievalConfig>,
    safety: Option<SafetyConfig>,
    weather: Option<WeatherConfig>,
    journal: Option<JournalConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
            server: ServerConfig::default(),
            corpus: CorpusConfig::default(),
            retrieval: RetrievalConfig::default(),
            safety: SafetyConfig::default(),
            weather: WeatherConfig::default(),
            journal: JournalConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the YAML file and environment variables.
    ///
    /// `config_file` takes precedence over `SNOWDESK_CONFIG`; when neither is
    /// set, `snowdesk.yaml` in the working directory is merged if present.
    ///
    /// Environment variables:
    /// - `SNOWDESK_CONFIG`: Path to config file
    /// - `SNOWDESK_CORPUS_ROOT`: Document root directory
    /// - `SNOWDESK_COLLECTION`: Collection inside the root
    /// - `SNOWDESK_HOST` / `PORT`: Listener address
    /// - `SNOWDESK_JOURNAL`: Journal file path
    /// - `SNOWDESK_WEATHER_URL`: Forecast service base URL
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use snowdesk_core::config::AppConfig;
    ///
    /// let config = AppConfig::load(None).expect("Failed to load config");
    /// println!("Listening on {}", config.bind_addr());
    /// ```
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        Self::from_lookup(config_file, |key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`], with environment access supplied by `lookup`.
    pub fn from_lookup<F>(config_file: Option<&Path>, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let explicit = config_file
            .map(Path::to_path_buf)
            .or_else(|| lookup("SNOWDESK_CONFIG").map(PathBuf::from));

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file does not exist: {:?}",
                        path
                    )));
                }
                config = config.merge_yaml(&path)?;
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    config = config.merge_yaml(&path)?;
                }
            }
        }

        // Environment variables override YAML config
        if let Some(root) = lookup("SNOWDESK_CORPUS_ROOT") {
            config.corpus.root = Some(PathBuf::from(root));
        }

        if let Some(collection) = lookup("SNOWDESK_COLLECTION") {
            config.corpus.collection = collection;
        }

        if let Some(host) = lookup("SNOWDESK_HOST") {
            config.server.host = host;
        }

        if let Some(port) = lookup("PORT") {
            config.server.port = port
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid PORT {:?}: {}", port, e)))?;
        }

        if let Some(journal) = lookup("SNOWDESK_JOURNAL") {
            config.journal.path = PathBuf::from(journal);
        }

        if let Some(url) = lookup("SNOWDESK_WEATHER_URL") {
            config.weather.base_url = url;
        }

        if let Some(level) = lookup("RUST_LOG") {
            config.log_level = Some(level);
        }

        if lookup("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|e| {
                AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?
        };

        let mut result = self.clone();
        result.config_file = Some(path.to_path_buf());

        if let Some(server) = config_file.server {
            result.server = server;
        }
        if let Some(corpus) = config_file.corpus {
            result.corpus = corpus;
        }
        if let Some(retrieval) = config_file.retrieval {
            result.retrieval = retrieval;
        }
        if let Some(safety) = config_file.safety {
            result.safety = safety;
        }
        if let Some(weather) = config_file.weather {
            result.weather = weather;
        }
        if let Some(journal) = config_file.journal {
            result.journal = journal;
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    pub fn with_overrides(
        mut self,
        corpus_root: Option<PathBuf>,
        collection: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(root) = corpus_root {
            self.corpus.root = Some(root);
        }

        if let Some(collection) = collection {
            self.corpus.collection = collection;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Validate configuration values that the components rely on.
    pub fn validate(&self) -> AppResult<()> {
        let corpus = &self.corpus;
        if corpus.chunk_size == 0 {
            return Err(AppError::Config("chunkSize must be positive".to_string()));
        }
        if corpus.chunk_overlap >= corpus.chunk_size {
            return Err(AppError::Config(format!(
                "chunkOverlap ({}) must be smaller than chunkSize ({})",
                corpus.chunk_overlap, corpus.chunk_size
            )));
        }

        if self.retrieval.top_k == 0 {
            return Err(AppError::Config("topK must be positive".to_string()));
        }

        let weather = &self.weather;
        if !KNOWN_WEATHER_PROVIDERS.contains(&weather.provider.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Unknown weather provider: {}. Supported: {}",
                weather.provider,
                KNOWN_WEATHER_PROVIDERS.join(", ")
            )));
        }
        if weather.timeout_secs == 0 {
            return Err(AppError::Config("timeoutSecs must be positive".to_string()));
        }

        for place in &weather.places {
            if place.name.trim().is_empty() {
                return Err(AppError::Config("Known place with empty name".to_string()));
            }
            if !(-90.0..=90.0).contains(&place.latitude)
                || !(-180.0..=180.0).contains(&place.longitude)
            {
                return Err(AppError::Config(format!(
                    "Known place '{}' has out-of-range coordinates ({}, {})",
                    place.name, place.latitude, place.longitude
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.corpus.chunk_size, 900);
        assert_eq!(config.corpus.chunk_overlap, 150);
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.safety.blocked_terms, vec!["hack", "weapon", "bomb"]);
        assert_eq!(config.weather.timeout_secs, 20);
        assert_eq!(config.weather.places[0].name, "anchorage");
        assert_eq!(config.journal.backend, JournalBackend::Jsonl);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(
            None,
            env(&[
                ("SNOWDESK_CORPUS_ROOT", "/srv/docs"),
                ("SNOWDESK_COLLECTION", "faq"),
                ("PORT", "9090"),
                ("SNOWDESK_WEATHER_URL", "http://127.0.0.1:1"),
                ("NO_COLOR", "1"),
            ]),
        )
        .unwrap();

        assert_eq!(config.corpus.root, Some(PathBuf::from("/srv/docs")));
        assert_eq!(config.corpus.collection, "faq");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.weather.base_url, "http://127.0.0.1:1");
        assert!(config.no_color);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = AppConfig::from_lookup(None, env(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_yaml_merge_keeps_section_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("snowdesk.yaml");
        std::fs::write(
            &path,
            r#"
corpus:
  root: ./docs
  chunkSize: 400
retrieval:
  topK: 3
weather:
  places:
    - { name: nome, latitude: 64.5011, longitude: -165.4064 }
journal:
  backend: sqlite
  path: journal.sqlite
logging:
  level: debug
  color: false
"#,
        )
        .unwrap();

        let config = AppConfig::from_lookup(Some(&path), env(&[])).unwrap();
        assert_eq!(config.corpus.chunk_size, 400);
        assert_eq!(config.corpus.chunk_overlap, 150);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.weather.places.len(), 1);
        assert_eq!(config.weather.timeout_secs, 20);
        assert_eq!(config.journal.backend, JournalBackend::Sqlite);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.no_color);
        assert_eq!(config.config_file, Some(path));
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let result = AppConfig::from_lookup(
            None,
            env(&[("SNOWDESK_CONFIG", "/definitely/not/here.yaml")]),
        );
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default().with_overrides(
            Some(PathBuf::from("docs")),
            Some("faq".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(config.corpus.root, Some(PathBuf::from("docs")));
        assert_eq!(config.corpus.collection, "faq");
        assert!(config.verbose);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_validate_rejects_overlap_not_below_size() {
        let mut config = AppConfig::default();
        config.corpus.chunk_size = 100;
        config.corpus.chunk_overlap = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let mut config = AppConfig::default();
        config.weather.provider = "accuweather".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_coordinates() {
        let mut config = AppConfig::default();
        config.weather.places.push(KnownPlace::new("nowhere", 123.0, 0.0));
        assert!(config.validate().is_err());
    }
}
