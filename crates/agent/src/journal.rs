//! Interaction journal.
//!
//! Every answered (or refused) question is recorded as one
//! [`InteractionRecord`]. Records are only ever appended; nothing rewrites
//! earlier entries, so concurrent requests cannot clobber each other.

use crate::types::ToolTag;
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use snowdesk_core::config::JournalBackend;
use snowdesk_core::{AppError, AppResult};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// One question/answer exchange as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// ISO-8601 UTC timestamp
    pub timestamp: String,

    pub prompt: String,

    pub response: String,

    /// Tool tags in invocation order
    pub tools_used: Vec<String>,
}

impl InteractionRecord {
    /// Record stamped with the current UTC time.
    pub fn now(prompt: &str, response: &str, tools: &[ToolTag]) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            prompt: prompt.to_string(),
            response: response.to_string(),
            tools_used: tools.iter().map(|t| t.as_str().to_string()).collect(),
        }
    }
}

/// Append-only storage for interaction records.
pub trait InteractionJournal: Send + Sync {
    /// Persist one record after all previously appended ones.
    fn append(&self, record: &InteractionRecord) -> AppResult<()>;

    /// The last `limit` records, oldest first.
    fn recent(&self, limit: usize) -> AppResult<Vec<InteractionRecord>>;
}

/// Open the journal selected in configuration.
pub fn open_journal(backend: JournalBackend, path: &Path) -> AppResult<Arc<dyn InteractionJournal>> {
    match backend {
        JournalBackend::Jsonl => Ok(Arc::new(JsonlJournal::open(path)?)),
        JournalBackend::Sqlite => Ok(Arc::new(SqliteJournal::open(path)?)),
    }
}

fn ensure_parent(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Journal(format!("Failed to create journal directory: {}", e))
            })?;
        }
    }
    Ok(())
}

/// JSON Lines journal: one record per line, appended.
///
/// Each record is serialized up front and written with a single `write_all`
/// while holding the file lock, then synced.
pub struct JsonlJournal {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlJournal {
    pub fn open(path: &Path) -> AppResult<Self> {
        ensure_parent(path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AppError::Journal(format!("Failed to open {:?}: {}", path, e)))?;

        tracing::debug!("Opened JSONL journal at {:?}", path);
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }
}

impl InteractionJournal for JsonlJournal {
    fn append(&self, record: &InteractionRecord) -> AppResult<()> {
        let mut line = serde_json::to_string(record)
            .map_err(|e| AppError::Journal(format!("Failed to serialize record: {}", e)))?;
        line.push('\n');

        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(line.as_bytes())
            .map_err(|e| AppError::Journal(format!("Failed to write to {:?}: {}", self.path, e)))?;
        file.sync_data()
            .map_err(|e| AppError::Journal(format!("Failed to sync {:?}: {}", self.path, e)))?;

        Ok(())
    }

    fn recent(&self, limit: usize) -> AppResult<Vec<InteractionRecord>> {
        // Hold the lock so a half-written line is never read.
        let _guard = self.file.lock().unwrap_or_else(PoisonError::into_inner);

        let file = File::open(&self.path)
            .map_err(|e| AppError::Journal(format!("Failed to open {:?}: {}", self.path, e)))?;
        let mut records = Vec::new();

        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                AppError::Journal(format!("Failed to read line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<InteractionRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(
                    "Skipping malformed journal line {} in {:?}: {}",
                    line_num + 1,
                    self.path,
                    e
                ),
            }
        }

        let skip = records.len().saturating_sub(limit);
        Ok(records.split_off(skip))
    }
}

/// SQLite journal: one row per record in the `interactions` table.
pub struct SqliteJournal {
    conn: Mutex<Connection>,
}

impl SqliteJournal {
    pub fn open(path: &Path) -> AppResult<Self> {
        ensure_parent(path)?;

        let conn = Connection::open(path)
            .map_err(|e| AppError::Journal(format!("Failed to open SQLite journal: {}", e)))?;
        Self::init(conn)
    }

    /// In-memory database, mostly for tests.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Journal(format!("Failed to open SQLite journal: {}", e)))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> AppResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS interactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                prompt TEXT NOT NULL,
                response TEXT NOT NULL,
                tools_used TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| AppError::Journal(format!("Failed to create tables: {}", e)))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl InteractionJournal for SqliteJournal {
    fn append(&self, record: &InteractionRecord) -> AppResult<()> {
        let tools_json = serde_json::to_string(&record.tools_used)
            .map_err(|e| AppError::Journal(format!("Failed to serialize tools: {}", e)))?;

        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        conn.execute(
            "INSERT INTO interactions (timestamp, prompt, response, tools_used)
             VALUES (?1, ?2, ?3, ?4)",
            params![record.timestamp, record.prompt, record.response, tools_json],
        )
        .map_err(|e| AppError::Journal(format!("Failed to insert record: {}", e)))?;

        Ok(())
    }

    fn recent(&self, limit: usize) -> AppResult<Vec<InteractionRecord>> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let mut stmt = conn
            .prepare(
                "SELECT timestamp, prompt, response, tools_used FROM interactions
                 ORDER BY id DESC LIMIT ?1",
            )
            .map_err(|e| AppError::Journal(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })
            .map_err(|e| AppError::Journal(format!("Failed to query records: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            let (timestamp, prompt, response, tools_json) =
                row.map_err(|e| AppError::Journal(format!("Failed to read record: {}", e)))?;
            let tools_used: Vec<String> = serde_json::from_str(&tools_json)?;
            records.push(InteractionRecord {
                timestamp,
                prompt,
                response,
                tools_used,
            });
        }

        records.reverse();
        Ok(records)
    }
}

/// Journal kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    records: Mutex<Vec<InteractionRecord>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record appended so far.
    pub fn records(&self) -> Vec<InteractionRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl InteractionJournal for MemoryJournal {
    fn append(&self, record: &InteractionRecord) -> AppResult<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn recent(&self, limit: usize) -> AppResult<Vec<InteractionRecord>> {
        let records = self.records();
        let skip = records.len().saturating_sub(limit);
        Ok(records[skip..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(prompt: &str, tools: &[ToolTag]) -> InteractionRecord {
        InteractionRecord::now(prompt, &format!("answer to {}", prompt), tools)
    }

    #[test]
    fn test_record_shape() {
        let record = record("weather in anchorage", &[ToolTag::Rag, ToolTag::WeatherApi]);
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();

        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4);
        for key in ["timestamp", "prompt", "response", "tools_used"] {
            assert!(keys.contains(&key), "missing {}", key);
        }
        assert_eq!(json["tools_used"], serde_json::json!(["rag", "weather_api"]));

        let parsed = chrono::DateTime::parse_from_rfc3339(&record.timestamp).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert!(record.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_jsonl_appends_one_line_per_record() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs").join("journal.jsonl");
        let journal = JsonlJournal::open(&path).unwrap();

        journal.append(&record("first", &[ToolTag::Rag])).unwrap();
        journal.append(&record("second", &[ToolTag::Blocked])).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);

        let records = journal.recent(10).unwrap();
        let prompts: Vec<&str> = records.iter().map(|r| r.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["first", "second"]);
        assert_eq!(records[1].tools_used, vec!["blocked"]);
    }

    #[test]
    fn test_jsonl_reopen_keeps_existing_records() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("journal.jsonl");

        JsonlJournal::open(&path)
            .unwrap()
            .append(&record("before restart", &[ToolTag::Rag]))
            .unwrap();

        let journal = JsonlJournal::open(&path).unwrap();
        journal.append(&record("after restart", &[ToolTag::Rag])).unwrap();

        assert_eq!(journal.recent(10).unwrap().len(), 2);
        assert_eq!(journal.recent(1).unwrap()[0].prompt, "after restart");
    }

    #[test]
    fn test_jsonl_skips_malformed_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("journal.jsonl");
        std::fs::write(&path, "{\"truncated\": \n").unwrap();

        let journal = JsonlJournal::open(&path).unwrap();
        journal.append(&record("valid", &[ToolTag::Rag])).unwrap();

        let records = journal.recent(10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].prompt, "valid");
    }

    #[test]
    fn test_jsonl_concurrent_appends_stay_well_formed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("journal.jsonl");
        let journal = Arc::new(JsonlJournal::open(&path).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|thread| {
                let journal = Arc::clone(&journal);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        let prompt = format!("thread {} question {} {}", thread, i, "x".repeat(512));
                        journal.append(&record(&prompt, &[ToolTag::Rag])).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 200);
        for line in lines {
            serde_json::from_str::<InteractionRecord>(line).unwrap();
        }
    }

    #[test]
    fn test_sqlite_append_and_recent() {
        let journal = SqliteJournal::open_in_memory().unwrap();
        for prompt in ["one", "two", "three"] {
            journal.append(&record(prompt, &[ToolTag::Rag, ToolTag::WeatherApi])).unwrap();
        }

        let records = journal.recent(2).unwrap();
        let prompts: Vec<&str> = records.iter().map(|r| r.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["two", "three"]);
        assert_eq!(records[0].tools_used, vec!["rag", "weather_api"]);
    }

    #[test]
    fn test_sqlite_file_journal_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("journal.sqlite");

        open_journal(JournalBackend::Sqlite, &path)
            .unwrap()
            .append(&record("persisted", &[ToolTag::Blocked]))
            .unwrap();

        let reopened = open_journal(JournalBackend::Sqlite, &path).unwrap();
        assert_eq!(reopened.recent(5).unwrap()[0].prompt, "persisted");
    }

    #[test]
    fn test_memory_journal_recent() {
        let journal = MemoryJournal::new();
        journal.append(&record("a", &[ToolTag::Rag])).unwrap();
        journal.append(&record("b", &[ToolTag::Rag])).unwrap();

        assert_eq!(journal.recent(1).unwrap()[0].prompt, "b");
        assert_eq!(journal.recent(0).unwrap().len(), 0);
        assert_eq!(journal.records().len(), 2);
    }
}
