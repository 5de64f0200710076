//! Document sources for building the corpus.
//!
//! A source lists the raw text documents of a named collection. The index only
//! keeps the chunks; documents are dropped once chunked.

use async_trait::async_trait;
use snowdesk_core::{AppError, AppResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Anything that can list the raw text documents of a collection.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// List every non-blank document in `collection`.
    async fn list_documents(&self, collection: &str) -> AppResult<Vec<String>>;
}

/// Documents stored as files under `<root>/<collection>`.
///
/// Files are visited in file-name order so rebuilds are reproducible.
/// Unreadable or non-UTF-8 files are skipped with a warning, and blank files
/// are ignored.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory that holds `collection`. An empty collection means the root.
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        let collection = collection.trim_matches('/');
        if collection.is_empty() {
            self.root.clone()
        } else {
            self.root.join(collection)
        }
    }

    fn read_collection(dir: &Path) -> AppResult<Vec<String>> {
        if !dir.is_dir() {
            return Err(AppError::Knowledge(format!(
                "Collection directory not found: {:?}",
                dir
            )));
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error walking {:?}: {}", dir, e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            match std::fs::read_to_string(entry.path()) {
                Ok(text) if !text.trim().is_empty() => documents.push(text),
                Ok(_) => tracing::debug!("Skipping blank document {:?}", entry.path()),
                Err(e) => tracing::warn!("Error reading document {:?}: {}", entry.path(), e),
            }
        }

        Ok(documents)
    }
}

#[async_trait]
impl DocumentSource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    async fn list_documents(&self, collection: &str) -> AppResult<Vec<String>> {
        let dir = self.collection_dir(collection);
        tracing::debug!("Listing documents in {:?}", dir);

        tokio::task::spawn_blocking(move || Self::read_collection(&dir))
            .await
            .map_err(|e| AppError::Knowledge(format!("Document listing task failed: {}", e)))?
    }
}

/// A fixed set of documents, returned for every collection.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<String>,
}

impl MemorySource {
    pub fn new<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            documents: documents.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_documents(&self, _collection: &str) -> AppResult<Vec<String>> {
        Ok(self
            .documents
            .iter()
            .filter(|doc| !doc.trim().is_empty())
            .cloned()
            .collect())
    }
}
