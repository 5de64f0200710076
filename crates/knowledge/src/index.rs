//! In-memory corpus index.
//!
//! The index is an immutable [`CorpusSnapshot`] behind an `Arc`. Readers take
//! a snapshot and work on it without holding any lock; a rebuild assembles a
//! complete new snapshot first and only then swaps the pointer, so no reader
//! ever observes a half-built corpus.

use crate::chunker::chunk_text;
use crate::search;
use crate::sources::DocumentSource;
use crate::types::{CorpusStats, IndexedChunk, ScoredChunk};
use snowdesk_core::{AppError, AppResult};
use std::sync::{Arc, PoisonError, RwLock};

/// An immutable, fully built set of chunks.
#[derive(Debug, Default)]
pub struct CorpusSnapshot {
    chunks: Vec<IndexedChunk>,
    docs_loaded: usize,
}

impl CorpusSnapshot {
    /// Chunk every document, preserving chunk order within a document and
    /// document order across the corpus.
    pub fn build<S: AsRef<str>>(
        documents: &[S],
        chunk_size: usize,
        overlap: usize,
    ) -> AppResult<Self> {
        let mut chunks = Vec::new();

        for document in documents {
            for piece in chunk_text(document.as_ref(), chunk_size, overlap)? {
                chunks.push(IndexedChunk::new(piece));
            }
        }

        Ok(Self {
            chunks,
            docs_loaded: documents.len(),
        })
    }

    pub fn chunks(&self) -> &[IndexedChunk] {
        &self.chunks
    }

    pub fn docs_loaded(&self) -> usize {
        self.docs_loaded
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            docs_loaded: self.docs_loaded,
            chunks: self.chunks.len(),
        }
    }

    /// Score this snapshot against `query`; see [`search::retrieve`].
    pub fn retrieve(&self, query: &str, top_k: usize) -> Vec<ScoredChunk> {
        search::retrieve(self, query, top_k)
    }
}

/// Process-wide corpus index with atomic wholesale replacement.
#[derive(Debug)]
pub struct CorpusIndex {
    current: RwLock<Arc<CorpusSnapshot>>,
    chunk_size: usize,
    overlap: usize,
}

impl CorpusIndex {
    /// Create an empty index that will chunk documents with the given window.
    pub fn new(chunk_size: usize, overlap: usize) -> AppResult<Self> {
        if overlap >= chunk_size {
            return Err(AppError::Knowledge(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                overlap, chunk_size
            )));
        }

        Ok(Self {
            current: RwLock::new(Arc::new(CorpusSnapshot::default())),
            chunk_size,
            overlap,
        })
    }

    /// Current snapshot. Cheap: clones an `Arc`.
    pub fn snapshot(&self) -> Arc<CorpusSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn stats(&self) -> CorpusStats {
        self.snapshot().stats()
    }

    /// Retrieve against the current snapshot.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Vec<ScoredChunk> {
        self.snapshot().retrieve(query, top_k)
    }

    /// Replace the index with one built from `documents`.
    pub fn rebuild<S: AsRef<str>>(&self, documents: &[S]) -> AppResult<CorpusStats> {
        let snapshot = Arc::new(CorpusSnapshot::build(
            documents,
            self.chunk_size,
            self.overlap,
        )?);
        let stats = snapshot.stats();

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = snapshot;

        tracing::info!("Docs loaded: {}", stats.docs_loaded);
        tracing::info!("Chunks created: {}", stats.chunks);

        Ok(stats)
    }

    /// Load `collection` from `source` and rebuild.
    ///
    /// An unreachable source is not an error: it is logged and the index
    /// becomes empty, so retrieval simply finds nothing.
    pub async fn load_from(
        &self,
        source: &dyn DocumentSource,
        collection: &str,
    ) -> AppResult<CorpusStats> {
        let documents = match source.list_documents(collection).await {
            Ok(documents) => documents,
            Err(e) => {
                tracing::warn!(
                    "Document source '{}' unavailable for collection '{}': {}",
                    source.name(),
                    collection,
                    e
                );
                Vec::new()
            }
        };

        self.rebuild(&documents)
    }
}
