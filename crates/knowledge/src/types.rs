//! Knowledge system type definitions.

use serde::{Deserialize, Serialize};

/// A chunk held by the corpus index.
///
/// The lowercased form is computed once at build time so that scoring never
/// re-lowercases the corpus per query.
#[derive(Debug, Clone)]
pub struct IndexedChunk {
    text: String,
    lowered: String,
}

impl IndexedChunk {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lowered = text.to_lowercase();
        Self { text, lowered }
    }

    /// Original chunk text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn lowered(&self) -> &str {
        &self.lowered
    }
}

/// A retrieved chunk together with its lexical overlap score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// Position of the chunk in the index it was retrieved from
    pub position: usize,

    /// Chunk text
    pub text: String,

    /// Number of distinct query tokens found in the chunk
    pub score: usize,
}

/// Counts reported by `/health` and after every rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Documents that contributed chunks
    pub docs_loaded: usize,

    /// Chunks in the index
    pub chunks: usize,
}
