//! Corpus management and lexical retrieval.
//!
//! Documents from a [`DocumentSource`] are cut into overlapping character
//! windows by the [`chunker`], held in memory by a [`CorpusIndex`], and scored
//! against questions by token overlap in [`search`].

pub mod chunker;
pub mod index;
pub mod search;
pub mod sources;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use chunker::chunk_text;
pub use index::{CorpusIndex, CorpusSnapshot};
pub use search::retrieve;
pub use sources::{DirectorySource, DocumentSource, MemorySource};
pub use types::{CorpusStats, IndexedChunk, ScoredChunk};
