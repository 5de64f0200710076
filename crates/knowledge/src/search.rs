//! Lexical overlap retrieval.
//!
//! A chunk's score is the number of distinct query tokens that occur in it as
//! case-insensitive substrings. Repeating a word in the query does not count
//! twice.

use crate::index::CorpusSnapshot;
use crate::types::ScoredChunk;
use std::collections::HashSet;

/// Lowercase `query`, split it on whitespace and drop repeated tokens.
///
/// First-occurrence order is kept so logs read naturally.
pub fn query_tokens(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let mut seen = HashSet::new();

    lowered
        .split_whitespace()
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

/// Count how many of `tokens` occur in the (already lowercased) chunk text.
pub fn score_chunk(tokens: &[String], lowered_chunk: &str) -> usize {
    tokens
        .iter()
        .filter(|token| lowered_chunk.contains(token.as_str()))
        .count()
}

/// Return at most `top_k` chunks with a positive score, best first.
///
/// Equal scores keep index order, so results are deterministic for a given
/// snapshot and query.
pub fn retrieve(snapshot: &CorpusSnapshot, query: &str, top_k: usize) -> Vec<ScoredChunk> {
    let tokens = query_tokens(query);
    if tokens.is_empty() || top_k == 0 || snapshot.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, usize)> = snapshot
        .chunks()
        .iter()
        .enumerate()
        .filter_map(|(position, chunk)| {
            let score = score_chunk(&tokens, chunk.lowered());
            (score > 0).then_some((position, score))
        })
        .collect();

    // Stable sort: ties stay in index order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(top_k);

    tracing::debug!(
        "Retrieved {} chunks for {} query tokens",
        scored.len(),
        tokens.len()
    );

    let chunks = snapshot.chunks();
    scored
        .into_iter()
        .map(|(position, score)| ScoredChunk {
            position,
            text: chunks[position].text().to_string(),
            score,
        })
        .collect()
}
