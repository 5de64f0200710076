//! Text chunking with configurable size and overlap.

use snowdesk_core::{AppError, AppResult};

/// Chunk text into overlapping windows of `chunk_size` characters.
///
/// Windows start at character offsets `0, step, 2 * step, ...` where
/// `step = chunk_size - overlap`, and the last window is clipped at the end
/// of the text. Offsets count characters, not bytes, so multi-byte text is
/// never split inside a code point.
///
/// Returns an error when `overlap >= chunk_size`, since the window would
/// never advance.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> AppResult<Vec<&str>> {
    if overlap >= chunk_size {
        return Err(AppError::Knowledge(format!(
            "chunk overlap ({}) must be smaller than chunk size ({})",
            overlap, chunk_size
        )));
    }

    let step = chunk_size - overlap;

    // Byte offset of every character start, followed by the end of the text.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = boundaries.len() - 1;

    let mut chunks = Vec::with_capacity(char_len / step + 1);
    let mut start = 0;

    while start < char_len {
        let end = (start + chunk_size).min(char_len);
        chunks.push(&text[boundaries[start]..boundaries[end]]);
        start += step;
    }

    tracing::trace!(
        "Chunked {} chars into {} chunks (size: {}, overlap: {})",
        char_len,
        chunks.len(),
        chunk_size,
        overlap
    );

    Ok(chunks)
}
