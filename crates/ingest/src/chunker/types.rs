//! Chunk configuration and output types.

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine. All sizes are in characters
/// (Unicode scalar values), not bytes.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum characters per chunk (default: 2000).
    pub max_chars: usize,
    /// Characters shared between consecutive hard-split windows (default: 200).
    /// Must be smaller than `max_chars`; zero disables overlap.
    pub overlap_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chars: 2000,
            overlap_chars: 200,
        }
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A bounded slice of a document's text, tagged with its position.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// 0-based index within the document.
    pub index: usize,
    /// The chunk text content (trimmed, non-empty).
    pub content: String,
}
