//! The chunk splitting algorithm.
//!
//! Paragraphs are folded into an accumulator buffer until the next paragraph
//! would push the buffer past `max_chars`. A full buffer is flushed as a chunk
//! and keeps its last `overlap_chars` characters as a seed; the paragraph that
//! forced the flush is then placed against `max_chars` on its own, never
//! re-tested against the seeded buffer. A paragraph that cannot fit in any
//! single chunk is hard-split into fixed-stride windows that bypass the buffer.

use super::types::{Chunk, ChunkConfig};

/// Split `text` into ordered, bounded, overlapping chunks.
///
/// Accepts either line-ending convention and any amount of surrounding
/// whitespace; input that trims to nothing yields an empty vector. The split
/// is pure and deterministic, and every returned chunk is non-empty after
/// trimming with at most `max_chars` characters.
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<Chunk> {
    split_text(text, config)
        .into_iter()
        .enumerate()
        .map(|(index, content)| Chunk { index, content })
        .collect()
}

fn split_text(text: &str, config: &ChunkConfig) -> Vec<String> {
    debug_assert!(
        config.overlap_chars < config.max_chars,
        "overlap_chars must be smaller than max_chars"
    );

    let cleaned = text.replace("\r\n", "\n");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Vec::new();
    }

    // Runs of blank lines all collapse to one paragraph boundary: the empty
    // fragments a longer run produces are trimmed away here.
    let paragraphs = cleaned
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let accumulator = paragraphs.fold(Accumulator::default(), |accumulator, paragraph| {
        place_paragraph(accumulator, paragraph, config)
    });

    accumulator.finish(config)
}

// ── Accumulator ─────────────────────────────────────────────────────────────

/// Fold state: chunks emitted so far plus the paragraph buffer being grown.
#[derive(Debug, Default)]
struct Accumulator {
    buffer: String,
    chunks: Vec<String>,
}

impl Accumulator {
    /// Emit the trimmed buffer as a chunk, then retain the buffer's last
    /// `overlap_chars` characters as the seed for the next buffer (or clear
    /// it when the buffer is no longer than the overlap).
    fn flush(mut self, overlap_chars: usize) -> Self {
        let content = self.buffer.trim();
        if !content.is_empty() {
            self.chunks.push(content.to_string());
        }
        if overlap_chars > 0 && char_len(&self.buffer) > overlap_chars {
            let seed = char_tail(&self.buffer, overlap_chars).to_string();
            self.buffer = seed;
        } else {
            self.buffer.clear();
        }
        self
    }

    /// Final flush at end of input; the leftover seed is discarded.
    fn finish(mut self, config: &ChunkConfig) -> Vec<String> {
        if !self.buffer.is_empty() {
            self = self.flush(config.overlap_chars);
        }
        self.chunks
    }
}

/// Reducer step: place one paragraph, returning the updated accumulator.
fn place_paragraph(
    mut accumulator: Accumulator,
    paragraph: &str,
    config: &ChunkConfig,
) -> Accumulator {
    // The joined length counts the two-character blank-line separator even
    // against an empty buffer.
    let joined = char_len(&accumulator.buffer) + char_len(paragraph) + 2;
    if joined <= config.max_chars {
        if accumulator.buffer.is_empty() {
            accumulator.buffer.push_str(paragraph);
        } else {
            accumulator.buffer.push_str("\n\n");
            accumulator.buffer.push_str(paragraph);
        }
        return accumulator;
    }

    if !accumulator.buffer.is_empty() {
        accumulator = accumulator.flush(config.overlap_chars);
    }

    // The paragraph is tested against `max_chars` alone. Any overlap seed the
    // flush left behind is overwritten here, not appended to.
    if char_len(paragraph) <= config.max_chars {
        accumulator.buffer = paragraph.to_string();
        return accumulator;
    }

    hard_split(paragraph, config, &mut accumulator.chunks);
    accumulator.buffer.clear();
    accumulator
}

/// Fixed-stride windowing for a paragraph that cannot fit in one chunk.
/// Windows start at multiples of `max_chars - overlap_chars` and are emitted
/// immediately, bypassing the buffer.
fn hard_split(paragraph: &str, config: &ChunkConfig, out: &mut Vec<String>) {
    let stride = (config.max_chars - config.overlap_chars).max(1);
    let total = char_len(paragraph);
    let mut start = 0;
    while start < total {
        let window = char_window(paragraph, start, config.max_chars).trim();
        if !window.is_empty() {
            out.push(window.to_string());
        }
        start += stride;
    }
}

// ── Character-indexed helpers ───────────────────────────────────────────────

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `n`-th character, saturating to the end of the string.
fn byte_of_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(offset, _)| offset)
}

/// The slice of up to `width` characters starting at character `start`.
fn char_window(s: &str, start: usize, width: usize) -> &str {
    let from = byte_of_char(s, start);
    let to = byte_of_char(s, start.saturating_add(width));
    &s[from..to]
}

/// The last `n` characters of `s` (all of `s` when it is shorter).
fn char_tail(s: &str, n: usize) -> &str {
    let total = char_len(s);
    if n >= total {
        return s;
    }
    &s[byte_of_char(s, total - n)..]
}
