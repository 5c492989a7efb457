//! Paragraph-aware chunking engine.
//!
//! Splits a document's plain-text body into overlapping chunks sized for
//! embedding: paragraphs are accumulated greedily up to the size limit, and a
//! paragraph too large for any single chunk is hard-split into fixed-stride
//! windows sharing `overlap_chars` characters with their neighbour.

mod engine;
mod types;

pub use engine::chunk_text;
pub use types::{Chunk, ChunkConfig};
