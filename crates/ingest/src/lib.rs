pub mod chunker;
pub mod embedding;

pub use chunker::{chunk_text, Chunk, ChunkConfig};
pub use embedding::{Embedder, EmbeddingError, HttpEmbedder};
