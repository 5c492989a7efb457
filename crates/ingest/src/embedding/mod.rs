pub mod http;
pub mod traits;

pub use http::HttpEmbedder;
pub use traits::{Embedder, EmbeddingError};
