//! REST datastore client for chunk records.

pub mod error;
pub mod rest;

pub use error::StoreError;
pub use rest::{ChunkMatch, ChunkStore, RestChunkStore, INSERT_BATCH_SIZE};
