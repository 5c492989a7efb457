use serde::{Deserialize, Serialize};

/// A document as listed by the cloud source. The plain-text body is exported
/// separately and only lives in memory for the duration of one sync pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// External identifier assigned by the document source.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Last-modified timestamp (RFC3339), when the source reports one.
    #[serde(default)]
    pub modified_time: Option<String>,
}

/// Persisted form of a chunk: one row in the datastore.
///
/// `chunk_index` is unique per `document_id`; a re-sync in replace mode deletes
/// every row for the document before inserting the new set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub document_id: String,
    pub document_title: String,
    pub chunk_index: usize,
    pub content: String,
    /// Embedding vector, dimensionality fixed by the embedding provider.
    pub embedding: Vec<f32>,
    /// Free-form metadata: source tag, document id, document modified-time.
    pub metadata: serde_json::Value,
}
