//! Supabase-style REST client for the `document_chunks` table.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use docsync_core::ChunkRecord;

use crate::error::StoreError;

/// Maximum rows per insert request.
pub const INSERT_BATCH_SIZE: usize = 100;

const TABLE: &str = "document_chunks";
const MATCH_RPC: &str = "match_document_chunks";

/// A scored similarity-search result.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkMatch {
    pub document_id: String,
    pub document_title: String,
    pub chunk_index: usize,
    pub content: String,
    pub similarity: f32,
}

/// Trait for the chunk-record datastore.
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Delete every record belonging to a document.
    async fn delete_document(&self, document_id: &str) -> Result<(), StoreError>;

    /// Insert an ordered batch of records, slicing into groups of at most
    /// [`INSERT_BATCH_SIZE`] rows per request.
    async fn insert_chunks(&self, records: &[ChunkRecord]) -> Result<(), StoreError>;

    /// Similarity search via the datastore RPC, most similar first.
    async fn search_similar(
        &self,
        embedding: &[f32],
        top_k: usize,
        document_id: Option<&str>,
    ) -> Result<Vec<ChunkMatch>, StoreError>;
}

/// Chunk store backed by the datastore's REST interface.
pub struct RestChunkStore {
    client: Client,
    base_url: String,
    service_key: String,
}

impl RestChunkStore {
    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}

#[derive(Serialize)]
struct MatchRequest<'a> {
    query_embedding: &'a [f32],
    match_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter_document_id: Option<&'a str>,
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Api(format!("{status}: {body}")))
}

#[async_trait]
impl ChunkStore for RestChunkStore {
    async fn delete_document(&self, document_id: &str) -> Result<(), StoreError> {
        let response = self
            .authed(self.client.delete(self.table_url()))
            .query(&[("document_id", format!("eq.{document_id}"))])
            .send()
            .await?;
        check(response).await?;
        tracing::debug!(document = document_id, "deleted existing chunks");
        Ok(())
    }

    async fn insert_chunks(&self, records: &[ChunkRecord]) -> Result<(), StoreError> {
        for batch in records.chunks(INSERT_BATCH_SIZE) {
            let response = self
                .authed(self.client.post(self.table_url()))
                .header("Prefer", "return=minimal")
                .json(batch)
                .send()
                .await?;
            check(response).await?;
        }
        Ok(())
    }

    async fn search_similar(
        &self,
        embedding: &[f32],
        top_k: usize,
        document_id: Option<&str>,
    ) -> Result<Vec<ChunkMatch>, StoreError> {
        let request = MatchRequest {
            query_embedding: embedding,
            match_count: top_k,
            filter_document_id: document_id,
        };
        let response = self
            .authed(
                self.client
                    .post(format!("{}/rest/v1/rpc/{}", self.base_url, MATCH_RPC)),
            )
            .json(&request)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}
