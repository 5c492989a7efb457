//! The sequential sync pipeline: list → export → chunk → embed → upsert.

use anyhow::Result;
use serde_json::json;
use tracing::info;

use docsync_connector::DocumentSource;
use docsync_core::{ChunkRecord, Document};
use docsync_ingest::{chunk_text, ChunkConfig, Embedder};
use docsync_storage::ChunkStore;

/// Metadata tag recorded on every synced chunk.
const SOURCE_TAG: &str = "cloud_docs";

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub folder_id: String,
    pub since: Option<String>,
    pub limit: Option<usize>,
    pub replace: bool,
    pub dry_run: bool,
}

/// Counters for one sync pass. In dry-run mode `chunks_written` counts the
/// chunks that would have been written.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub documents_listed: usize,
    pub documents_synced: usize,
    pub documents_skipped: usize,
    pub chunks_written: usize,
}

/// Run one sync pass. Documents are processed one at a time; any collaborator
/// error aborts the run. A document whose export yields no chunks is skipped
/// and processing continues.
pub async fn run_sync(
    source: &dyn DocumentSource,
    embedder: &dyn Embedder,
    store: &dyn ChunkStore,
    chunk_config: &ChunkConfig,
    options: &SyncOptions,
) -> Result<SyncReport> {
    let documents = source
        .list_documents(&options.folder_id, options.since.as_deref(), options.limit)
        .await?;
    info!(count = documents.len(), "found documents");

    let mut report = SyncReport {
        documents_listed: documents.len(),
        ..Default::default()
    };

    for document in &documents {
        let text = source.export_text(&document.id).await?;
        let chunks = chunk_text(&text, chunk_config);

        if chunks.is_empty() {
            info!(document = %document.title, "skipping: no content");
            report.documents_skipped += 1;
            continue;
        }

        if options.dry_run {
            info!(document = %document.title, chunks = chunks.len(), "dry run");
            report.documents_synced += 1;
            report.chunks_written += chunks.len();
            continue;
        }

        // One embedding request covers the document's full chunk batch.
        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        let records: Vec<ChunkRecord> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| chunk_record(document, chunk.index, chunk.content, embedding))
            .collect();

        if options.replace {
            store.delete_document(&document.id).await?;
        }
        store.insert_chunks(&records).await?;

        info!(document = %document.title, chunks = records.len(), "synced");
        report.documents_synced += 1;
        report.chunks_written += records.len();
    }

    Ok(report)
}

fn chunk_record(
    document: &Document,
    index: usize,
    content: String,
    embedding: Vec<f32>,
) -> ChunkRecord {
    ChunkRecord {
        document_id: document.id.clone(),
        document_title: document.title.clone(),
        chunk_index: index,
        content,
        embedding,
        metadata: json!({
            "source": SOURCE_TAG,
            "doc_id": document.id,
            "doc_modified": document.modified_time,
        }),
    }
}
