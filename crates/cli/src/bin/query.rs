//! docsync-query: ad-hoc similarity search over synced chunks.
//!
//! Embeds the query string with the same embeddings service the sync pipeline
//! uses, then asks the datastore for the nearest chunks.

use anyhow::{bail, Context, Result};
use clap::Parser;

use docsync_core::config::{load_dotenv, Config};
use docsync_ingest::{Embedder, HttpEmbedder};
use docsync_storage::{ChunkStore, RestChunkStore};

/// Search synced chunks by semantic similarity.
#[derive(Parser, Debug)]
#[command(name = "docsync-query", version, about)]
struct QueryArgs {
    /// The search query.
    query: String,

    /// Number of matches to return.
    #[arg(long, default_value_t = 5)]
    top_k: usize,

    /// Restrict matches to one document.
    #[arg(long)]
    document_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = QueryArgs::parse();
    let query = args.query.trim();
    if query.is_empty() {
        bail!("query must not be empty");
    }

    load_dotenv();
    let config = Config::from_env();

    let (Some(datastore_url), Some(service_key)) = (
        config.datastore.url.clone(),
        config.datastore.service_key.clone(),
    ) else {
        bail!("missing DATASTORE_URL or DATASTORE_SERVICE_KEY");
    };

    let embedder = HttpEmbedder::new(config.embeddings.url.clone());
    let embedding = embedder
        .embed_batch(&[query])
        .await
        .context("failed to embed query")?
        .into_iter()
        .next()
        .context("embedding service returned no vector")?;

    let store = RestChunkStore::new(datastore_url, service_key);
    let matches = store
        .search_similar(&embedding, args.top_k, args.document_id.as_deref())
        .await
        .context("similarity search failed")?;

    if matches.is_empty() {
        println!("No matches.");
        return Ok(());
    }

    for (rank, found) in matches.iter().enumerate() {
        println!(
            "{:>2}. [{:.3}] {} · chunk {}",
            rank + 1,
            found.similarity,
            found.document_title,
            found.chunk_index
        );
        let snippet: String = found.content.chars().take(160).collect();
        println!("    {snippet}");
    }
    Ok(())
}
