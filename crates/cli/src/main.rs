mod cli;
mod sync;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use docsync_connector::DriveSource;
use docsync_core::config::{load_dotenv, Config};
use docsync_ingest::{ChunkConfig, HttpEmbedder};
use docsync_storage::RestChunkStore;

use crate::cli::CliArgs;
use crate::sync::{run_sync, SyncOptions};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    if let Some(ref since) = args.since {
        chrono::DateTime::parse_from_rfc3339(since)
            .with_context(|| format!("--since must be an RFC3339 timestamp, got '{since}'"))?;
    }

    load_dotenv();
    let config = Config::from_env();
    config.log_summary();

    let (Some(datastore_url), Some(service_key)) = (
        config.datastore.url.clone(),
        config.datastore.service_key.clone(),
    ) else {
        bail!("missing DATASTORE_URL or DATASTORE_SERVICE_KEY");
    };

    let source = DriveSource::from_credentials_file(config.source.api_url.clone(), &args.creds)
        .context("failed to load source credentials")?;
    let embedder = HttpEmbedder::new(config.embeddings.url.clone());
    let store = RestChunkStore::new(datastore_url, service_key);

    let options = SyncOptions {
        folder_id: args.folder_id,
        since: args.since,
        limit: args.limit,
        replace: args.replace,
        dry_run: args.dry_run,
    };

    let report = run_sync(&source, &embedder, &store, &ChunkConfig::default(), &options).await?;

    info!(
        listed = report.documents_listed,
        synced = report.documents_synced,
        skipped = report.documents_skipped,
        chunks = report.chunks_written,
        dry_run = options.dry_run,
        "sync complete"
    );
    Ok(())
}
