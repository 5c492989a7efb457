use std::path::PathBuf;

use clap::Parser;

/// Sync a cloud document folder into the vector datastore.
///
/// Lists documents in the folder, exports each one as plain text, splits the
/// text into overlapping chunks, embeds the chunks, and upserts the records.
#[derive(Parser, Debug)]
#[command(name = "docsync", version, about)]
pub struct CliArgs {
    /// Folder to sync documents from.
    #[arg(long)]
    pub folder_id: String,

    /// Path to the source credential file.
    #[arg(long)]
    pub creds: PathBuf,

    /// Delete a document's existing chunks before inserting the new set.
    #[arg(long)]
    pub replace: bool,

    /// Only include documents modified after this RFC3339 timestamp.
    #[arg(long)]
    pub since: Option<String>,

    /// Limit the number of documents processed.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Chunk only: report chunk counts without embedding or persisting.
    #[arg(long)]
    pub dry_run: bool,
}
