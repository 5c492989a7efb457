//! Document listing and plain-text export against the Drive-style REST API.

use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use docsync_core::Document;

const DOCUMENT_MIME_TYPE: &str = "application/vnd.google-apps.document";
const LIST_PAGE_SIZE: usize = 200;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("credentials error: {0}")]
    Credentials(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for document sources the sync pipeline can read from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// List documents in a folder, newest API order, optionally bounded by a
    /// modified-time lower bound and a result-count limit.
    async fn list_documents(
        &self,
        folder_id: &str,
        since: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<Document>, SourceError>;

    /// Export one document's full plain-text body.
    async fn export_text(&self, document_id: &str) -> Result<String, SourceError>;
}

/// Document source backed by a Drive-style files API.
#[derive(Debug)]
pub struct DriveSource {
    client: Client,
    api_url: String,
    token: String,
}

impl DriveSource {
    pub fn new(api_url: String, token: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Build a source from a credential file holding an access token.
    /// Token acquisition itself (service accounts, refresh flows) happens
    /// outside this crate.
    pub fn from_credentials_file(
        api_url: String,
        path: impl AsRef<Path>,
    ) -> Result<Self, SourceError> {
        let token = std::fs::read_to_string(path.as_ref())?;
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(SourceError::Credentials(format!(
                "credential file {} is empty",
                path.as_ref().display()
            )));
        }
        Ok(Self::new(api_url, token))
    }

    fn list_query(folder_id: &str, since: Option<&str>) -> String {
        let mut terms = vec![
            format!("'{folder_id}' in parents"),
            format!("mimeType='{DOCUMENT_MIME_TYPE}'"),
            "trashed=false".to_string(),
        ];
        if let Some(since) = since {
            terms.push(format!("modifiedTime > '{since}'"));
        }
        terms.join(" and ")
    }
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileEntry>,
}

#[derive(Deserialize)]
struct FileEntry {
    id: String,
    name: String,
    #[serde(rename = "modifiedTime")]
    modified_time: Option<String>,
}

#[async_trait]
impl DocumentSource for DriveSource {
    async fn list_documents(
        &self,
        folder_id: &str,
        since: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<Document>, SourceError> {
        let query = Self::list_query(folder_id, since);
        let page_size = LIST_PAGE_SIZE.to_string();
        let response = self
            .client
            .get(format!("{}/drive/v3/files", self.api_url))
            .bearer_auth(&self.token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "nextPageToken, files(id, name, modifiedTime)"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api(format!("{status}: {body}")));
        }

        let listing: FileList = response.json().await?;

        let mut documents: Vec<Document> = listing
            .files
            .into_iter()
            .map(|file| Document {
                id: file.id,
                title: file.name,
                modified_time: file.modified_time,
            })
            .collect();

        if let Some(limit) = limit {
            documents.truncate(limit);
        }

        tracing::debug!(count = documents.len(), folder = folder_id, "listed documents");
        Ok(documents)
    }

    async fn export_text(&self, document_id: &str) -> Result<String, SourceError> {
        let response = self
            .client
            .get(format!(
                "{}/drive/v3/files/{}/export",
                self.api_url, document_id
            ))
            .bearer_auth(&self.token)
            .query(&[("mimeType", "text/plain")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api(format!("{status}: {body}")));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn list_documents_parses_entries() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/drive/v3/files")
                    .query_param(
                        "q",
                        "'folder-1' in parents and \
                         mimeType='application/vnd.google-apps.document' and \
                         trashed=false",
                    );
                then.status(200).json_body(json!({
                    "files": [
                        {"id": "doc-a", "name": "First", "modifiedTime": "2025-05-01T10:00:00Z"},
                        {"id": "doc-b", "name": "Second"}
                    ]
                }));
            })
            .await;

        let source = DriveSource::new(server.base_url(), "token".to_string());
        let documents = source.list_documents("folder-1", None, None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id, "doc-a");
        assert_eq!(documents[0].title, "First");
        assert_eq!(
            documents[0].modified_time.as_deref(),
            Some("2025-05-01T10:00:00Z")
        );
        assert!(documents[1].modified_time.is_none());
    }

    #[tokio::test]
    async fn since_adds_a_modified_time_clause() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/drive/v3/files")
                    .query_param_matches("q", "modifiedTime > '2025-01-01T00:00:00Z'");
                then.status(200).json_body(json!({"files": []}));
            })
            .await;

        let source = DriveSource::new(server.base_url(), "token".to_string());
        let documents = source
            .list_documents("folder-1", Some("2025-01-01T00:00:00Z"), None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(documents.is_empty());
    }

    #[tokio::test]
    async fn limit_truncates_the_listing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/drive/v3/files");
                then.status(200).json_body(json!({
                    "files": [
                        {"id": "doc-a", "name": "A"},
                        {"id": "doc-b", "name": "B"},
                        {"id": "doc-c", "name": "C"}
                    ]
                }));
            })
            .await;

        let source = DriveSource::new(server.base_url(), "token".to_string());
        let documents = source.list_documents("folder-1", None, Some(2)).await.unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1].id, "doc-b");
    }

    #[tokio::test]
    async fn export_returns_the_plain_text_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/drive/v3/files/doc-a/export")
                    .query_param("mimeType", "text/plain")
                    .header("authorization", "Bearer token");
                then.status(200).body("Para one.\n\nPara two.");
            })
            .await;

        let source = DriveSource::new(server.base_url(), "token".to_string());
        let text = source.export_text("doc-a").await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Para one.\n\nPara two.");
    }

    #[tokio::test]
    async fn api_failure_surfaces_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/drive/v3/files/doc-a/export");
                then.status(403).body("insufficient permissions");
            })
            .await;

        let source = DriveSource::new(server.base_url(), "token".to_string());
        let err = source.export_text("doc-a").await.unwrap_err();
        assert!(matches!(err, SourceError::Api(_)));
    }

    #[test]
    fn credentials_file_must_not_be_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds");
        std::fs::write(&path, "  \n").unwrap();

        let err = DriveSource::from_credentials_file("http://api".to_string(), &path).unwrap_err();
        assert!(matches!(err, SourceError::Credentials(_)));
    }

    #[test]
    fn credentials_file_token_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creds");
        std::fs::write(&path, "secret-token\n").unwrap();

        let source = DriveSource::from_credentials_file("http://api".to_string(), &path).unwrap();
        assert_eq!(source.token, "secret-token");
    }
}
