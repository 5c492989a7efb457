use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub datastore: DatastoreConfig,
    pub embeddings: EmbeddingsConfig,
    pub source: SourceConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            datastore: DatastoreConfig::from_env(),
            embeddings: EmbeddingsConfig::from_env(),
            source: SourceConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!(
            "  datastore:  url={}, key={}",
            self.datastore.url.as_deref().unwrap_or("(none)"),
            if self.datastore.service_key.is_some() { "set" } else { "(none)" }
        );
        tracing::info!("  embeddings: url={}", self.embeddings.url);
        tracing::info!("  source:     api_url={}", self.source.api_url);
    }
}

// ── Datastore ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatastoreConfig {
    pub url: Option<String>,
    pub service_key: Option<String>,
}

impl DatastoreConfig {
    fn from_env() -> Self {
        Self {
            // Server-side URL wins; the public URL is the same endpoint as
            // exposed to browser clients.
            url: env_opt("DATASTORE_URL").or_else(|| env_opt("PUBLIC_DATASTORE_URL")),
            service_key: env_opt("DATASTORE_SERVICE_KEY"),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.service_key.is_some()
    }
}

// ── Embeddings service ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    pub url: String,
}

impl EmbeddingsConfig {
    fn from_env() -> Self {
        Self {
            url: env_or("EMBEDDINGS_URL", "http://127.0.0.1:8001"),
        }
    }
}

// ── Document source ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub api_url: String,
}

impl SourceConfig {
    fn from_env() -> Self {
        Self {
            api_url: env_or("SOURCE_API_URL", "https://www.googleapis.com"),
        }
    }
}
