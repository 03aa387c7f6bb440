//! Configuration types

use crate::constants::{
    DEFAULT_ARTIFACT_DIR, DEFAULT_CAPTIONS_FILE, DEFAULT_IMAGES_DIR, DEFAULT_INGEST_BATCH_SIZE,
    DEFAULT_INGEST_CONCURRENCY, DEFAULT_LOG_LEVEL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Dataset and artifact locations
    #[serde(default)]
    pub data: DataConfig,
    /// Embedding adapter configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Ingestion configuration
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable JSON output format
    pub json_format: bool,
    /// Log to file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

/// Dataset and artifact locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the corpus images
    pub images_dir: PathBuf,
    /// Captions file describing the corpus
    pub captions_file: PathBuf,
    /// Directory the artifact pair is written to and read from
    pub artifact_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            captions_file: PathBuf::from(DEFAULT_CAPTIONS_FILE),
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
        }
    }
}

/// Embedding adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider name (e.g., "clip-http", "null")
    pub provider: String,
    /// Model name passed to the adapter
    pub model: Option<String>,
    /// Base URL for HTTP-backed adapters
    pub base_url: Option<String>,
    /// Embedding dimensions (adapter default when unset)
    pub dimensions: Option<usize>,
    /// Request timeout in seconds for HTTP-backed adapters
    pub timeout_secs: Option<u64>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "clip-http".to_string(),
            model: None,
            base_url: None,
            dimensions: None,
            timeout_secs: None,
        }
    }
}

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Images embedded per adapter call
    pub batch_size: usize,
    /// Batches in flight against the adapter at once
    pub concurrency: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_INGEST_BATCH_SIZE,
            concurrency: DEFAULT_INGEST_CONCURRENCY,
        }
    }
}
