//! Configuration loader
//!
//! Merges configuration sources with Figment: compiled defaults first,
//! then an optional TOML file, then `PICTURA_`-prefixed environment
//! variables.

use crate::config::AppConfig;
use crate::constants::{CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME};
use crate::logging::log_config_loaded;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use pictura_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if it exists)
    /// 3. Environment variables with prefix (e.g., `PICTURA_SERVER_PORT`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Underscore-separated nested keys (e.g., PICTURA_SERVER_PORT)
        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split("_"));

        let app_config: AppConfig = figment
            .extract()
            .map_err(|e| Error::config(format!("failed to extract configuration: {e}")))?;

        validate_app_config(&app_config)?;
        Ok(app_config)
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
            dirs::config_dir()
                .map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME))
                .unwrap_or_default(),
        ];

        candidates.into_iter().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
fn validate_app_config(config: &AppConfig) -> Result<()> {
    if config.server.port == 0 {
        return Err(Error::config("server port cannot be 0"));
    }
    if config.embedding.provider.trim().is_empty() {
        return Err(Error::config("embedding provider cannot be empty"));
    }
    if config.ingest.batch_size == 0 {
        return Err(Error::config("ingest batch_size cannot be 0"));
    }
    if config.ingest.concurrency == 0 {
        return Err(Error::config("ingest concurrency cannot be 0"));
    }
    if let Some(dims) = config.embedding.dimensions {
        if dims == 0 {
            return Err(Error::config("embedding dimensions cannot be 0"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_alone_are_valid() {
        let config = ConfigLoader::new()
            .with_config_path("/nonexistent/pictura.toml")
            .load()
            .unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.embedding.provider, "clip-http");
        assert_eq!(config.ingest.batch_size, 32);
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pictura.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9000

[embedding]
provider = "null"
dimensions = 64
"#,
        )
        .unwrap();

        let config = ConfigLoader::new().with_config_path(&path).load().unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.embedding.provider, "null");
        assert_eq!(config.embedding.dimensions, Some(64));
        // Untouched sections keep their defaults.
        assert_eq!(config.ingest.concurrency, 4);
    }

    #[test]
    fn zero_port_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pictura.toml");
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();

        let err = ConfigLoader::new().with_config_path(&path).load().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pictura.toml");
        std::fs::write(&path, "[ingest]\nbatch_size = 0\n").unwrap();

        assert!(ConfigLoader::new().with_config_path(&path).load().is_err());
    }
}
