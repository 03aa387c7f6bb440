//! Infrastructure constants

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "pictura.toml";

/// Default configuration directory name (under XDG config / home)
pub const DEFAULT_CONFIG_DIR: &str = "pictura";

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "PICTURA";

/// Environment variable consulted for the log filter
pub const LOG_FILTER_ENV: &str = "PICTURA_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default HTTP bind address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Default images directory
pub const DEFAULT_IMAGES_DIR: &str = "data/images";

/// Default captions file
pub const DEFAULT_CAPTIONS_FILE: &str = "data/captions.csv";

/// Default artifact directory
pub const DEFAULT_ARTIFACT_DIR: &str = "data/artifacts";

/// Default ingestion batch size
pub const DEFAULT_INGEST_BATCH_SIZE: usize = 32;

/// Default number of concurrently embedded batches
pub const DEFAULT_INGEST_CONCURRENCY: usize = 4;
