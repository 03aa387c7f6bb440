//! # Pictura - Infrastructure
//!
//! Cross-cutting technical concerns: layered configuration loading and
//! structured logging setup. No retrieval logic lives here.

/// Configuration loading and types
pub mod config;
/// Infrastructure constants
pub mod constants;
/// Structured logging setup
pub mod logging;

pub use config::{AppConfig, ConfigLoader};
pub use logging::init_logging;
