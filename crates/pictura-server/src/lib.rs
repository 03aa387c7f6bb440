//! # Pictura - Serving Layer
//!
//! The outward face of the system: Rocket HTTP API over the search
//! engine, plus the CLI commands (`build`, `serve`, `search`,
//! `evaluate`) the `pictura` binary dispatches to.
//!
//! ## Architecture
//!
//! - Domain layer: types, errors and ports (pictura-domain)
//! - Engine: index, artifact store, ingestion and search (pictura-engine)
//! - Providers: embedding adapters (pictura-providers)
//! - Infrastructure: configuration and logging (pictura-infrastructure)

/// CLI command implementations
pub mod commands;
/// HTTP request handlers
pub mod handlers;
/// Rocket assembly
pub mod routes;
/// Shared handler state
pub mod state;

pub use state::AppState;
