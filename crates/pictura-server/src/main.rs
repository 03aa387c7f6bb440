//! Pictura - cross-modal image search
//!
//! Index a captioned image corpus with a CLIP-style encoder and search it
//! by text or by image, over HTTP or from the command line.

// Force-link pictura-providers so linkme registrations are included
extern crate pictura_providers;

use clap::{Parser, Subcommand};
use pictura_infrastructure::{ConfigLoader, init_logging};
use pictura_server::commands;

/// Command line interface for Pictura
#[derive(Parser, Debug)]
#[command(name = "pictura")]
#[command(about = "Cross-modal image search - index images, query by text or image")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest the corpus and write the index artifact
    Build,
    /// Run the HTTP search API
    Serve,
    /// Answer a one-shot text query
    Search {
        /// Natural-language query
        query: String,
        /// Number of results
        #[arg(short, long, default_value_t = 5)]
        k: usize,
    },
    /// Measure Recall@k and query latency over the captions file
    Evaluate {
        /// Recall cutoff
        #[arg(short, long, default_value_t = 5)]
        k: usize,
        /// Cap on the number of caption queries
        #[arg(long)]
        queries: Option<usize>,
    },
    /// List available embedding providers
    Providers,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;

    match cli.command {
        Command::Build => {
            let report = commands::build(&config).await?;
            println!(
                "indexed {} images ({} skipped)",
                report.embedded, report.skipped
            );
            for error in &report.errors {
                println!("  skipped {error}");
            }
        }
        Command::Serve => {
            commands::serve(&config).await?;
        }
        Command::Search { query, k } => {
            let hits = commands::search(&config, &query, k).await?;
            for (rank, hit) in hits.iter().enumerate() {
                println!("{:>2}. {:<40} {:.4}", rank + 1, hit.name, hit.score);
            }
        }
        Command::Evaluate { k, queries } => {
            let report = commands::evaluate(&config, k, queries).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Providers => {
            for (name, description) in pictura_providers::registry::list_embedding_providers() {
                println!("{name:<12} {description}");
            }
        }
    }

    Ok(())
}
