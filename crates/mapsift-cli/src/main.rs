use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod scrape;
mod table;

#[derive(Debug, Parser)]
#[command(name = "mapsift")]
#[command(about = "Extract and enrich business listings from saved Google Maps search pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract listings from a saved search results page and optionally
    /// enrich each one with PageSpeed metrics
    Scrape(scrape::ScrapeArgs),
    /// Show the canonical form and retry variants of a website URL
    CheckUrl { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = mapsift_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape(args) => scrape::run(&config, &args).await,
        Commands::CheckUrl { url } => {
            println!("cleaned: {}", mapsift_pagespeed::clean_url(&url));
            for variant in mapsift_pagespeed::url_variants(&url) {
                println!("variant: {variant}");
            }
            Ok(())
        }
    }
}
