//! The `scrape` command: extract listings from a snapshot, enrich, render,
//! export.
//!
//! Per-row enrichment failures are resolved into that row's cells and never
//! propagated — one bad website must not affect the other rows or the
//! already-extracted base data.

use std::io::Read;

use anyhow::Context;
use futures::stream::{self, StreamExt};
use mapsift_core::{is_maps_search_url, rows_to_csv, sanitize_filename, AppConfig};
use mapsift_extract::extract_listings;
use mapsift_pagespeed::PagespeedClient;
use scraper::Html;

use crate::table::{EnrichmentCell, ResultsTable};

#[derive(Debug, clap::Args)]
pub(crate) struct ScrapeArgs {
    /// Saved HTML of a Maps search results page; `-` reads stdin
    #[arg(long)]
    pub input: String,

    /// URL the snapshot was captured from; anything but a Maps search page
    /// draws a warning
    #[arg(long)]
    pub page_url: Option<String>,

    /// Fetch PageSpeed metrics for each listing's website
    #[arg(long)]
    pub enrich: bool,

    /// Write the table as CSV under this name (sanitized; blank for the
    /// default name)
    #[arg(long)]
    pub csv: Option<String>,

    /// Print the extracted records as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub(crate) async fn run(config: &AppConfig, args: &ScrapeArgs) -> anyhow::Result<()> {
    if let Some(page_url) = &args.page_url {
        if !is_maps_search_url(page_url) {
            tracing::warn!(
                %page_url,
                "snapshot is not from a Maps search page; expect no listings. \
                 Capture one from https://www.google.com/maps/search/"
            );
        }
    }

    let html = read_input(&args.input)?;
    let document = Html::parse_document(&html);
    let records = extract_listings(&document);
    tracing::info!(listings = records.len(), "extracted listings");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let mut table = ResultsTable::new(records);

    if args.enrich && !table.is_empty() {
        match &config.pagespeed_api_key {
            Some(api_key) => {
                let client = PagespeedClient::new(
                    api_key,
                    config.pagespeed_request_timeout_secs,
                    &config.http_user_agent,
                    config.pagespeed_max_retries,
                    config.pagespeed_retry_delay_ms,
                )?;
                enrich_rows(&mut table, &client, config.enrich_max_concurrent).await;
            }
            None => {
                tracing::warn!("PAGESPEED_API_KEY is not set; skipping enrichment");
            }
        }
    }

    println!("{}", table.render());

    if let Some(name) = &args.csv {
        if table.is_empty() {
            tracing::warn!("no listings extracted; skipping CSV export");
        } else {
            let filename = sanitize_filename(name);
            std::fs::write(&filename, rows_to_csv(&table.to_rows()))
                .with_context(|| format!("failed to write {filename}"))?;
            tracing::info!(%filename, "wrote CSV export");
        }
    }

    Ok(())
}

/// Runs one enrichment task per row that has a website, resolving each row's
/// cells as its task completes. Completion order is unspecified; each task
/// writes only its own row.
async fn enrich_rows(table: &mut ResultsTable, client: &PagespeedClient, max_concurrent: usize) {
    let targets = table.enrichable();
    tracing::info!(rows = targets.len(), "enriching listings with PageSpeed metrics");

    let mut outcomes = stream::iter(targets)
        .map(|(index, url)| async move {
            let outcome = client.fetch_performance(&url).await;
            (index, url, outcome)
        })
        .buffer_unordered(max_concurrent.max(1));

    while let Some((index, url, outcome)) = outcomes.next().await {
        match outcome {
            Ok(metrics) => {
                tracing::info!(row = index, %url, "listing enriched");
                table.resolve(index, EnrichmentCell::Done(metrics));
            }
            Err(err) => {
                tracing::warn!(row = index, %url, error = %err, "enrichment failed for listing");
                table.resolve(index, EnrichmentCell::Failed);
            }
        }
    }
}

/// Reads the snapshot HTML from a file, or from stdin when `input` is `-`.
fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("failed to read snapshot from stdin")?;
        Ok(html)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    }
}
