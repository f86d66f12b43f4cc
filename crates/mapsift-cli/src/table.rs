//! The on-screen results table: base listing data plus three enrichment
//! cells per row.
//!
//! Each row's enrichment is single-assignment: it starts `Pending` and
//! resolves exactly once to `Done` or `Failed`. Enrichment tasks address
//! rows by index and never touch any other row's cells.

use mapsift_core::ListingRecord;
use mapsift_pagespeed::Enrichment;

pub(crate) const HEADERS: [&str; 11] = [
    "Title",
    "Rating",
    "Reviews",
    "Phone",
    "Industry",
    "Address",
    "Website",
    "Google Maps Link",
    "Performance Score",
    "Largest Contentful Paint",
    "Speed Index",
];

/// Placeholder shown while an enrichment task is in flight (or was never
/// launched).
const SENTINEL: &str = "-";

/// Shown in all three enrichment cells when a row's task exhausted its
/// retries.
const ERROR_CELL: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EnrichmentCell {
    Pending,
    Done(Enrichment),
    Failed,
}

impl EnrichmentCell {
    /// The three rendered cells: performance score, LCP, speed index.
    fn cells(self) -> [String; 3] {
        match self {
            Self::Pending => [SENTINEL.to_owned(), SENTINEL.to_owned(), SENTINEL.to_owned()],
            Self::Failed => [
                ERROR_CELL.to_owned(),
                ERROR_CELL.to_owned(),
                ERROR_CELL.to_owned(),
            ],
            Self::Done(e) => [
                metric_cell(e.performance_score),
                metric_cell(e.largest_contentful_paint_ms),
                metric_cell(e.speed_index_ms),
            ],
        }
    }
}

fn metric_cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| SENTINEL.to_owned(), |v| v.to_string())
}

#[derive(Debug)]
pub(crate) struct Row {
    pub record: ListingRecord,
    pub enrichment: EnrichmentCell,
}

/// All scraped rows for one invocation.
#[derive(Debug)]
pub(crate) struct ResultsTable {
    rows: Vec<Row>,
}

impl ResultsTable {
    pub fn new(records: Vec<ListingRecord>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| Row {
                record,
                enrichment: EnrichmentCell::Pending,
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Indices and website URLs of the rows worth enriching.
    pub fn enrichable(&self) -> Vec<(usize, String)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.record.company_url.is_empty())
            .map(|(index, row)| (index, row.record.company_url.clone()))
            .collect()
    }

    /// Resolves one row's enrichment cells. A row resolves at most once;
    /// anything after the first resolution is ignored, as is an index out
    /// of range.
    pub fn resolve(&mut self, index: usize, cell: EnrichmentCell) {
        if let Some(row) = self.rows.get_mut(index) {
            if row.enrichment == EnrichmentCell::Pending {
                row.enrichment = cell;
            }
        }
    }

    /// Header row plus one row of cells per listing, in CSV column order.
    /// Review counts are exported without their parentheses.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(HEADERS.iter().map(|h| (*h).to_owned()).collect());
        for row in &self.rows {
            let r = &row.record;
            let [score, lcp, speed_index] = row.enrichment.cells();
            out.push(vec![
                r.title.clone(),
                r.rating.clone(),
                r.review_count_bare(),
                r.phone.clone(),
                r.industry.clone(),
                r.address.clone(),
                r.company_url.clone(),
                r.href.clone(),
                score,
                lcp,
                speed_index,
            ]);
        }
        out
    }

    /// Renders the table as padded plain text.
    pub fn render(&self) -> String {
        let rows = self.to_rows();
        let mut widths = vec![0usize; HEADERS.len()];
        for row in &rows {
            for (column, cell) in row.iter().enumerate() {
                widths[column] = widths[column].max(cell.chars().count());
            }
        }

        rows.iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(column, cell)| format!("{cell:<width$}", width = widths[column]))
                    .collect::<Vec<_>>()
                    .join("  ")
                    .trim_end()
                    .to_owned()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
