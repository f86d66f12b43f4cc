//! DOM traversal: from a parsed search results page to [`ListingRecord`]s.
//!
//! The snapshot is an explicit [`scraper::Html`] value rather than anything
//! ambient, so extraction is a pure function of its input and testable from
//! string fixtures. Field recovery is delegated to [`crate::fields`].

use mapsift_core::ListingRecord;
use scraper::{ElementRef, Html, Selector};

use crate::fields::{match_address, parse_industry, parse_phone, parse_rating_label};

/// Prefix matched by the anchors that define a listing.
const PLACE_LINK_PREFIX: &str = "https://www.google.com/maps/place";

/// Prefix used to *exclude* place links when hunting for the business's own
/// website. Carries a trailing slash, unlike [`PLACE_LINK_PREFIX`].
const PLACE_LINK_FILTER: &str = "https://www.google.com/maps/place/";

/// Substring of the `jsaction` attribute that marks a listing card container.
const CARD_MARKER: &str = "mouseover:pane";

/// Extracts one [`ListingRecord`] per place-link anchor in the snapshot.
///
/// A snapshot with no matching anchors yields an empty vec. Nested matching
/// anchors each produce their own record; nothing is deduplicated here.
/// Every field except `href` defaults to the empty string when its heuristic
/// finds nothing — extraction gaps are data, not errors.
#[must_use]
pub fn extract_listings(document: &Html) -> Vec<ListingRecord> {
    let anchor_selector = Selector::parse(&format!("a[href^=\"{PLACE_LINK_PREFIX}\"]"))
        .expect("valid place-link selector");
    let title_selector = Selector::parse(".fontHeadlineSmall").expect("valid title selector");
    let image_selector = Selector::parse("[role=\"img\"]").expect("valid image-role selector");
    let link_selector = Selector::parse("a[href]").expect("valid link selector");

    let records: Vec<ListingRecord> = document
        .select(&anchor_selector)
        .map(|anchor| {
            let mut record = ListingRecord {
                href: anchor.value().attr("href").unwrap_or_default().to_owned(),
                ..ListingRecord::default()
            };

            let Some(container) = listing_container(anchor) else {
                return record;
            };

            if let Some(title) = container.select(&title_selector).next() {
                record.title = title.text().collect();
            }

            if let Some(image) = container.select(&image_selector).next() {
                let label = image.value().attr("aria-label").unwrap_or_default();
                let (rating, review_count) = parse_rating_label(label);
                record.rating = rating;
                record.review_count = review_count;
            }

            let container_text: String = container.text().collect();

            if let Some(address) = match_address(&container_text) {
                // The industry heuristic scans the text that precedes the raw
                // (pre-strip) address match.
                let before = &container_text[..address.start];
                if let Some(industry) =
                    parse_industry(before, &record.rating, &record.review_count)
                {
                    record.industry = industry;
                }
                record.address = address.cleaned;
            }

            if let Some(phone) = parse_phone(&container_text) {
                record.phone = phone;
            }

            record.company_url = container
                .select(&link_selector)
                .filter_map(|a| a.value().attr("href"))
                .find(|href| !href.starts_with(PLACE_LINK_FILTER))
                .unwrap_or_default()
                .to_owned();

            record
        })
        .collect();

    tracing::debug!(listings = records.len(), "extracted listings from snapshot");
    records
}

/// Walks up from a place-link anchor to its listing card container: the
/// nearest ancestor whose `jsaction` attribute mentions [`CARD_MARKER`].
fn listing_container(anchor: ElementRef<'_>) -> Option<ElementRef<'_>> {
    anchor.ancestors().filter_map(ElementRef::wrap).find(|el| {
        el.value()
            .attr("jsaction")
            .is_some_and(|actions| actions.contains(CARD_MARKER))
    })
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
