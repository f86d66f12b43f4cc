//! Heuristic field parsers over a listing container's text content.
//!
//! Maps search result cards carry no stable per-field markup, so every field
//! beyond the title is recovered by pattern matching on the container's
//! concatenated text. Each heuristic lives here as a pure function over
//! `&str` so it can be tuned and tested without touching the DOM traversal
//! in [`crate::extract`].

use regex::Regex;

/// A street-address match inside a container's text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressMatch {
    /// Byte offset of the match in the scanned text. Everything before this
    /// offset is the haystack for the industry heuristic.
    pub start: usize,
    /// The raw matched text, before status tokens are stripped.
    pub raw: String,
    /// The address with open/closed status tokens removed.
    pub cleaned: String,
}

/// Finds the first street-address-shaped substring: a leading number, words
/// and spaces, and an optional unit marker (`#`, `Suite`, `Apt` + number).
///
/// Returns `None` when the text contains nothing address-shaped.
#[must_use]
pub fn match_address(text: &str) -> Option<AddressMatch> {
    let re = Regex::new(r"\d+ [\w\s]+(?:#\s*\d+|Suite\s*\d+|Apt\s*\d+)?")
        .expect("valid address regex");
    let matched = re.find(text)?;
    Some(AddressMatch {
        start: matched.start(),
        raw: matched.as_str().to_owned(),
        cleaned: strip_status_tokens(matched.as_str()),
    })
}

/// Removes opening-hours status tokens that the card text glues onto the
/// address, e.g. `"123 Main StClosed"` or `"456 Oak AveOpen 24 hours"`.
///
/// Four sequential passes: standalone tokens first, then tokens fused to a
/// trailing digit or word character. Order matters — the fused passes only
/// see what the standalone pass left behind.
fn strip_status_tokens(address: &str) -> String {
    let standalone = Regex::new(r"\b(Closed|Open 24 hours|24 hours)|Open\b")
        .expect("valid status token regex");
    let digit_open = Regex::new(r"(\d+)(Open)").expect("valid digit-open regex");
    let word_open = Regex::new(r"(\w)(Open)").expect("valid word-open regex");
    let word_closed = Regex::new(r"(\w)(Closed)").expect("valid word-closed regex");

    let pass = standalone.replace_all(address, "").trim().to_owned();
    let pass = digit_open.replace_all(&pass, "$1").trim().to_owned();
    let pass = word_open.replace_all(&pass, "$1").trim().to_owned();
    word_closed.replace_all(&pass, "$1").trim().to_owned()
}

/// Recovers the business category from the text preceding the address.
///
/// The card renders `<rating>(<reviews>)<category>` immediately before the
/// address line, so the category is whatever sits between the last
/// occurrence of the rating/review-count pair and the address. Returns
/// `None` when that pair does not occur in `text_before_address`; the
/// recovered string may legitimately be empty.
#[must_use]
pub fn parse_industry(
    text_before_address: &str,
    rating: &str,
    review_count: &str,
) -> Option<String> {
    let haystack = text_before_address.trim();
    let marker = format!("{rating}{review_count}");
    let found = haystack.rfind(&marker)?;
    let after = haystack[found + marker.len()..].trim();
    let first_line = after.split(['\r', '\n']).next().unwrap_or("");
    let cleaned: String = first_line
        .chars()
        .filter(|c| !matches!(c, '·' | '.' | ',' | '#' | '!' | '?'))
        .collect();
    Some(cleaned.trim().to_owned())
}

/// Finds the first phone-number-shaped substring: an optional 1–2 digit
/// country code, then a 3-3-4 grouping with flexible separators and optional
/// parentheses around the area code.
#[must_use]
pub fn parse_phone(text: &str) -> Option<String> {
    let re = Regex::new(r"(\+\d{1,2}\s)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}")
        .expect("valid phone regex");
    re.find(text).map(|m| m.as_str().to_owned())
}

/// Derives rating and review count from a star-rating accessibility label
/// such as `"4.5 stars 128 Reviews"`.
///
/// A label containing `stars` is split on single spaces: the first token is
/// the rating and the third is the review count, returned in parentheses. A
/// label without `stars` (including an empty one) means the card shows no
/// star rating; both fields become the literal `"0"`.
#[must_use]
pub fn parse_rating_label(label: &str) -> (String, String) {
    if label.contains("stars") {
        let parts: Vec<&str> = label.split(' ').collect();
        let rating = parts.first().copied().unwrap_or("").to_owned();
        let count = parts.get(2).copied().unwrap_or("");
        (rating, format!("({count})"))
    } else {
        ("0".to_owned(), "0".to_owned())
    }
}
