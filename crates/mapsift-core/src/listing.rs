//! The record produced for one business listing on a Maps search results page.

use serde::Serialize;

/// One business listing extracted from a Maps search results page.
///
/// Every field except `href` is best-effort: when a heuristic fails to locate
/// the field in the listing's DOM container, the field is the empty string
/// rather than an error or a null. `href` is always present because a record
/// only exists for an anchor that matched the place-link pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    /// Business name from the listing's headline element.
    pub title: String,
    /// Star rating as displayed, e.g. `"4.5"`, or the literal `"0"` when the
    /// accessibility label exists but carries no star rating.
    pub rating: String,
    /// Review count wrapped in parentheses, e.g. `"(128)"`, or `"0"` when the
    /// accessibility label exists but carries no star rating.
    pub review_count: String,
    /// First phone-number-shaped string found in the container text.
    pub phone: String,
    /// Business category, recovered from the text between the rating and the
    /// address.
    pub industry: String,
    /// Street address with open/closed status tokens stripped.
    pub address: String,
    /// The business's own website, when the listing links to one.
    pub company_url: String,
    /// The Maps place-page URL of the anchor this record was derived from.
    pub href: String,
}

impl ListingRecord {
    /// Review count with the surrounding parentheses removed, for display
    /// and export. `"(128)"` becomes `"128"`; `"0"` and `""` pass through.
    #[must_use]
    pub fn review_count_bare(&self) -> String {
        self.review_count.replace(['(', ')'], "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_count_bare_strips_parentheses() {
        let record = ListingRecord {
            review_count: "(128)".to_owned(),
            ..ListingRecord::default()
        };
        assert_eq!(record.review_count_bare(), "128");
    }

    #[test]
    fn review_count_bare_passes_plain_values_through() {
        let record = ListingRecord {
            review_count: "0".to_owned(),
            ..ListingRecord::default()
        };
        assert_eq!(record.review_count_bare(), "0");
    }

    #[test]
    fn default_record_is_all_empty() {
        let record = ListingRecord::default();
        assert_eq!(record.title, "");
        assert_eq!(record.href, "");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let record = ListingRecord {
            company_url: "https://example.com".to_owned(),
            ..ListingRecord::default()
        };
        let json = serde_json::to_value(&record).expect("record should serialize");
        assert_eq!(json["companyUrl"], "https://example.com");
        assert_eq!(json["reviewCount"], "");
    }
}
