//! `PageSpeed` Insights `runPagespeed` response types and the distilled
//! per-listing enrichment.
//!
//! Only the fields we read are modeled; everything else in the (very large)
//! API response is ignored. All modeled fields are optional with
//! `#[serde(default)]` because partial audits are common — a missing piece
//! becomes a `-` sentinel downstream, never an error.

use std::collections::HashMap;

use serde::Deserialize;

/// Audit key for largest contentful paint.
pub const LCP_AUDIT: &str = "largest-contentful-paint";

/// Audit key for speed index.
pub const SPEED_INDEX_AUDIT: &str = "speed-index";

/// Top-level envelope of `GET /pagespeedonline/v5/runPagespeed`.
///
/// `lighthouse_result` being absent on a 2xx response means the audit did
/// not actually run; the client treats that as a retryable empty result.
#[derive(Debug, Deserialize)]
pub struct RunPagespeedResponse {
    #[serde(rename = "lighthouseResult", default)]
    pub lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LighthouseResult {
    #[serde(default)]
    pub categories: Categories,
    #[serde(default)]
    pub audits: HashMap<String, Audit>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Categories {
    #[serde(default)]
    pub performance: Option<Category>,
}

/// A lighthouse category; `score` is a fraction in `0.0..=1.0`.
#[derive(Debug, Default, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub score: Option<f64>,
}

/// A single audit entry; `numeric_value` is milliseconds for the audits we
/// read.
#[derive(Debug, Default, Deserialize)]
pub struct Audit {
    #[serde(rename = "numericValue", default)]
    pub numeric_value: Option<f64>,
}

/// The three metrics a listing row is enriched with. `None` renders as the
/// `-` sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enrichment {
    /// Performance category score scaled to `0..=100`.
    pub performance_score: Option<u32>,
    pub largest_contentful_paint_ms: Option<u64>,
    pub speed_index_ms: Option<u64>,
}

impl Enrichment {
    /// Distills a lighthouse result into the three row metrics, rounding the
    /// fractional performance score to an integer percentage and the audit
    /// timings to integer milliseconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_lighthouse(lighthouse: &LighthouseResult) -> Self {
        let performance_score = lighthouse
            .categories
            .performance
            .as_ref()
            .and_then(|category| category.score)
            .map(|score| (score * 100.0).round() as u32);

        let metric_ms = |key: &str| {
            lighthouse
                .audits
                .get(key)
                .and_then(|audit| audit.numeric_value)
                .map(|value| value.round() as u64)
        };

        Self {
            performance_score,
            largest_contentful_paint_ms: metric_ms(LCP_AUDIT),
            speed_index_ms: metric_ms(SPEED_INDEX_AUDIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lighthouse_from(value: serde_json::Value) -> LighthouseResult {
        serde_json::from_value(value).expect("fixture should deserialize")
    }

    #[test]
    fn fractional_score_rounds_to_integer_percentage() {
        let lighthouse = lighthouse_from(json!({
            "categories": { "performance": { "score": 0.873 } },
            "audits": {}
        }));
        let enrichment = Enrichment::from_lighthouse(&lighthouse);
        assert_eq!(enrichment.performance_score, Some(87));
    }

    #[test]
    fn audit_timings_round_to_milliseconds() {
        let lighthouse = lighthouse_from(json!({
            "categories": {},
            "audits": {
                "largest-contentful-paint": { "numericValue": 2381.7 },
                "speed-index": { "numericValue": 4100.2 }
            }
        }));
        let enrichment = Enrichment::from_lighthouse(&lighthouse);
        assert_eq!(enrichment.largest_contentful_paint_ms, Some(2382));
        assert_eq!(enrichment.speed_index_ms, Some(4100));
    }

    #[test]
    fn missing_pieces_become_sentinels() {
        let lighthouse = lighthouse_from(json!({}));
        let enrichment = Enrichment::from_lighthouse(&lighthouse);
        assert_eq!(enrichment, Enrichment::default());
    }

    #[test]
    fn unmodeled_response_fields_are_ignored() {
        let lighthouse = lighthouse_from(json!({
            "categories": { "performance": { "score": 1.0, "title": "Performance" } },
            "audits": { "speed-index": { "numericValue": 10.0, "displayValue": "0.0 s" } },
            "finalUrl": "https://www.example.com/"
        }));
        let enrichment = Enrichment::from_lighthouse(&lighthouse);
        assert_eq!(enrichment.performance_score, Some(100));
        assert_eq!(enrichment.speed_index_ms, Some(10));
    }
}
