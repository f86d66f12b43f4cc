use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod export;
pub mod listing;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use export::{rows_to_csv, sanitize_filename, DEFAULT_CSV_FILENAME};
pub use listing::ListingRecord;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Returns `true` when `url` points at a Google Maps search results page.
///
/// This is the activation gate for scraping: listings only exist on
/// `/maps/search` pages, so anything else is rejected up front with a hint
/// rather than producing a silently empty extraction.
#[must_use]
pub fn is_maps_search_url(url: &str) -> bool {
    url.contains("://www.google.com/maps/search")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_search_url_is_accepted() {
        assert!(is_maps_search_url(
            "https://www.google.com/maps/search/coffee+near+me/@44.97,-93.26,14z"
        ));
    }

    #[test]
    fn maps_place_url_is_rejected() {
        assert!(!is_maps_search_url(
            "https://www.google.com/maps/place/Some+Cafe"
        ));
    }

    #[test]
    fn unrelated_url_is_rejected() {
        assert!(!is_maps_search_url("https://example.com/maps/search/"));
    }
}
