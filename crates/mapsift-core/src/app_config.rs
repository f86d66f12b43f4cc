/// Runtime configuration for the scraper and the enrichment client.
///
/// Built from environment variables by [`crate::config::load_app_config`].
#[derive(Clone)]
pub struct AppConfig {
    /// Google PageSpeed Insights API key. Enrichment is skipped (with a
    /// warning) when unset.
    pub pagespeed_api_key: Option<String>,
    /// Attempts per URL variant before moving to the next variant.
    pub pagespeed_max_retries: u32,
    /// Flat delay between retry attempts; a 429 escalates this linearly.
    pub pagespeed_retry_delay_ms: u64,
    pub pagespeed_request_timeout_secs: u64,
    /// Upper bound on concurrently running per-row enrichment tasks.
    pub enrich_max_concurrent: usize,
    pub http_user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "pagespeed_api_key",
                &self.pagespeed_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("pagespeed_max_retries", &self.pagespeed_max_retries)
            .field("pagespeed_retry_delay_ms", &self.pagespeed_retry_delay_ms)
            .field(
                "pagespeed_request_timeout_secs",
                &self.pagespeed_request_timeout_secs,
            )
            .field("enrich_max_concurrent", &self.enrich_max_concurrent)
            .field("http_user_agent", &self.http_user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
