//! HTTP client for the `PageSpeed` Insights `runPagespeed` endpoint.
//!
//! Each listing's website is audited independently: the client tries up to
//! three URL variants, with a bounded number of attempts per variant, and
//! the first non-empty lighthouse result wins. Retry timing decisions live
//! in [`crate::retry`]; this module only drives them.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::PagespeedError;
use crate::normalize::{clean_url, url_variants};
use crate::retry::{classify, next_step, AttemptOutcome, Step};
use crate::types::{Enrichment, LighthouseResult, RunPagespeedResponse};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/";
const RUN_PAGESPEED_PATH: &str = "pagespeedonline/v5/runPagespeed";

/// Client for the `PageSpeed` Insights v5 API.
///
/// Use [`PagespeedClient::new`] for production or
/// [`PagespeedClient::with_base_url`] to point at a mock server in tests.
pub struct PagespeedClient {
    client: Client,
    api_key: String,
    base_url: Url,
    /// Attempts per URL variant.
    max_retries: u32,
    /// Flat inter-attempt delay; a 429 escalates it linearly.
    retry_delay: Duration,
}

impl PagespeedClient {
    /// Creates a client pointed at the production API.
    ///
    /// `max_retries` is the attempt budget per URL variant; `retry_delay_ms`
    /// is the flat delay between attempts.
    ///
    /// # Errors
    ///
    /// Returns [`PagespeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, PagespeedError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            max_retries,
            retry_delay_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PagespeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PagespeedError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        retry_delay_ms: u64,
        base_url: &str,
    ) -> Result<Self, PagespeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url =
            Url::parse(base_url).map_err(|e| PagespeedError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries,
            retry_delay: Duration::from_millis(retry_delay_ms),
        })
    }

    /// Audits `target_url` and returns its distilled performance metrics.
    ///
    /// Tries each URL variant in order (original, www-toggled, trailing
    /// slash), normalizing with [`clean_url`] immediately before every
    /// request. The first response carrying a lighthouse result terminates
    /// the loop across all remaining variants.
    ///
    /// # Errors
    ///
    /// When every variant exhausts its attempt budget, returns the last
    /// captured error — [`PagespeedError::RateLimited`],
    /// [`PagespeedError::UnexpectedStatus`], [`PagespeedError::Http`], or
    /// [`PagespeedError::Deserialize`] — or
    /// [`PagespeedError::AllVariantsFailed`] when none was captured.
    pub async fn fetch_performance(
        &self,
        target_url: &str,
    ) -> Result<Enrichment, PagespeedError> {
        let variants = url_variants(target_url);
        let mut last_error: Option<PagespeedError> = None;

        for variant in &variants {
            let mut attempt = 0u32;
            while attempt < self.max_retries {
                let cleaned = clean_url(variant);
                if cleaned.is_empty() {
                    // Nothing to request; burn the attempt without sleeping.
                    attempt += 1;
                    continue;
                }

                tracing::debug!(target = %cleaned, attempt, "requesting performance audit");
                match self.run_audit(&cleaned).await {
                    Ok(lighthouse) => return Ok(Enrichment::from_lighthouse(&lighthouse)),
                    Err(err) => {
                        let outcome = classify(&err);
                        tracing::warn!(
                            target = %cleaned,
                            attempt,
                            error = %err,
                            "performance audit attempt failed"
                        );
                        // An empty audit is not evidence of anything wrong
                        // with the target; don't let it mask a real error.
                        if outcome != AttemptOutcome::EmptyAudit {
                            last_error = Some(err);
                        }

                        match next_step(outcome, attempt, self.max_retries, self.retry_delay) {
                            Step::RetrySameVariant { delay } => {
                                if !delay.is_zero() {
                                    tokio::time::sleep(delay).await;
                                }
                                attempt += 1;
                            }
                            Step::AdvanceVariant { delay } => {
                                if !delay.is_zero() {
                                    tokio::time::sleep(delay).await;
                                }
                                break;
                            }
                        }
                    }
                }
            }
        }

        Err(last_error.unwrap_or(PagespeedError::AllVariantsFailed))
    }

    /// Issues one `runPagespeed` request and returns the lighthouse result.
    async fn run_audit(&self, target: &str) -> Result<LighthouseResult, PagespeedError> {
        let url = self.build_url(target);
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PagespeedError::RateLimited {
                url: target.to_owned(),
            });
        }

        if !status.is_success() {
            // The API usually explains itself in the body; keep that in the
            // logs without promoting it to the error type.
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(
                status = status.as_u16(),
                target,
                body = %body,
                "pagespeed API error payload"
            );
            return Err(PagespeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: target.to_owned(),
            });
        }

        let body = response.text().await?;
        let parsed: RunPagespeedResponse =
            serde_json::from_str(&body).map_err(|e| PagespeedError::Deserialize {
                context: format!("runPagespeed({target})"),
                source: e,
            })?;

        parsed
            .lighthouse_result
            .ok_or_else(|| PagespeedError::EmptyAudit {
                url: target.to_owned(),
            })
    }

    /// Builds the `runPagespeed` request URL with percent-encoded query
    /// parameters: the audited `url`, the API `key`, and the fixed mobile
    /// strategy.
    fn build_url(&self, target: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(RUN_PAGESPEED_PATH);
        url.query_pairs_mut()
            .append_pair("url", target)
            .append_pair("key", &self.api_key)
            .append_pair("strategy", "mobile");
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
