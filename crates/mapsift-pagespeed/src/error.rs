use thiserror::Error;

/// Errors produced by the `PageSpeed` Insights client.
#[derive(Debug, Error)]
pub enum PagespeedError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP 429 — retried with an escalating delay on the same variant.
    #[error("rate limited while auditing {url}")]
    RateLimited { url: String },

    /// Any other non-2xx status.
    #[error("unexpected HTTP status {status} while auditing {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The API answered 2xx but the body carried no lighthouse result.
    #[error("audit response for {url} contained no lighthouse result")]
    EmptyAudit { url: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// Every variant exhausted its attempts without capturing a concrete error.
    #[error("all URL variants failed")]
    AllVariantsFailed,
}
