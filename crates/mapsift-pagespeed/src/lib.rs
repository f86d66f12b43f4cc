pub mod client;
pub mod error;
pub mod normalize;
mod retry;
pub mod types;

pub use client::PagespeedClient;
pub use error::PagespeedError;
pub use normalize::{clean_url, url_variants};
pub use types::Enrichment;
