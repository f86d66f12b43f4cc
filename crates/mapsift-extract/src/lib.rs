pub mod extract;
pub mod fields;

pub use extract::extract_listings;
