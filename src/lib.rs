//! stayscrape - resilient extraction of hotel listings from paginated result pages
//!
//! The crate is organized around a small set of collaborators:
//! - a `Browser` trait over the six DOM operations the engine needs,
//!   with a WebDriver-backed implementation
//! - a fault-isolating extraction pipeline (selector fallback chains,
//!   per-card extraction, numeric normalization)
//! - a page traversal state machine that drives fetch/extract/paginate
//!   until the result set is exhausted or the page budget is spent
//! - CSV/TSV export of the accumulated dataset

pub mod browser;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod scrape;

// Re-export main types for convenience
pub use crate::config::AppConfig;
pub use crate::error::{ScrapeError, ScrapeResult};
pub use crate::scrape::traversal::{PageTraversal, RunOutcome, RunReport};
pub use crate::scrape::Listing;
