#![deny(missing_docs)]
//! Jobhound core library.
//!
//! Search parsing, job records, pagination, CSV export and the scraper seam.

/// Configuration management.
pub mod config;
/// Error taxonomy shared by the search flow.
pub mod error;
/// CSV export of result sets.
pub mod export;
/// Job posting records.
pub mod jobs;
/// Result sets, pages and navigation payloads.
pub mod pagination;
/// Job scraping collaborators.
pub mod scraper;
/// Parsed user search requests.
pub mod search;
/// Utility functions.
pub mod utils;

/// Fixtures shared by unit and integration tests.
#[cfg(any(test, feature = "testing"))]
pub mod testing;
