//! Error taxonomy for the search flow.
//!
//! `FormatError` and `SearchError::EmptyResult` are user-facing outcomes;
//! scrape failures wrap [`ScrapeError`]. Startup problems live in
//! [`crate::config::StartupConfigError`].

use crate::scraper::ScrapeError;
use thiserror::Error;

/// The user's query is not of the form `<search_term>, <location>`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FormatError {
    /// No comma in the input
    #[error("Please use the format: <search_term>, <location>")]
    MissingSeparator,
    /// Nothing before the comma
    #[error("Search term is empty. Please use the format: <search_term>, <location>")]
    EmptySearchTerm,
    /// Nothing after the comma
    #[error("Location is empty. Please use the format: <search_term>, <location>")]
    EmptyLocation,
}

/// Errors that end a search without results.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Bad user input
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The scrape succeeded but found nothing
    #[error("No jobs found matching your criteria.")]
    EmptyResult,
    /// The scraping collaborator failed
    #[error(transparent)]
    Scrape(#[from] ScrapeError),
    /// Results could not be delivered over the chat transport
    #[error("Failed to deliver results: {0}")]
    Delivery(String),
}
