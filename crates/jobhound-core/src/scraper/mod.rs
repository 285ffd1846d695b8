//! Job scraping collaborators.
//!
//! The bot never scrapes on its own: it hands a [`ScrapeQuery`] to a
//! [`JobScraper`] and gets postings back. [`JobSpyApiScraper`] talks to a
//! JobSpy REST sidecar.

mod jobspy;

pub use jobspy::JobSpyApiScraper;

use crate::config::SearchSettings;
use crate::jobs::JobRecord;
use crate::search::SearchRequest;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a scraping collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScrapeError {
    /// The request never got a response
    #[error("Scraper request failed: {0}")]
    Request(String),
    /// The scraper answered with a non-success status
    #[error("Scraper returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },
    /// The response could not be decoded
    #[error("Failed to decode scraper response: {0}")]
    Decode(String),
    /// The scrape did not finish in time
    #[error("Job search timed out after {0} seconds")]
    Timeout(u64),
    /// The scrape task panicked or was cancelled
    #[error("Job search task failed: {0}")]
    Join(String),
}

/// Parameters of one scrape call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeQuery {
    /// Listing sources to query
    pub sources: Vec<String>,
    /// Job title or keywords
    pub search_term: String,
    /// Location to search in
    pub location: String,
    /// Maximum number of postings
    pub results_wanted: u32,
    /// Recency window in hours
    pub hours_old: u32,
    /// Country hint for sources that need one
    pub country_hint: String,
    /// Free-text query for sources that expect one
    pub natural_language_query: String,
}

impl ScrapeQuery {
    /// Build the scrape parameters for a parsed request.
    #[must_use]
    pub fn new(request: &SearchRequest, settings: &SearchSettings) -> Self {
        Self {
            sources: settings.sources(),
            search_term: request.search_term().to_string(),
            location: request.location().to_string(),
            results_wanted: settings.results_wanted,
            hours_old: settings.hours_old,
            country_hint: settings.country_indeed.clone(),
            natural_language_query: request.natural_language_query(&settings.country_indeed),
        }
    }
}

/// Interface for job scraping collaborators.
///
/// Implementations may take minutes; callers run them off the dispatch loop.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait JobScraper: Send + Sync {
    /// Fetch postings matching `query`. An empty vector is a valid answer.
    async fn scrape(&self, query: &ScrapeQuery) -> Result<Vec<JobRecord>, ScrapeError>;
}
