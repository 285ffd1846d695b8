//! JobSpy API sidecar client.
//!
//! Calls `POST /api/v1/search_jobs` on a JobSpy REST wrapper and projects the
//! returned postings onto [`JobRecord`].

use super::{JobScraper, ScrapeError, ScrapeQuery};
use crate::config::SearchSettings;
use crate::jobs::JobRecord;
use crate::utils::truncate_str;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const SEARCH_PATH: &str = "api/v1/search_jobs";
const API_KEY_HEADER: &str = "x-api-key";
const ERROR_BODY_LIMIT: usize = 300;

/// Scraper backed by a JobSpy API sidecar.
pub struct JobSpyApiScraper {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

/// Response envelope; some deployments return the bare array instead.
#[derive(Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    Envelope { jobs: Vec<JobRecord> },
    Bare(Vec<JobRecord>),
}

impl JobSpyApiScraper {
    /// Create a client from search settings.
    ///
    /// The HTTP timeout is set slightly above the scrape timeout so the
    /// caller's own deadline fires first.
    #[must_use]
    pub fn new(settings: &SearchSettings) -> Self {
        let timeout = Duration::from_secs(settings.scrape_timeout_secs.saturating_add(5));
        let client = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(_) => reqwest::Client::new(),
        };

        Self {
            base_url: settings.jobspy_api_url.trim_end_matches('/').to_string(),
            api_key: settings.jobspy_api_key.clone().filter(|k| !k.is_empty()),
            client,
        }
    }

    fn endpoint_url(&self) -> String {
        format!("{}/{SEARCH_PATH}", self.base_url)
    }
}

fn build_search_body(query: &ScrapeQuery) -> Value {
    json!({
        "site_name": query.sources,
        "search_term": query.search_term,
        "location": query.location,
        "results_wanted": query.results_wanted,
        "hours_old": query.hours_old,
        "country_indeed": query.country_hint,
        "google_search_term": query.natural_language_query,
    })
}

fn decode_jobs(body: &str) -> Result<Vec<JobRecord>, ScrapeError> {
    match serde_json::from_str::<SearchResponse>(body) {
        Ok(SearchResponse::Envelope { jobs } | SearchResponse::Bare(jobs)) => Ok(jobs),
        Err(e) => Err(ScrapeError::Decode(e.to_string())),
    }
}

#[async_trait]
impl JobScraper for JobSpyApiScraper {
    async fn scrape(&self, query: &ScrapeQuery) -> Result<Vec<JobRecord>, ScrapeError> {
        let url = self.endpoint_url();
        debug!(
            url = %url,
            sources = ?query.sources,
            search_term = %query.search_term,
            location = %query.location,
            "JobSpy request"
        );

        let mut request = self.client.post(url).json(&build_search_body(query));
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ScrapeError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                body: truncate_str(&body, ERROR_BODY_LIMIT),
            });
        }

        let jobs = decode_jobs(&body)?;
        debug!(count = jobs.len(), "JobSpy response decoded");
        Ok(jobs)
    }
}
