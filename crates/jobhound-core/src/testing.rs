//! Testing helpers and fixtures.

use crate::jobs::JobRecord;
use crate::search::SearchRequest;

/// The canonical `"legal counsel, Berlin"` request.
///
/// # Panics
///
/// Never: the literal is a valid query.
#[must_use]
pub fn request() -> SearchRequest {
    match SearchRequest::parse("legal counsel, Berlin") {
        Ok(request) => request,
        Err(e) => panic!("fixture query rejected: {e}"),
    }
}

/// `n` records titled `Job 1` .. `Job n`, each with a distinct URL.
#[must_use]
pub fn numbered_records(n: usize) -> Vec<JobRecord> {
    (1..=n)
        .map(|i| JobRecord {
            title: Some(format!("Job {i}")),
            company: Some(format!("Company {i}")),
            location: Some("Berlin".to_string()),
            date_posted: Some("2025-03-01".to_string()),
            job_url: Some(format!("https://example.com/jobs/{i}")),
            job_url_direct: None,
        })
        .collect()
}
