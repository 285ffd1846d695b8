//! Off-loop execution of scrape calls.

use jobhound_core::jobs::JobRecord;
use jobhound_core::scraper::{JobScraper, ScrapeError, ScrapeQuery};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Runs scrapes on their own Tokio task with a deadline.
///
/// The dispatch loop keeps serving other conversations while a scrape is in
/// flight. A scrape that overruns the deadline is aborted.
#[derive(Clone)]
pub struct ScrapeRunner {
    scraper: Arc<dyn JobScraper>,
    timeout: Duration,
}

impl ScrapeRunner {
    /// Create a runner around a scraper.
    #[must_use]
    pub fn new(scraper: Arc<dyn JobScraper>, timeout: Duration) -> Self {
        Self { scraper, timeout }
    }

    /// Configured deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one scrape.
    ///
    /// # Errors
    ///
    /// Returns the scraper's own error, `ScrapeError::Timeout` when the
    /// deadline passes, or `ScrapeError::Join` if the task panicked.
    pub async fn run(&self, query: ScrapeQuery) -> Result<Vec<JobRecord>, ScrapeError> {
        let scraper = Arc::clone(&self.scraper);
        let started = Instant::now();
        let mut task = tokio::spawn(async move { scraper.scrape(&query).await });

        let result = match tokio::time::timeout(self.timeout, &mut task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ScrapeError::Join(join_error.to_string())),
            Err(_) => {
                task.abort();
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Scrape deadline exceeded, task aborted"
                );
                Err(ScrapeError::Timeout(self.timeout.as_secs()))
            }
        };

        info!(
            elapsed_ms = started.elapsed().as_millis(),
            ok = result.is_ok(),
            "Scrape finished"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jobhound_core::config::SearchSettings;
    use jobhound_core::scraper::MockJobScraper;
    use jobhound_core::search::SearchRequest;

    fn query() -> ScrapeQuery {
        let request = match SearchRequest::parse("legal counsel, Berlin") {
            Ok(request) => request,
            Err(e) => panic!("fixture rejected: {e}"),
        };
        ScrapeQuery::new(&request, &SearchSettings::default())
    }

    struct SlowScraper;

    #[async_trait]
    impl JobScraper for SlowScraper {
        async fn scrape(&self, _query: &ScrapeQuery) -> Result<Vec<JobRecord>, ScrapeError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Vec::new())
        }
    }

    struct PanickingScraper;

    #[async_trait]
    impl JobScraper for PanickingScraper {
        async fn scrape(&self, _query: &ScrapeQuery) -> Result<Vec<JobRecord>, ScrapeError> {
            panic!("scraper exploded");
        }
    }

    #[tokio::test]
    async fn test_passes_query_and_returns_records() {
        let mut mock = MockJobScraper::new();
        mock.expect_scrape()
            .withf(|q: &ScrapeQuery| q.search_term == "legal counsel" && q.results_wanted == 50)
            .times(1)
            .returning(|_| Ok(vec![JobRecord::default()]));

        let runner = ScrapeRunner::new(Arc::new(mock), Duration::from_secs(5));
        let records = runner.run(query()).await;
        assert_eq!(records.map(|r| r.len()), Ok(1));
    }

    #[tokio::test]
    async fn test_scraper_error_propagates() {
        let mut mock = MockJobScraper::new();
        mock.expect_scrape()
            .returning(|_| Err(ScrapeError::Request("connection refused".to_string())));

        let runner = ScrapeRunner::new(Arc::new(mock), Duration::from_secs(5));
        assert_eq!(
            runner.run(query()).await,
            Err(ScrapeError::Request("connection refused".to_string()))
        );
    }

    #[tokio::test]
    async fn test_deadline_is_enforced() {
        let runner = ScrapeRunner::new(Arc::new(SlowScraper), Duration::from_millis(50));
        let started = Instant::now();

        assert_eq!(runner.run(query()).await, Err(ScrapeError::Timeout(0)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_panicking_scraper_is_contained() {
        let runner = ScrapeRunner::new(Arc::new(PanickingScraper), Duration::from_secs(5));
        assert!(matches!(
            runner.run(query()).await,
            Err(ScrapeError::Join(_))
        ));
    }
}
