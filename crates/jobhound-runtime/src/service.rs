//! Search and navigation flows.
//!
//! `handle_query` turns a text message into a stored result set, a first
//! page and a CSV attachment. `handle_navigation` re-renders a stored result
//! set after a button click. Neither returns an error: every failure is
//! reported to the user through the transport and summarized in the outcome.

use crate::notice::ProcessingNotice;
use crate::scrape::ScrapeRunner;
use crate::session::SessionStore;
use crate::transport::SearchTransport;
use jobhound_core::config::SearchSettings;
use jobhound_core::error::{FormatError, SearchError};
use jobhound_core::export::ExportFile;
use jobhound_core::pagination::{NavPayload, ResultSet};
use jobhound_core::scraper::ScrapeQuery;
use jobhound_core::search::SearchRequest;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// How a text query ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The text was not a valid query; nothing was scraped
    Rejected(FormatError),
    /// The scrape found nothing; no result set was stored
    NoResults,
    /// Results were stored and the first page and export were sent
    Delivered {
        /// Number of records found
        records: usize,
        /// Number of pages
        pages: usize,
    },
    /// The search failed; the user got an error reply
    Failed(String),
}

/// Why a button click did not change anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The payload is not a navigation button
    InvalidPayload,
    /// The conversation has no stored search (never searched or expired)
    NoSession,
    /// The target page does not exist in the stored search
    OutOfRange,
}

/// How a button click ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The message now shows this zero-based page
    Rendered(usize),
    /// The click was acknowledged and otherwise ignored
    Ignored(IgnoreReason),
    /// The page was selected but the message could not be edited
    Failed(String),
}

/// Orchestrates searches and page navigation for all conversations.
pub struct SearchService<Id: Hash + Eq + Clone + Send + Sync + Debug + 'static> {
    runner: ScrapeRunner,
    sessions: Arc<SessionStore<Id>>,
    settings: Arc<SearchSettings>,
}

impl<Id: Hash + Eq + Clone + Send + Sync + Debug + 'static> SearchService<Id> {
    /// Create a service from its collaborators.
    #[must_use]
    pub fn new(
        runner: ScrapeRunner,
        sessions: Arc<SessionStore<Id>>,
        settings: Arc<SearchSettings>,
    ) -> Self {
        Self {
            runner,
            sessions,
            settings,
        }
    }

    /// Session storage backing this service.
    #[must_use]
    pub fn sessions(&self) -> &SessionStore<Id> {
        &self.sessions
    }

    /// Handle a free-text search query.
    pub async fn handle_query<T: SearchTransport + ?Sized>(
        &self,
        transport: &T,
        session: Id,
        raw_text: &str,
    ) -> SearchOutcome {
        let request = match SearchRequest::parse(raw_text) {
            Ok(request) => request,
            Err(e) => {
                info!(session = ?session, error = %e, "Rejected malformed query");
                reply_error(transport, &e.to_string()).await;
                return SearchOutcome::Rejected(e);
            }
        };

        info!(
            session = ?session,
            search_term = %request.search_term(),
            location = %request.location(),
            "Search requested"
        );

        let notice = match ProcessingNotice::open(transport, &request).await {
            Ok(notice) => notice,
            Err(e) => {
                error!(session = ?session, error = %e, "Failed to send processing notice");
                return SearchOutcome::Failed(e.to_string());
            }
        };

        match self.search(transport, session.clone(), &request).await {
            Ok((records, pages)) => {
                if let Err(e) = notice.dismiss().await {
                    warn!(session = ?session, error = %e, "Failed to delete processing notice");
                }
                info!(session = ?session, records, pages, "Search delivered");
                SearchOutcome::Delivered { records, pages }
            }
            Err(SearchError::EmptyResult) => {
                if let Err(e) = notice.replace_with_no_results().await {
                    warn!(session = ?session, error = %e, "Failed to edit processing notice");
                }
                info!(session = ?session, "Search found no jobs");
                SearchOutcome::NoResults
            }
            Err(e) => {
                error!(session = ?session, error = %e, "Search failed");
                if let Err(e) = notice.dismiss().await {
                    warn!(session = ?session, error = %e, "Failed to delete processing notice");
                }
                let message = e.to_string();
                reply_error(transport, &message).await;
                SearchOutcome::Failed(message)
            }
        }
    }

    /// Scrape, render page 0, store the result set and attach the export.
    async fn search<T: SearchTransport + ?Sized>(
        &self,
        transport: &T,
        session: Id,
        request: &SearchRequest,
    ) -> Result<(usize, usize), SearchError> {
        let query = ScrapeQuery::new(request, &self.settings);
        let records = self.runner.run(query).await?;

        let export = ExportFile::for_search(request, &records);
        let results = ResultSet::new(request, records).ok_or(SearchError::EmptyResult)?;
        let summary = (results.records().len(), results.total_pages());

        transport
            .show_page(&results.current_view())
            .await
            .map_err(|e| SearchError::Delivery(e.to_string()))?;
        self.sessions.replace(session, results).await;

        transport
            .send_export(&export)
            .await
            .map_err(|e| SearchError::Delivery(e.to_string()))?;

        Ok(summary)
    }

    /// Handle a navigation button click carrying `payload`.
    ///
    /// The click is always acknowledged, including when it is ignored.
    pub async fn handle_navigation<T: SearchTransport + ?Sized>(
        &self,
        transport: &T,
        session: &Id,
        payload: &str,
    ) -> NavigationOutcome {
        let outcome = self.navigate(transport, session, payload).await;

        if let Err(e) = transport.acknowledge().await {
            warn!(session = ?session, error = %e, "Failed to acknowledge button click");
        }
        outcome
    }

    async fn navigate<T: SearchTransport + ?Sized>(
        &self,
        transport: &T,
        session: &Id,
        payload: &str,
    ) -> NavigationOutcome {
        let payload = match payload.parse::<NavPayload>() {
            Ok(payload) => payload,
            Err(e) => {
                debug!(session = ?session, error = %e, "Ignoring unknown callback");
                return NavigationOutcome::Ignored(IgnoreReason::InvalidPayload);
            }
        };

        let Some(entry) = self.sessions.get(session).await else {
            debug!(session = ?session, "Ignoring navigation without a stored search");
            return NavigationOutcome::Ignored(IgnoreReason::NoSession);
        };

        let mut results = entry.lock().await;
        let Some(page) = results.navigate(payload) else {
            debug!(
                session = ?session,
                target_page = payload.target_page,
                total_pages = results.total_pages(),
                "Ignoring stale navigation"
            );
            return NavigationOutcome::Ignored(IgnoreReason::OutOfRange);
        };

        match transport.update_page(&results.current_view()).await {
            Ok(()) => {
                debug!(session = ?session, page, "Page re-rendered");
                NavigationOutcome::Rendered(page)
            }
            Err(e) => {
                warn!(session = ?session, page, error = %e, "Failed to re-render page");
                NavigationOutcome::Failed(e.to_string())
            }
        }
    }
}

async fn reply_error<T: SearchTransport + ?Sized>(transport: &T, message: &str) {
    if let Err(e) = transport.send_error(message).await {
        error!(error = %e, "Failed to send error reply");
    }
}
