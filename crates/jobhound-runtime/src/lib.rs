#![deny(missing_docs)]
//! Jobhound runtime helpers.
//!
//! Transport-agnostic orchestration of searches and page navigation.

/// Scoped "processing" notice handle.
pub mod notice;
/// Off-loop scrape execution with a deadline.
pub mod scrape;
/// Search and navigation flows.
pub mod service;
/// Per-conversation result set storage.
pub mod session;
/// Chat transport seam.
pub mod transport;

pub use notice::ProcessingNotice;
pub use scrape::ScrapeRunner;
pub use service::{IgnoreReason, NavigationOutcome, SearchOutcome, SearchService};
pub use session::SessionStore;
pub use transport::{MessageHandle, SearchTransport};
