//! Per-conversation result sets and page navigation.

use crate::config::PAGE_SIZE;
use crate::jobs::JobRecord;
use crate::search::SearchRequest;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which way a navigation button points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    /// Towards page 0
    Prev,
    /// Towards the last page
    Next,
}

impl NavDirection {
    const fn tag(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }
}

/// Navigation button payload, encoded on the wire as `prev_<n>` / `next_<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavPayload {
    /// Button direction
    pub direction: NavDirection,
    /// Zero-based page the button leads to
    pub target_page: usize,
}

/// A callback payload that is not a navigation button.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid navigation payload: {0:?}")]
pub struct InvalidPayload(pub String);

impl NavPayload {
    /// Payload for the "Previous" button.
    #[must_use]
    pub const fn prev(target_page: usize) -> Self {
        Self {
            direction: NavDirection::Prev,
            target_page,
        }
    }

    /// Payload for the "Next" button.
    #[must_use]
    pub const fn next(target_page: usize) -> Self {
        Self {
            direction: NavDirection::Next,
            target_page,
        }
    }
}

impl fmt::Display for NavPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.direction.tag(), self.target_page)
    }
}

impl FromStr for NavPayload {
    type Err = InvalidPayload;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidPayload(s.to_string());

        let (tag, page) = s.split_once('_').ok_or_else(invalid)?;
        let direction = match tag {
            "prev" => NavDirection::Prev,
            "next" => NavDirection::Next,
            _ => return Err(invalid()),
        };
        // `usize::from_str` accepts a leading '+'; the wire format does not
        if !page.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let target_page = page.parse::<usize>().map_err(|_| invalid())?;

        Ok(Self {
            direction,
            target_page,
        })
    }
}

/// Number of pages needed for `len` records.
#[must_use]
pub const fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// The last completed search of a conversation.
///
/// Always holds at least one record; an empty scrape never produces one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<JobRecord>,
    search_term: String,
    location: String,
    current_page: usize,
}

impl ResultSet {
    /// Build a result set positioned on page 0.
    ///
    /// Returns `None` when `records` is empty.
    #[must_use]
    pub fn new(request: &SearchRequest, records: Vec<JobRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        Some(Self {
            records,
            search_term: request.search_term().to_string(),
            location: request.location().to_string(),
            current_page: 0,
        })
    }

    /// All records in scrape order.
    #[must_use]
    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    /// Search term of the originating query.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Location of the originating query.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Zero-based page last shown to the user.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages in this result set.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.records.len())
    }

    /// Whether `page` addresses an existing slice.
    #[must_use]
    pub fn contains_page(&self, page: usize) -> bool {
        page < self.total_pages()
    }

    /// Validate a navigation payload against the current bounds and move to its page.
    ///
    /// Returns the new current page, or `None` (state untouched) for a stale
    /// or out-of-range target.
    pub fn navigate(&mut self, payload: NavPayload) -> Option<usize> {
        if !self.contains_page(payload.target_page) {
            return None;
        }
        self.current_page = payload.target_page;
        Some(self.current_page)
    }

    /// View of the current page.
    #[must_use]
    pub fn current_view(&self) -> PageView<'_> {
        self.build_view(self.current_page)
    }

    /// View of `page`, or `None` if it is out of range.
    #[must_use]
    pub fn page_view(&self, page: usize) -> Option<PageView<'_>> {
        self.contains_page(page).then(|| self.build_view(page))
    }

    fn build_view(&self, page: usize) -> PageView<'_> {
        let start = page * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.records.len());

        PageView {
            page,
            total_pages: self.total_pages(),
            search_term: &self.search_term,
            location: &self.location,
            entries: &self.records[start..end],
            prev: (page > 0).then(|| NavPayload::prev(page - 1)),
            next: (end < self.records.len()).then(|| NavPayload::next(page + 1)),
        }
    }
}

/// Everything needed to render one page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    /// Zero-based page index
    pub page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Search term of the originating query
    pub search_term: &'a str,
    /// Location of the originating query
    pub location: &'a str,
    /// Records on this page
    pub entries: &'a [JobRecord],
    /// "Previous" button, present iff `page > 0`
    pub prev: Option<NavPayload>,
    /// "Next" button, present iff a further slice exists
    pub next: Option<NavPayload>,
}

impl PageView<'_> {
    /// One-based page number for display.
    #[must_use]
    pub const fn display_page(&self) -> usize {
        self.page + 1
    }

    /// Whether any navigation button should be shown.
    #[must_use]
    pub const fn has_controls(&self) -> bool {
        self.prev.is_some() || self.next.is_some()
    }
}
