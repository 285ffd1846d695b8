//! Parsing of free-text search queries.

use crate::error::FormatError;

/// Separator between the search term and the location.
pub const QUERY_SEPARATOR: char = ',';

/// A validated `<search_term>, <location>` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    search_term: String,
    location: String,
}

impl SearchRequest {
    /// Parse user input of the form `<search_term>, <location>`.
    ///
    /// Only the first comma splits; the location may contain more commas.
    /// Both parts are trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use jobhound_core::search::SearchRequest;
    ///
    /// let request = SearchRequest::parse("legal counsel, Berlin").unwrap();
    /// assert_eq!(request.search_term(), "legal counsel");
    /// assert_eq!(request.location(), "Berlin");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a `FormatError` if the separator is missing or either part is blank.
    pub fn parse(raw: &str) -> Result<Self, FormatError> {
        let (term, location) = raw
            .split_once(QUERY_SEPARATOR)
            .ok_or(FormatError::MissingSeparator)?;

        let search_term = term.trim();
        let location = location.trim();

        if search_term.is_empty() {
            return Err(FormatError::EmptySearchTerm);
        }
        if location.is_empty() {
            return Err(FormatError::EmptyLocation);
        }

        Ok(Self {
            search_term: search_term.to_string(),
            location: location.to_string(),
        })
    }

    /// The job title or keywords.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// The location to search in.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Free-text variant of the query for sources that expect one (Google Jobs).
    #[must_use]
    pub fn natural_language_query(&self, country: &str) -> String {
        format!(
            "{} jobs near {}, {country}",
            self.search_term, self.location
        )
    }

    /// Deterministic file name for the CSV export of this search.
    ///
    /// ```
    /// use jobhound_core::search::SearchRequest;
    ///
    /// let request = SearchRequest::parse("legal counsel, Berlin").unwrap();
    /// assert_eq!(request.export_file_name(), "jobs_legal_counsel_Berlin.csv");
    /// ```
    #[must_use]
    pub fn export_file_name(&self) -> String {
        let term = strip_path_separators(&self.search_term).replace(' ', "_");
        let location = strip_path_separators(&self.location);
        format!("jobs_{term}_{location}.csv")
    }
}

fn strip_path_separators(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '/' | '\\')).collect()
}
