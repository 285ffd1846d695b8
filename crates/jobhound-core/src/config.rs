//! Configuration and settings management
//!
//! Loads search/scraper settings from config files and environment variables
//! and defines the fixed search constants.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of job records shown per page.
pub const PAGE_SIZE: usize = 5;

/// Listing sources queried when `JOB_SOURCES` is not set.
pub const DEFAULT_SOURCES: &[&str] = &["indeed", "linkedin", "glassdoor", "google"];
/// Maximum number of postings requested per search.
pub const DEFAULT_RESULTS_WANTED: u32 = 50;
/// Recency window for postings, in hours.
pub const DEFAULT_HOURS_OLD: u32 = 72;
/// Country hint passed to sources that need one (Indeed, Glassdoor).
pub const DEFAULT_COUNTRY: &str = "Germany";
/// Base URL of the JobSpy API sidecar.
pub const DEFAULT_JOBSPY_API_URL: &str = "http://localhost:8000";
/// Upper bound for a single scrape call, in seconds.
pub const DEFAULT_SCRAPE_TIMEOUT_SECS: u64 = 300;
/// Idle lifetime of a conversation's result set, in seconds (24 hours).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;
/// Maximum number of conversations kept in memory.
pub const DEFAULT_SESSION_MAX_CAPACITY: u64 = 10_000;

// Telegram API retry configuration
/// Maximum retry attempts for Telegram API calls
pub const TELEGRAM_API_MAX_RETRIES: usize = 3;
/// Initial backoff for Telegram API retries, in milliseconds
pub const TELEGRAM_API_INITIAL_BACKOFF_MS: u64 = 500;
/// Maximum backoff for Telegram API retries, in milliseconds
pub const TELEGRAM_API_MAX_BACKOFF_MS: u64 = 4000;

/// Fatal configuration problems detected at startup.
#[derive(Debug, Error)]
pub enum StartupConfigError {
    /// The configuration sources could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),
    /// The bot access token is absent or empty
    #[error("TELEGRAM_BOT_TOKEN environment variable not set")]
    MissingToken,
}

/// Build the layered configuration shared by every settings struct.
///
/// Sources, lowest priority first: `config/default`, `config/{RUN_MODE}`,
/// `config/local`, `APP__`-prefixed env vars, plain env vars.
///
/// # Errors
///
/// Returns a `ConfigError` if any present source is malformed.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Local overrides, not checked into git
        .add_source(File::with_name("config/local").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        // UPPER_SNAKE_CASE env vars map to snake_case keys; empty ones count as unset
        .add_source(Environment::default().ignore_empty(true))
        .build()
}

/// Settings for the scraping collaborator and session lifecycle.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchSettings {
    /// Base URL of the JobSpy API sidecar
    #[serde(default = "default_jobspy_api_url")]
    pub jobspy_api_url: String,
    /// Optional API key sent as `x-api-key`
    pub jobspy_api_key: Option<String>,
    /// Comma/space separated list of listing sources
    #[serde(rename = "job_sources")]
    pub job_sources_str: Option<String>,
    /// Country hint for sources that need one
    #[serde(default = "default_country")]
    pub country_indeed: String,
    /// Maximum number of postings requested per search
    #[serde(default = "default_results_wanted")]
    pub results_wanted: u32,
    /// Recency window for postings, in hours
    #[serde(default = "default_hours_old")]
    pub hours_old: u32,
    /// Upper bound for a single scrape call, in seconds
    #[serde(default = "default_scrape_timeout_secs")]
    pub scrape_timeout_secs: u64,
    /// Idle lifetime of a conversation's result set, in seconds
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    /// Maximum number of conversations kept in memory
    #[serde(default = "default_session_max_capacity")]
    pub session_max_capacity: u64,
}

fn default_jobspy_api_url() -> String {
    DEFAULT_JOBSPY_API_URL.to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

const fn default_results_wanted() -> u32 {
    DEFAULT_RESULTS_WANTED
}

const fn default_hours_old() -> u32 {
    DEFAULT_HOURS_OLD
}

const fn default_scrape_timeout_secs() -> u64 {
    DEFAULT_SCRAPE_TIMEOUT_SECS
}

const fn default_session_ttl_secs() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

const fn default_session_max_capacity() -> u64 {
    DEFAULT_SESSION_MAX_CAPACITY
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            jobspy_api_url: default_jobspy_api_url(),
            jobspy_api_key: None,
            job_sources_str: None,
            country_indeed: default_country(),
            results_wanted: DEFAULT_RESULTS_WANTED,
            hours_old: DEFAULT_HOURS_OLD,
            scrape_timeout_secs: DEFAULT_SCRAPE_TIMEOUT_SECS,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            session_max_capacity: DEFAULT_SESSION_MAX_CAPACITY,
        }
    }
}

impl SearchSettings {
    /// Load search settings from config files and environment.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use jobhound_core::config::SearchSettings;
    ///
    /// let settings = SearchSettings::new().expect("Failed to load configuration");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn new() -> Result<Self, ConfigError> {
        build_config()?.try_deserialize()
    }

    /// Listing sources to query, falling back to [`DEFAULT_SOURCES`].
    #[must_use]
    pub fn sources(&self) -> Vec<String> {
        let parsed: Vec<String> = self
            .job_sources_str
            .as_deref()
            .map(|s| {
                s.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(str::to_lowercase)
                    .collect()
            })
            .unwrap_or_default();

        if parsed.is_empty() {
            DEFAULT_SOURCES.iter().map(|s| (*s).to_string()).collect()
        } else {
            parsed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_search_contract() {
        let settings = SearchSettings::default();
        assert_eq!(settings.results_wanted, 50);
        assert_eq!(settings.hours_old, 72);
        assert_eq!(settings.country_indeed, "Germany");
        assert_eq!(
            settings.sources(),
            vec!["indeed", "linkedin", "glassdoor", "google"]
        );
    }

    #[test]
    fn test_sources_parsing() {
        let mut settings = SearchSettings::default();

        settings.job_sources_str = Some("Indeed, linkedin".to_string());
        assert_eq!(settings.sources(), vec!["indeed", "linkedin"]);

        settings.job_sources_str = Some("google;glassdoor zip_recruiter".to_string());
        assert_eq!(
            settings.sources(),
            vec!["google", "glassdoor", "zip_recruiter"]
        );

        // Blank value falls back to the defaults
        settings.job_sources_str = Some(" , ".to_string());
        assert_eq!(settings.sources().len(), DEFAULT_SOURCES.len());
    }
}
