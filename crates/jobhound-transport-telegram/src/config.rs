//! Telegram transport settings.

use jobhound_core::config::{build_config, SearchSettings, StartupConfigError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Telegram transport settings loaded from environment variables.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramSettings {
    /// Telegram Bot API token (`TELEGRAM_BOT_TOKEN`).
    pub telegram_bot_token: Option<String>,
}

impl TelegramSettings {
    /// Load settings from config files and environment, requiring a token.
    ///
    /// # Errors
    ///
    /// Returns `StartupConfigError::Load` if loading fails and
    /// `StartupConfigError::MissingToken` if no token is configured.
    pub fn new() -> Result<Self, StartupConfigError> {
        let settings: Self = build_config()?.try_deserialize()?;
        settings.ensure_token()?;
        Ok(settings)
    }

    /// Check that a non-blank token is present.
    ///
    /// # Errors
    ///
    /// Returns `StartupConfigError::MissingToken` otherwise.
    pub fn ensure_token(&self) -> Result<(), StartupConfigError> {
        match self.telegram_bot_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(()),
            _ => Err(StartupConfigError::MissingToken),
        }
    }

    /// The configured token, trimmed; empty if absent.
    #[must_use]
    pub fn token(&self) -> &str {
        self.telegram_bot_token.as_deref().map_or("", str::trim)
    }
}

/// Combined settings used by the Telegram transport layer.
#[derive(Clone)]
pub struct BotSettings {
    /// Search settings shared across transport handlers.
    pub search: Arc<SearchSettings>,
    /// Telegram-specific settings.
    pub telegram: Arc<TelegramSettings>,
}

impl BotSettings {
    /// Create a new combined settings bundle.
    #[must_use]
    pub fn new(search: SearchSettings, telegram: TelegramSettings) -> Self {
        Self {
            search: Arc::new(search),
            telegram: Arc::new(telegram),
        }
    }

    /// Deadline for a single scrape.
    #[must_use]
    pub fn scrape_timeout(&self) -> Duration {
        Duration::from_secs(self.search.scrape_timeout_secs)
    }

    /// Idle lifetime of a chat's stored search.
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.search.session_ttl_secs)
    }
}
