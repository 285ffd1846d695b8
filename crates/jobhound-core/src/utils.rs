//! Utility functions shared by the runtime and transports.

use anyhow::Result;
use std::time::Duration;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::Retry;
use tracing::warn;

/// Truncate a string to at most `max_chars` characters (not bytes).
///
/// # Examples
///
/// ```
/// use jobhound_core::utils::truncate_str;
/// let s = "Stellenangebot für Jurist:innen";
/// assert_eq!(truncate_str(s, 17), "Stellenangebot fü");
/// ```
pub fn truncate_str(s: impl AsRef<str>, max_chars: usize) -> String {
    let s = s.as_ref();
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    s.char_indices()
        .nth(max_chars)
        .map_or_else(|| s.to_string(), |(pos, _)| s[..pos].to_string())
}

/// Retry a chat transport operation with exponential backoff and jitter.
///
/// - Initial delay: 500ms
/// - Max delay: 4s
/// - Max attempts: 3 (see constants in `config.rs`)
///
/// # Errors
///
/// Returns the last error if every attempt fails.
///
/// # Examples
///
/// ```no_run
/// use jobhound_core::utils::retry_transport_operation;
/// use anyhow::Result;
///
/// async fn send() -> Result<()> {
///     Ok(())
/// }
///
/// # async fn example() -> Result<()> {
/// retry_transport_operation(|| async { send().await }).await?;
/// # Ok(())
/// # }
/// ```
pub async fn retry_transport_operation<F, Fut, T>(operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    use crate::config::{
        TELEGRAM_API_INITIAL_BACKOFF_MS, TELEGRAM_API_MAX_BACKOFF_MS, TELEGRAM_API_MAX_RETRIES,
    };

    let retry_strategy = ExponentialBackoff::from_millis(TELEGRAM_API_INITIAL_BACKOFF_MS)
        .max_delay(Duration::from_millis(TELEGRAM_API_MAX_BACKOFF_MS))
        .map(jitter)
        .take(TELEGRAM_API_MAX_RETRIES);

    Retry::spawn(retry_strategy, operation).await.map_err(|e| {
        warn!(
            "Transport operation failed after {} attempts: {}",
            TELEGRAM_API_MAX_RETRIES, e
        );
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_truncate_str_unicode() {
        let s = "Köln, Düsseldorf";
        assert_eq!(truncate_str(s, 4), "Köln");
        assert_eq!(truncate_str(s, 50), "Köln, Düsseldorf");
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_transient_failure() -> Result<()> {
        let counter = AtomicUsize::new(0);
        let attempts = &counter;
        let value = retry_transport_operation(|| async move {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                anyhow::bail!("connection reset");
            }
            Ok(42)
        })
        .await?;

        assert_eq!(value, 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_retry_gives_up() {
        let counter = AtomicUsize::new(0);
        let attempts = &counter;
        let result: Result<()> = retry_transport_operation(|| async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("still down")
        })
        .await;

        assert!(result.is_err());
        // First try plus TELEGRAM_API_MAX_RETRIES retries
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }
}
