//! Per-conversation result set storage
//!
//! Transport-agnostic: keyed by whatever identifies a conversation
//! (Telegram chat id, web session token, ...).

use jobhound_core::pagination::ResultSet;
use moka::future::Cache;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Shared handle to one conversation's result set.
pub type SessionEntry = Arc<Mutex<ResultSet>>;

/// Holds the last completed search of each conversation.
///
/// A conversation's entry is created by its first successful search,
/// replaced wholesale by every later one, and discarded after sitting idle
/// for the configured TTL or when evicted for capacity.
pub struct SessionStore<Id: Hash + Eq + Clone + Send + Sync + Debug + 'static> {
    cache: Cache<Id, SessionEntry>,
}

impl<Id: Hash + Eq + Clone + Send + Sync + Debug + 'static> SessionStore<Id> {
    /// Create a store with an idle TTL and a capacity bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use jobhound_runtime::SessionStore;
    /// use std::time::Duration;
    ///
    /// let store: SessionStore<i64> = SessionStore::new(Duration::from_secs(86_400), 10_000);
    /// assert_eq!(store.entry_count(), 0);
    /// ```
    #[must_use]
    pub fn new(idle_ttl: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(idle_ttl)
            .build();
        Self { cache }
    }

    /// Store `results` as the conversation's current search, dropping any previous one.
    pub async fn replace(&self, id: Id, results: ResultSet) {
        debug!(session = ?id, records = results.records().len(), "Result set replaced");
        self.cache.insert(id, Arc::new(Mutex::new(results))).await;
    }

    /// The conversation's current search, if any.
    pub async fn get(&self, id: &Id) -> Option<SessionEntry> {
        self.cache.get(id).await
    }

    /// Whether the conversation has a stored search.
    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.cache.contains_key(id)
    }

    /// Forget the conversation's search.
    pub async fn remove(&self, id: &Id) {
        self.cache.invalidate(id).await;
    }

    /// Approximate number of stored conversations.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobhound_core::jobs::JobRecord;
    use jobhound_core::search::SearchRequest;

    fn result_set(term: &str, n: usize) -> ResultSet {
        let request = match SearchRequest::parse(&format!("{term}, Berlin")) {
            Ok(request) => request,
            Err(e) => panic!("fixture rejected: {e}"),
        };
        match ResultSet::new(&request, vec![JobRecord::default(); n]) {
            Some(set) => set,
            None => panic!("fixture produced an empty result set"),
        }
    }

    #[tokio::test]
    async fn test_replace_is_not_a_merge() {
        let store: SessionStore<i64> = SessionStore::new(Duration::from_secs(60), 100);

        store.replace(1, result_set("counsel", 12)).await;
        store.replace(1, result_set("paralegal", 3)).await;

        let Some(entry) = store.get(&1).await else {
            panic!("session missing");
        };
        let set = entry.lock().await;
        assert_eq!(set.search_term(), "paralegal");
        assert_eq!(set.records().len(), 3);
        assert_eq!(set.current_page(), 0);
    }

    #[tokio::test]
    async fn test_sessions_are_partitioned() {
        let store: SessionStore<i64> = SessionStore::new(Duration::from_secs(60), 100);
        store.replace(1, result_set("counsel", 12)).await;

        assert!(store.contains(&1));
        assert!(!store.contains(&2));
        assert!(store.get(&2).await.is_none());
    }

    #[tokio::test]
    async fn test_remove_discards_session() {
        let store: SessionStore<i64> = SessionStore::new(Duration::from_secs(60), 100);
        store.replace(7, result_set("counsel", 1)).await;
        store.remove(&7).await;

        assert!(store.get(&7).await.is_none());
    }

    #[tokio::test]
    async fn test_idle_sessions_expire() {
        let store: SessionStore<i64> = SessionStore::new(Duration::from_millis(50), 100);
        store.replace(1, result_set("counsel", 1)).await;

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(store.get(&1).await.is_none());
    }
}
