//! Search service tying the image provider to the search-record log.

use time::OffsetDateTime;

use super::traits::{ImageProvider, Result, SearchError, SearchRecordStore};
use super::types::{ImageResult, SearchRecord, TermCount, TimeWindow};
use crate::domain::models::UserId;

/// Configuration for the search service.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Results requested from the provider per search
    pub page_size: u8,
    /// Maximum history entries returned
    pub history_limit: i64,
    /// Maximum aggregated terms returned
    pub top_terms_limit: i64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            history_limit: 20,
            top_terms_limit: 10,
        }
    }
}

/// Service orchestrating image search, history, aggregation and retention.
///
/// # Type Parameters
///
/// * `P` - ImageProvider implementation for the external image search
/// * `S` - SearchRecordStore implementation for record persistence
pub struct ImageSearchService<P, S>
where
    P: ImageProvider,
    S: SearchRecordStore,
{
    provider: P,
    store: S,
    config: SearchConfig,
}

impl<P, S> ImageSearchService<P, S>
where
    P: ImageProvider,
    S: SearchRecordStore,
{
    pub fn new(provider: P, store: S, config: SearchConfig) -> Self {
        Self {
            provider,
            store,
            config,
        }
    }

    pub fn with_defaults(provider: P, store: S) -> Self {
        Self::new(provider, store, SearchConfig::default())
    }

    /// Run a search for `user_id` and record it.
    ///
    /// The record is appended only after the provider answered, so an
    /// existing record implies that search was actually served. A failed
    /// append is logged and does not fail the search: delivering results
    /// wins over history completeness.
    pub async fn search(&self, user_id: UserId, raw_term: &str) -> Result<Vec<ImageResult>> {
        let term = raw_term.trim();
        if term.is_empty() {
            return Err(SearchError::EmptyTerm);
        }

        let results = self
            .provider
            .search_images(term, self.config.page_size)
            .await?;

        if let Err(err) = self.store.append(user_id, term).await {
            tracing::error!(
                "Failed to record search '{}' for user {}: {}",
                term,
                user_id,
                err
            );
        }

        Ok(results)
    }

    /// The user's most recent searches, newest first.
    pub async fn history(&self, user_id: UserId) -> Result<Vec<SearchRecord>> {
        self.store
            .recent_for_user(user_id, self.config.history_limit)
            .await
    }

    /// Most frequent terms across all users.
    pub async fn top_terms(&self) -> Result<Vec<TermCount>> {
        self.store.top_terms(self.config.top_terms_limit).await
    }

    /// Delete the user's records inside `window` (all of them for
    /// [`TimeWindow::All`]). Returns the number of deleted records; clearing
    /// an already-empty history is not an error.
    pub async fn clear_history(&self, user_id: UserId, window: TimeWindow) -> Result<u64> {
        let cutoff = window.cutoff(OffsetDateTime::now_utc());
        self.store.delete_for_user(user_id, cutoff).await
    }

    /// Delete every record for every user, not just the caller's.
    pub async fn clear_all(&self) -> Result<u64> {
        self.store.delete_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::provider::MockImageProvider;
    use crate::domain::search::store::InMemorySearchRecordStore;
    use time::Duration;

    fn service(
        provider: MockImageProvider,
        store: InMemorySearchRecordStore,
    ) -> ImageSearchService<MockImageProvider, InMemorySearchRecordStore> {
        ImageSearchService::with_defaults(provider, store)
    }

    #[tokio::test]
    async fn search_trims_the_term_and_records_it() {
        let provider =
            MockImageProvider::new().with_results(vec![MockImageProvider::image("img-1")]);
        let store = InMemorySearchRecordStore::new();
        let service = service(provider, store.clone());
        let user = UserId::new(1);

        let results = service.search(user, "  cat  ").await.unwrap();

        assert_eq!(results.len(), 1);
        let history = service.history(user).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].term, "cat");
    }

    #[tokio::test]
    async fn empty_term_is_rejected_before_the_provider_is_called() {
        let provider = MockImageProvider::new();
        let store = InMemorySearchRecordStore::new();
        let service = service(provider.clone(), store.clone());

        let err = service.search(UserId::new(1), "   ").await.unwrap_err();

        assert!(matches!(err, SearchError::EmptyTerm));
        assert_eq!(provider.call_count(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn provider_failure_records_nothing() {
        let provider = MockImageProvider::new().failing("connection refused");
        let store = InMemorySearchRecordStore::new();
        let service = service(provider, store.clone());

        let err = service.search(UserId::new(1), "cat").await.unwrap_err();

        assert!(matches!(err, SearchError::Provider(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn failed_append_still_delivers_results() {
        let provider =
            MockImageProvider::new().with_results(vec![MockImageProvider::image("img-1")]);
        let store = InMemorySearchRecordStore::new().with_failing_appends();
        let service = service(provider, store.clone());

        let results = service.search(UserId::new(1), "cat").await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn history_is_newest_first_and_truncated() {
        let store = InMemorySearchRecordStore::new();
        let user = UserId::new(1);
        let t = OffsetDateTime::now_utc();
        for i in 0..25i64 {
            store.insert_at(user, &format!("term-{i}"), t + Duration::seconds(i));
        }

        let service = service(MockImageProvider::new(), store);
        let history = service.history(user).await.unwrap();

        assert_eq!(history.len(), 20);
        assert_eq!(history[0].term, "term-24");
        assert!(history
            .windows(2)
            .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    }

    #[tokio::test]
    async fn clearing_history_twice_is_idempotent() {
        let store = InMemorySearchRecordStore::new();
        let user = UserId::new(1);
        let t = OffsetDateTime::now_utc();
        store.insert_at(user, "cat", t);
        store.insert_at(user, "dog", t);

        let service = service(MockImageProvider::new(), store);

        let first = service.clear_history(user, TimeWindow::All).await.unwrap();
        let second = service.clear_history(user, TimeWindow::All).await.unwrap();

        assert_eq!(first, 2);
        assert_eq!(second, 0);
    }

    #[tokio::test]
    async fn windowed_clear_deletes_only_the_recent_slice() {
        let store = InMemorySearchRecordStore::new();
        let user = UserId::new(1);
        let t = OffsetDateTime::now_utc();
        store.insert_at(user, "old", t - Duration::hours(2));
        store.insert_at(user, "recent", t - Duration::minutes(30));
        store.insert_at(user, "fresh", t - Duration::minutes(10));

        let service = service(MockImageProvider::new(), store);

        let deleted = service
            .clear_history(user, TimeWindow::OneHour)
            .await
            .unwrap();
        assert_eq!(deleted, 2);

        let remaining = service.history(user).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].term, "old");

        let deleted = service.clear_history(user, TimeWindow::All).await.unwrap();
        assert_eq!(deleted, 1);
    }

    #[tokio::test]
    async fn top_terms_aggregate_across_users() {
        let store = InMemorySearchRecordStore::new();
        let t = OffsetDateTime::now_utc();
        let user1 = UserId::new(1);
        let user2 = UserId::new(2);
        for term in ["a", "a", "b"] {
            store.insert_at(user1, term, t);
        }
        for term in ["a", "c"] {
            store.insert_at(user2, term, t);
        }

        let service = service(MockImageProvider::new(), store);
        let terms = service.top_terms().await.unwrap();

        assert_eq!(terms[0], TermCount { term: "a".into(), count: 3 });
        // tie between b and c resolved lexically
        assert_eq!(terms[1], TermCount { term: "b".into(), count: 1 });
        assert_eq!(terms[2], TermCount { term: "c".into(), count: 1 });
    }

    #[tokio::test]
    async fn top_terms_return_at_most_ten() {
        let store = InMemorySearchRecordStore::new();
        let user = UserId::new(1);
        let t = OffsetDateTime::now_utc();
        for i in 0..12 {
            store.insert_at(user, &format!("term-{i:02}"), t);
        }

        let service = service(MockImageProvider::new(), store);
        let terms = service.top_terms().await.unwrap();

        assert_eq!(terms.len(), 10);
    }

    #[tokio::test]
    async fn clear_all_removes_every_users_records() {
        let store = InMemorySearchRecordStore::new();
        let t = OffsetDateTime::now_utc();
        store.insert_at(UserId::new(1), "cat", t);
        store.insert_at(UserId::new(2), "dog", t);

        let service = service(MockImageProvider::new(), store.clone());
        let deleted = service.clear_all().await.unwrap();

        assert_eq!(deleted, 2);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn search_then_history_then_clear_roundtrip() {
        let provider =
            MockImageProvider::new().with_results(vec![MockImageProvider::image("img-1")]);
        let store = InMemorySearchRecordStore::new();
        let service = service(provider, store);
        let user = UserId::new(7);

        let results = service.search(user, "cat").await.unwrap();
        assert!(!results.is_empty());

        let history = service.history(user).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].term, "cat");

        let terms = service.top_terms().await.unwrap();
        assert_eq!(terms[0], TermCount { term: "cat".into(), count: 1 });

        let deleted = service.clear_history(user, TimeWindow::All).await.unwrap();
        assert_eq!(deleted, 1);
        assert!(service.history(user).await.unwrap().is_empty());
    }
}
