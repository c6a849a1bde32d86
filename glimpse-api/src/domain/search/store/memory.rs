//! In-memory search-record store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::models::UserId;
use crate::domain::search::traits::{Result, SearchError, SearchRecordStore};
use crate::domain::search::types::{SearchRecord, TermCount};

/// In-memory store mirroring the ordering and deletion semantics of the
/// Postgres store: ids are assigned monotonically and ties on timestamp are
/// broken by insertion order.
#[derive(Clone, Default)]
pub struct InMemorySearchRecordStore {
    records: Arc<RwLock<Vec<SearchRecord>>>,
    next_id: Arc<AtomicI64>,
    fail_appends: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl InMemorySearchRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `append` fail, for exercising the record-failure path.
    pub fn with_failing_appends(self) -> Self {
        self.fail_appends.store(true, Ordering::SeqCst);
        self
    }

    /// Insert a record with an explicit timestamp, for tests exercising
    /// time-window deletion and ordering.
    pub fn insert_at(
        &self,
        user_id: UserId,
        term: &str,
        timestamp: OffsetDateTime,
    ) -> SearchRecord {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = SearchRecord {
            id,
            user_id,
            term: term.to_string(),
            timestamp,
        };
        self.records.write().unwrap().push(record.clone());
        record
    }

    /// Number of stored records, across all users.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SearchRecordStore for InMemorySearchRecordStore {
    async fn append(&self, user_id: UserId, term: &str) -> Result<SearchRecord> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(SearchError::Database("append failed".to_string()));
        }

        Ok(self.insert_at(user_id, term, OffsetDateTime::now_utc()))
    }

    async fn recent_for_user(&self, user_id: UserId, limit: i64) -> Result<Vec<SearchRecord>> {
        let records = self.records.read().unwrap();
        let mut owned: Vec<SearchRecord> = records
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();

        owned.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        owned.truncate(limit as usize);

        Ok(owned)
    }

    async fn top_terms(&self, limit: i64) -> Result<Vec<TermCount>> {
        let records = self.records.read().unwrap();
        let mut counts: HashMap<&str, i64> = HashMap::new();
        for record in records.iter() {
            *counts.entry(record.term.as_str()).or_insert(0) += 1;
        }

        let mut terms: Vec<TermCount> = counts
            .into_iter()
            .map(|(term, count)| TermCount {
                term: term.to_string(),
                count,
            })
            .collect();

        terms.sort_by(|a, b| b.count.cmp(&a.count).then(a.term.cmp(&b.term)));
        terms.truncate(limit as usize);

        Ok(terms)
    }

    async fn delete_for_user(
        &self,
        user_id: UserId,
        since: Option<OffsetDateTime>,
    ) -> Result<u64> {
        let mut records = self.records.write().unwrap();
        let before = records.len();

        records.retain(|record| {
            if record.user_id != user_id {
                return true;
            }
            match since {
                Some(cutoff) => record.timestamp < cutoff,
                None => false,
            }
        });

        Ok((before - records.len()) as u64)
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut records = self.records.write().unwrap();
        let count = records.len() as u64;
        records.clear();

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn now() -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    #[tokio::test]
    async fn recent_for_user_orders_newest_first_with_id_tiebreak() {
        let store = InMemorySearchRecordStore::new();
        let user = UserId::new(1);
        let t = now();

        store.insert_at(user, "old", t - Duration::hours(2));
        store.insert_at(user, "tied-first", t);
        store.insert_at(user, "tied-second", t);

        let history = store.recent_for_user(user, 20).await.unwrap();
        let terms: Vec<&str> = history.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(terms, vec!["tied-second", "tied-first", "old"]);
    }

    #[tokio::test]
    async fn recent_for_user_scopes_to_owner_and_truncates() {
        let store = InMemorySearchRecordStore::new();
        let alice = UserId::new(1);
        let bob = UserId::new(2);
        let t = now();

        for i in 0..5i64 {
            store.insert_at(alice, &format!("a{i}"), t + Duration::seconds(i));
        }
        store.insert_at(bob, "b0", t);

        let history = store.recent_for_user(alice, 3).await.unwrap();
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|r| r.user_id == alice));
        assert_eq!(history[0].term, "a4");
    }

    #[tokio::test]
    async fn top_terms_breaks_count_ties_lexically() {
        let store = InMemorySearchRecordStore::new();
        let user = UserId::new(1);
        let t = now();

        store.insert_at(user, "zebra", t);
        store.insert_at(user, "apple", t);
        store.insert_at(user, "mango", t);
        store.insert_at(user, "mango", t);

        let terms = store.top_terms(10).await.unwrap();
        assert_eq!(terms[0], TermCount { term: "mango".into(), count: 2 });
        assert_eq!(terms[1].term, "apple");
        assert_eq!(terms[2].term, "zebra");
    }

    #[tokio::test]
    async fn top_terms_groups_case_sensitively() {
        let store = InMemorySearchRecordStore::new();
        let user = UserId::new(1);
        let t = now();

        store.insert_at(user, "Cat", t);
        store.insert_at(user, "cat", t);

        let terms = store.top_terms(10).await.unwrap();
        assert_eq!(terms.len(), 2);
        assert!(terms.iter().all(|tc| tc.count == 1));
    }

    #[tokio::test]
    async fn delete_for_user_with_cutoff_keeps_older_records() {
        let store = InMemorySearchRecordStore::new();
        let user = UserId::new(1);
        let t = now();

        store.insert_at(user, "old", t - Duration::hours(2));
        store.insert_at(user, "recent", t - Duration::minutes(30));

        let deleted = store
            .delete_for_user(user, Some(t - Duration::hours(1)))
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn failing_appends_surface_a_database_error() {
        let store = InMemorySearchRecordStore::new().with_failing_appends();

        let err = store.append(UserId::new(1), "cat").await.unwrap_err();
        assert!(matches!(err, SearchError::Database(_)));
        assert!(store.is_empty());
    }
}
