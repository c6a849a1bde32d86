//! Trait definitions for the image search domain.
//!
//! These traits enable dependency injection and easy testing through mocking.

use async_trait::async_trait;
use time::OffsetDateTime;

use super::types::{ImageResult, SearchRecord, TermCount};
use crate::domain::models::UserId;

/// Error type for search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search term must not be empty")]
    EmptyTerm,

    #[error("image provider request failed: {0}")]
    Provider(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for SearchError {
    fn from(e: sqlx::Error) -> Self {
        SearchError::Database(e.to_string())
    }
}

impl From<unsplash::UnsplashFetchError> for SearchError {
    fn from(e: unsplash::UnsplashFetchError) -> Self {
        SearchError::Provider(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Trait for querying the external image provider.
///
/// Abstracts the provider (Unsplash) so the service is testable with a fake
/// provider, without network access.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Search images for a term, requesting at most `per_page` results.
    /// Results keep the provider's ordering.
    async fn search_images(&self, term: &str, per_page: u8) -> Result<Vec<ImageResult>>;
}

/// Trait for the durable search-record log.
///
/// The log is append-only: the store assigns `id` and `timestamp` at insert
/// time and an existing record is never mutated, only deleted. Each insert
/// and each delete is a single atomic operation.
#[async_trait]
pub trait SearchRecordStore: Send + Sync {
    /// Append one record for a successfully served search.
    async fn append(&self, user_id: UserId, term: &str) -> Result<SearchRecord>;

    /// Most recent records owned by `user_id`, newest first; ties on
    /// timestamp are broken by insertion order.
    async fn recent_for_user(&self, user_id: UserId, limit: i64) -> Result<Vec<SearchRecord>>;

    /// Most frequent terms across all users' records (exact, case-sensitive
    /// grouping), count descending, then term ascending.
    async fn top_terms(&self, limit: i64) -> Result<Vec<TermCount>>;

    /// Delete records owned by `user_id`. With `since`, only records with
    /// `timestamp >= since` are removed. Returns the deleted count.
    async fn delete_for_user(
        &self,
        user_id: UserId,
        since: Option<OffsetDateTime>,
    ) -> Result<u64>;

    /// Delete every record for every user. Returns the deleted count.
    async fn delete_all(&self) -> Result<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Verify traits are object-safe (can be used as trait objects)
    fn _assert_provider_object_safe(_: &dyn ImageProvider) {}
    fn _assert_store_object_safe(_: &dyn SearchRecordStore) {}

    #[test]
    fn search_error_from_sqlx() {
        let err: SearchError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, SearchError::Database(_)));
    }

    #[test]
    fn search_error_from_provider_fetch() {
        let err: SearchError = unsplash::UnsplashFetchError::Unauthorized.into();
        assert!(matches!(err, SearchError::Provider(_)));
    }
}
