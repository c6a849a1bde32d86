//! PostgreSQL-backed search-record store.

use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::domain::models::UserId;
use crate::domain::search::traits::{Result, SearchRecordStore};
use crate::domain::search::types::{SearchRecord, TermCount};

/// Append-only log of search records in Postgres.
///
/// `id` and `timestamp` come from the database (`BIGSERIAL` / `now()`), so
/// history ordering reflects insert order even when concurrent searches
/// complete out of order.
#[derive(Clone)]
pub struct PgSearchRecordStore {
    pool: PgPool,
}

impl PgSearchRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SearchRecordStore for PgSearchRecordStore {
    async fn append(&self, user_id: UserId, term: &str) -> Result<SearchRecord> {
        let record = sqlx::query_as::<_, SearchRecord>(
            r#"
            INSERT INTO search_records (user_id, term)
            VALUES ($1, $2)
            RETURNING id, user_id, term, "timestamp"
            "#,
        )
        .bind(user_id.as_i32())
        .bind(term)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn recent_for_user(&self, user_id: UserId, limit: i64) -> Result<Vec<SearchRecord>> {
        let records = sqlx::query_as::<_, SearchRecord>(
            r#"
            SELECT id, user_id, term, "timestamp"
            FROM search_records
            WHERE user_id = $1
            ORDER BY "timestamp" DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_i32())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn top_terms(&self, limit: i64) -> Result<Vec<TermCount>> {
        let terms = sqlx::query_as::<_, TermCount>(
            r#"
            SELECT term, COUNT(*) AS count
            FROM search_records
            GROUP BY term
            ORDER BY count DESC, term ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(terms)
    }

    async fn delete_for_user(
        &self,
        user_id: UserId,
        since: Option<OffsetDateTime>,
    ) -> Result<u64> {
        let result = match since {
            Some(cutoff) => {
                sqlx::query(
                    r#"
                    DELETE FROM search_records
                    WHERE user_id = $1 AND "timestamp" >= $2
                    "#,
                )
                .bind(user_id.as_i32())
                .bind(cutoff)
                .execute(&self.pool)
                .await?
            }
            None => {
                sqlx::query("DELETE FROM search_records WHERE user_id = $1")
                    .bind(user_id.as_i32())
                    .execute(&self.pool)
                    .await?
            }
        };

        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM search_records")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
