//! Snippet model
//!
//! Fixed statements against the `snippets` table. Timestamps are
//! always produced by the database so the application clock never matters.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;

use super::error::StoreError;

/// Maximum number of rows returned by [`SnippetModel::latest`]
pub const LATEST_LIMIT: i64 = 10;

const INSERT_SNIPPET: &str = "INSERT INTO snippets (title, content, created, expires) \
     VALUES (?, ?, datetime('now'), datetime('now', ?))";

const SELECT_SNIPPET: &str = "SELECT id, title, content, created, expires FROM snippets \
     WHERE expires > datetime('now') AND id = ?";

const SELECT_LATEST: &str = "SELECT id, title, content, created, expires FROM snippets \
     WHERE expires > datetime('now') ORDER BY id DESC LIMIT ?";

/// A single row of the `snippets` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

/// Data access for snippets, wrapping the shared connection pool
#[derive(Debug, Clone)]
pub struct SnippetModel {
    pool: SqlitePool,
}

impl SnippetModel {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a snippet expiring `expires_days` days from now and return its id
    pub async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_days: i64,
    ) -> Result<i64, StoreError> {
        let result = sqlx::query(INSERT_SNIPPET)
            .bind(title)
            .bind(content)
            .bind(format!("{expires_days:+} days"))
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Fetch a non-expired snippet by id
    ///
    /// Returns [`StoreError::NoRecord`] when the row is missing or expired.
    pub async fn get(&self, id: i64) -> Result<Snippet, StoreError> {
        sqlx::query_as::<_, Snippet>(SELECT_SNIPPET)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => StoreError::NoRecord,
                other => StoreError::Database(other),
            })
    }

    /// The most recently inserted non-expired snippets, newest first
    ///
    /// A failure on any row fails the whole call.
    pub async fn latest(&self) -> Result<Vec<Snippet>, StoreError> {
        let snippets = sqlx::query_as::<_, Snippet>(SELECT_LATEST)
            .bind(LATEST_LIMIT)
            .fetch_all(&self.pool)
            .await?;

        Ok(snippets)
    }

    /// Round-trip a trivial statement through the pool
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to come back
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory_pool;

    async fn create_test_model() -> SnippetModel {
        SnippetModel::new(memory_pool().await)
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let model = create_test_model().await;
        let id = model
            .insert("An old silent pond", "A frog jumps into the pond", 7)
            .await
            .unwrap();

        let snippet = model.get(id).await.unwrap();
        assert_eq!(snippet.id, id);
        assert_eq!(snippet.title, "An old silent pond");
        assert_eq!(snippet.content, "A frog jumps into the pond");
        assert_eq!(snippet.expires - snippet.created, chrono::Duration::days(7));

        let drift = (Utc::now() - snippet.created).num_seconds().abs();
        assert!(drift < 60, "created too far from now: {drift}s");
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let model = create_test_model().await;
        let first = model.insert("one", "1", 1).await.unwrap();
        let second = model.insert("two", "2", 1).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_get_missing_is_no_record() {
        let model = create_test_model().await;
        let err = model.get(42).await.unwrap_err();
        assert!(err.is_no_record(), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_get_expired_is_no_record() {
        let model = create_test_model().await;
        let id = model.insert("stale", "gone yesterday", -1).await.unwrap();

        let err = model.get(id).await.unwrap_err();
        assert!(err.is_no_record(), "unexpected error: {err}");

        // The row is still there, only filtered out
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM snippets WHERE id = ?")
            .bind(id)
            .fetch_one(&model.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_latest_returns_ten_newest() {
        let model = create_test_model().await;
        let mut ids = Vec::new();
        for i in 0..11 {
            ids.push(model.insert(&format!("title {i}"), "body", 3).await.unwrap());
        }

        let latest = model.latest().await.unwrap();
        assert_eq!(latest.len(), 10);
        assert_eq!(latest[0].id, *ids.last().unwrap());
        assert!(latest.windows(2).all(|w| w[0].id > w[1].id));
        assert!(latest.iter().all(|s| s.id != ids[0]));
    }

    #[tokio::test]
    async fn test_latest_empty() {
        let model = create_test_model().await;
        assert!(model.latest().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_latest_skips_expired() {
        let model = create_test_model().await;
        let live = model.insert("live", "body", 1).await.unwrap();
        model.insert("expired", "body", -2).await.unwrap();

        let latest = model.latest().await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].id, live);
    }

    #[tokio::test]
    async fn test_closed_pool_is_database_error() {
        let model = create_test_model().await;
        model.close().await;

        assert!(matches!(model.get(1).await, Err(StoreError::Database(_))));
        assert!(matches!(model.latest().await, Err(StoreError::Database(_))));
        assert!(model.ping().await.is_err());
    }
}
