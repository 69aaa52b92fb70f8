//! Snippet store module
//!
//! Owns the SQLite connection pool and the queries run against the
//! `snippets` table. The table itself is created from `sql/schema.sql`
//! outside the application.

mod error;
mod snippets;

use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;

use crate::config::DatabaseConfig;

pub use error::StoreError;
pub use snippets::{Snippet, SnippetModel, LATEST_LIMIT};

/// Open the connection pool and verify the database answers.
///
/// Startup treats any error here as fatal.
pub async fn connect(config: &DatabaseConfig) -> Result<SnippetModel, StoreError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.dsn)
        .await?;

    let model = SnippetModel::new(pool);
    model.ping().await?;
    Ok(model)
}

/// Single-connection in-memory database with the schema applied
#[cfg(test)]
pub async fn memory_pool() -> sqlx::SqlitePool {
    // Every in-memory connection is its own database, so cap the pool at one
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::raw_sql(include_str!("../../sql/schema.sql"))
        .execute(&pool)
        .await
        .expect("failed to apply schema");

    pool
}
