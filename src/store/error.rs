//! Store error types

use thiserror::Error;

/// Errors returned by the snippet store
#[derive(Debug, Error)]
pub enum StoreError {
    /// No visible row for the requested identifier (missing or expired)
    #[error("no matching record found")]
    NoRecord,

    /// Any other database or connectivity failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Whether this is the domain-level not-found condition
    pub const fn is_no_record(&self) -> bool {
        matches!(self, Self::NoRecord)
    }
}
