//! Repository Module
//!
//! Per-entity data access over the embedded store. Every operation is a
//! single filtered statement; multi-step flows are composed by the services
//! with no transaction spanning the statements.

pub mod customer;
pub mod order;
pub mod payment;
pub mod product;

pub use customer::CustomerRepository;
pub use order::OrderRepository;
pub use payment::PaymentRepository;
pub use product::ProductRepository;

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Map a store error to `Duplicate` when a UNIQUE index rejected the write
pub(crate) fn map_unique_violation(err: surrealdb::Error, what: &str) -> RepoError {
    let msg = err.to_string();
    let lower = msg.to_lowercase();
    if lower.contains("unique")
        || lower.contains("already contains")
        || lower.contains("already exists")
        || lower.contains("duplicate")
    {
        RepoError::Duplicate(what.to_string())
    } else {
        RepoError::Database(msg)
    }
}

#[derive(Debug, Deserialize)]
struct SequenceRow {
    value: i64,
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Allocate the next integer id for `table` from its sequence row
    pub async fn next_id(&self, table: &str) -> RepoResult<i64> {
        let rows: Vec<SequenceRow> = self
            .db
            .query("UPSERT type::thing('sequence', $tb) SET value = (value ?? 0) + 1 RETURN AFTER")
            .bind(("tb", table.to_string()))
            .await?
            .take(0)?;

        rows.into_iter()
            .next()
            .map(|row| row.value)
            .ok_or_else(|| RepoError::Database(format!("Failed to advance sequence for {table}")))
    }
}
