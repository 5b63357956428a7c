//! Persistence layer: a schemaless document store.
//!
//! Provides the [`DocumentStore`] trait for inserting and querying JSON
//! documents grouped into named collections. The production implementation
//! keeps documents in a PostgreSQL JSONB table via `sqlx::PgPool`; the
//! in-process [`MemoryStore`] backs local development and tests.

pub mod document;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

pub use document::{Document, Filter, ID_FIELD, Projection, from_document, to_document};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::config::DatabaseConfig;

/// Collection holding status check documents.
pub const STATUS_CHECKS: &str = "status_checks";

/// Collection holding contact form submissions.
pub const CONTACT_SUBMISSIONS: &str = "contact_submissions";

/// Errors raised by a [`DocumentStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database driver failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure at startup.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored document could not be decoded into the expected shape.
    #[error("failed to decode document: {0}")]
    Decode(String),

    /// The store has been closed.
    #[error("document store is closed")]
    Closed,
}

/// Async document store shared by all request handlers.
///
/// Implementations must be safe for concurrent use; a single instance is
/// created at startup and shared as `Arc<dyn DocumentStore>`.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Inserts a document into `collection`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn insert(&self, collection: &str, document: Document) -> Result<(), StoreError>;

    /// Returns at most `limit` documents from `collection` matching
    /// `filter`, shaped by `projection`, in insertion order.
    ///
    /// Documents carry the store's internal identity under [`ID_FIELD`]
    /// unless the projection removes it.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on backend failure.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: &Projection,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError>;

    /// Checks that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend does not answer.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases the underlying connections. Called once at shutdown.
    async fn close(&self);
}

/// Opens the store selected by `config`.
///
/// `memory://` URLs select [`MemoryStore`]; anything else is treated as a
/// PostgreSQL connection string.
///
/// # Errors
///
/// Returns a [`StoreError`] if the database cannot be reached or migrated.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    if config.is_memory() {
        tracing::warn!(db = %config.name, "using in-memory document store; data is not durable");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let store = PostgresStore::connect(config).await?;
    Ok(Arc::new(store))
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A store whose every operation fails.

    use super::*;

    /// Simulates an unreachable backend.
    #[derive(Debug, Default)]
    pub(crate) struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn insert(&self, _collection: &str, _document: Document) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn find(
            &self,
            _collection: &str,
            _filter: &Filter,
            _projection: &Projection,
            _limit: usize,
        ) -> Result<Vec<Document>, StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn close(&self) {}
    }
}
