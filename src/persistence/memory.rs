//! In-process document store.
//!
//! [`MemoryStore`] keeps every collection in a `HashMap` behind a
//! [`tokio::sync::RwLock`]. Nothing survives a restart; it exists for local
//! development (`DATABASE_URL=memory://`) and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Document, DocumentStore, Filter, ID_FIELD, Projection, StoreError};

/// Ephemeral document store.
///
/// # Concurrency
///
/// Reads share the lock; inserts take it exclusively. Identity values come
/// from a process-wide counter, so they are unique across collections.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    next_id: AtomicU64,
    closed: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Returns `true` once [`DocumentStore::close`] has run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.is_closed() {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, mut document: Document) -> Result<(), StoreError> {
        self.ensure_open()?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        document.insert(ID_FIELD.to_string(), Value::from(id));

        let mut map = self.collections.write().await;
        map.entry(collection.to_string()).or_default().push(document);
        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: &Projection,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        self.ensure_open()?;
        let map = self.collections.read().await;
        let Some(documents) = map.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|d| filter.matches(d))
            .take(limit)
            .map(|d| projection.apply(d.clone()))
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_open()
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::info!("memory document store closed");
        }
    }
}
