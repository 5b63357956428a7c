//! PostgreSQL implementation of the document store.
//!
//! All collections share one `documents` table; each row stores the
//! collection name and the document as JSONB. The `seq` column is the
//! store's internal identity and is surfaced as `_id`.
//!
//! `jsonb` cannot hold U+0000, so NUL characters are removed from strings
//! and keys on the way in.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use super::{Document, DocumentStore, Filter, ID_FIELD, Projection, StoreError};
use crate::config::DatabaseConfig;

/// PostgreSQL-backed document store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database named in `config` and runs the embedded
    /// migrations.
    ///
    /// The logical database name overrides whatever database the URL names.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the URL is invalid, the database cannot
    /// be reached, or a migration fails.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = PgConnectOptions::from_str(&config.url)?.database(&config.name);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!(
            db = %config.name,
            max_connections = config.max_connections,
            "connected to document store"
        );
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn insert(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO documents (collection, body) VALUES ($1, $2)")
            .bind(collection)
            .bind(strip_nul(Value::Object(document)))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: &Projection,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let conditions = strip_nul(Value::Object(filter.as_document().clone()));
        let rows = sqlx::query_as::<_, (i64, Value)>(
            "SELECT seq, body FROM documents \
             WHERE collection = $1 AND body @> $2 ORDER BY seq ASC LIMIT $3",
        )
        .bind(collection)
        .bind(conditions.clone())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let exact = exact_filter(conditions);
        let mut documents = Vec::with_capacity(rows.len());
        for (seq, body) in rows {
            if let Some(document) = decode_row(collection, seq, body, &exact, projection)? {
                documents.push(document);
            }
        }
        Ok(documents)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("document store connection pool closed");
    }
}

/// Removes NUL characters from every string and key in `value`.
fn strip_nul(value: Value) -> Value {
    fn clean(text: String) -> String {
        if text.contains('\0') {
            text.replace('\0', "")
        } else {
            text
        }
    }

    match value {
        Value::String(text) => Value::String(clean(text)),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nul).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, value)| (clean(key), strip_nul(value)))
                .collect(),
        ),
        other => other,
    }
}

// `@>` is containment, so `[1]` selects a stored `[1, 2]`. Rows are
// re-checked with exact equality.
fn exact_filter(conditions: Value) -> Filter {
    match conditions {
        Value::Object(fields) => fields
            .into_iter()
            .fold(Filter::all(), |filter, (field, value)| filter.eq(field, value)),
        _ => Filter::all(),
    }
}

fn decode_row(
    collection: &str,
    seq: i64,
    body: Value,
    filter: &Filter,
    projection: &Projection,
) -> Result<Option<Document>, StoreError> {
    match body {
        Value::Object(mut document) => {
            if !filter.matches(&document) {
                return Ok(None);
            }
            document.insert(ID_FIELD.to_string(), Value::from(seq));
            Ok(Some(projection.apply(document)))
        }
        other => Err(StoreError::Decode(format!(
            "row {seq} in {collection} is not an object: {other}"
        ))),
    }
}
