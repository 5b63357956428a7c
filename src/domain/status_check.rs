//! Status check records.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::RecordId;
use super::timestamp::{parse_iso, to_iso};
use crate::persistence::{Document, StoreError, from_document, to_document};

/// A logged status check.
///
/// Immutable once created. `id` and `timestamp` are always assigned by the
/// server at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusCheck {
    /// Server-generated UUID.
    #[schema(value_type = String, format = Uuid)]
    pub id: RecordId,
    /// Name reported by the client.
    pub client_name: String,
    /// Creation time (UTC).
    pub timestamp: DateTime<Utc>,
}

/// Storage shape: identical fields, timestamp as an ISO-8601 string.
#[derive(Debug, Serialize, Deserialize)]
struct StoredStatusCheck {
    id: RecordId,
    client_name: String,
    timestamp: String,
}

impl StatusCheck {
    /// Creates a status check stamped with a fresh id and the current time.
    ///
    /// The timestamp is truncated to microseconds, the precision it is
    /// stored at, so a check reads back exactly as it was returned.
    #[must_use]
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            client_name: client_name.into(),
            timestamp: Utc::now().trunc_subsecs(6),
        }
    }

    /// Encodes the check for storage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] if serialization fails.
    pub fn to_document(&self) -> Result<Document, StoreError> {
        to_document(&StoredStatusCheck {
            id: self.id,
            client_name: self.client_name.clone(),
            timestamp: to_iso(self.timestamp),
        })
    }

    /// Decodes a stored document, ignoring unknown fields such as `_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] if a field is missing or the
    /// timestamp is not a valid ISO-8601 datetime.
    pub fn from_document(document: Document) -> Result<Self, StoreError> {
        let stored: StoredStatusCheck = from_document(document)?;
        let timestamp = parse_iso(&stored.timestamp).map_err(|e| {
            StoreError::Decode(format!(
                "status check {} has invalid timestamp {:?}: {e}",
                stored.id, stored.timestamp
            ))
        })?;

        Ok(Self {
            id: stored.id,
            client_name: stored.client_name,
            timestamp,
        })
    }
}
