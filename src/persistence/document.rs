//! Document, filter and projection types shared by all stores.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::StoreError;

/// A schemaless JSON document.
pub type Document = Map<String, Value>;

/// Name of the store-assigned identity field.
pub const ID_FIELD: &str = "_id";

/// Serializes `value` into a document.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] if `value` does not serialize to a JSON
/// object.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(StoreError::Decode(format!("expected an object, got {other}"))),
        Err(err) => Err(StoreError::Decode(err.to_string())),
    }
}

/// Deserializes a stored document into `T`. Unknown fields are ignored.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] if required fields are missing or have
/// the wrong type.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(document)).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Top-level field equality filter. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Document);

impl Filter {
    /// Returns a filter matching every document.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds an equality condition on `field`.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Returns `true` if every condition holds for `document`.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }

    /// Returns the conditions as a JSON object.
    #[must_use]
    pub fn as_document(&self) -> &Document {
        &self.0
    }
}

/// Read-time field selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    /// Return every field.
    #[default]
    All,
    /// Return every field except the listed ones.
    Exclude(Vec<String>),
    /// Return only the listed fields.
    Include(Vec<String>),
}

impl Projection {
    /// Projection removing the store identity field.
    #[must_use]
    pub fn without_id() -> Self {
        Self::Exclude(vec![ID_FIELD.to_string()])
    }

    /// Applies the projection to `document`.
    #[must_use]
    pub fn apply(&self, mut document: Document) -> Document {
        match self {
            Self::All => document,
            Self::Exclude(fields) => {
                for field in fields {
                    document.remove(field);
                }
                document
            }
            Self::Include(fields) => {
                document.retain(|key, _| fields.iter().any(|f| f == key));
                document
            }
        }
    }
}
