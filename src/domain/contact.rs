//! Contact form submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::RecordId;
use super::timestamp::to_iso;
use crate::persistence::{Document, StoreError, to_document};

/// A contact form as submitted by a site visitor.
///
/// All fields are required strings; no format checks beyond that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactForm {
    /// Submitter's name.
    pub name: String,
    /// Submitter's email address, used as `Reply-To`.
    pub email: String,
    /// Submitter's company.
    pub company: String,
    /// Free-form message body.
    pub message: String,
}

/// A contact form stamped with server-side identity, ready for storage.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    /// Server-generated id.
    pub id: RecordId,
    /// Time of submission (UTC).
    pub submitted_at: DateTime<Utc>,
    /// The submitted form.
    pub form: ContactForm,
}

#[derive(Serialize)]
struct StoredContactSubmission<'a> {
    #[serde(flatten)]
    form: &'a ContactForm,
    id: RecordId,
    timestamp: String,
}

impl ContactSubmission {
    /// Wraps `form` with a fresh id and the current time.
    #[must_use]
    pub fn new(form: ContactForm) -> Self {
        Self {
            id: RecordId::new(),
            submitted_at: Utc::now(),
            form,
        }
    }

    /// Encodes the submission as the form fields plus `id` and an ISO-8601
    /// `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] if serialization fails.
    pub fn to_document(&self) -> Result<Document, StoreError> {
        to_document(&StoredContactSubmission {
            form: &self.form,
            id: self.id,
            timestamp: to_iso(self.submitted_at),
        })
    }
}
