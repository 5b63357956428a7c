//! Contact submission service.

use std::sync::Arc;

use crate::domain::{ContactForm, ContactSubmission, RecordId};
use crate::error::ApiError;
use crate::notify::ContactNotifier;
use crate::persistence::{CONTACT_SUBMISSIONS, DocumentStore, StoreError};

/// Stores contact submissions and notifies the operator.
///
/// The stored document is the durable record; the email that follows is
/// best-effort and cannot fail the submission.
#[derive(Debug, Clone)]
pub struct ContactService {
    store: Arc<dyn DocumentStore>,
    notifier: ContactNotifier,
}

impl ContactService {
    /// Creates a new `ContactService`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, notifier: ContactNotifier) -> Self {
        Self { store, notifier }
    }

    /// Persists `form`, then sends the operator notification.
    ///
    /// Returns the id assigned to the stored submission.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ContactSubmission`] if the submission cannot be
    /// stored. No email is attempted in that case.
    #[tracing::instrument(skip_all, fields(email = %form.email, company = %form.company))]
    pub async fn submit(&self, form: ContactForm) -> Result<RecordId, ApiError> {
        let submission = ContactSubmission::new(form);

        if let Err(e) = self.persist(&submission).await {
            tracing::error!(error = %e, "error submitting contact form");
            return Err(ApiError::ContactSubmission(e.to_string()));
        }

        self.notifier.send_contact_email(&submission.form).await;

        tracing::info!(
            id = %submission.id,
            "contact form submitted: {} from {}",
            submission.form.email,
            submission.form.company
        );
        Ok(submission.id)
    }

    async fn persist(&self, submission: &ContactSubmission) -> Result<(), StoreError> {
        self.store
            .insert(CONTACT_SUBMISSIONS, submission.to_document()?)
            .await
    }
}
