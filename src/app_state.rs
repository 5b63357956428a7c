//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::notify::ContactNotifier;
use crate::persistence::DocumentStore;
use crate::service::{ContactService, StatusService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Status check operations.
    pub status_service: Arc<StatusService>,
    /// Contact form submissions.
    pub contact_service: Arc<ContactService>,
    /// The process-wide document store, for health probes.
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Wires the services around one shared store handle.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, notifier: ContactNotifier) -> Self {
        Self {
            status_service: Arc::new(StatusService::new(Arc::clone(&store))),
            contact_service: Arc::new(ContactService::new(Arc::clone(&store), notifier)),
            store,
        }
    }
}
