//! Status check service: create and list.

use std::sync::Arc;

use crate::domain::StatusCheck;
use crate::error::ApiError;
use crate::persistence::{DocumentStore, Filter, Projection, STATUS_CHECKS};

/// Maximum number of status checks returned by [`StatusService::list`].
pub const STATUS_LIST_LIMIT: usize = 1000;

/// Records and reads back status checks.
#[derive(Debug, Clone)]
pub struct StatusService {
    store: Arc<dyn DocumentStore>,
}

impl StatusService {
    /// Creates a new `StatusService` over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Stamps a new status check for `client_name` and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] if the store rejects the write.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, client_name: String) -> Result<StatusCheck, ApiError> {
        let check = StatusCheck::new(client_name);
        self.store
            .insert(STATUS_CHECKS, check.to_document()?)
            .await?;

        tracing::debug!(id = %check.id, "status check recorded");
        Ok(check)
    }

    /// Returns up to [`STATUS_LIST_LIMIT`] status checks in store order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] if the read fails or a stored
    /// document cannot be decoded.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<StatusCheck>, ApiError> {
        let documents = self
            .store
            .find(
                STATUS_CHECKS,
                &Filter::all(),
                &Projection::without_id(),
                STATUS_LIST_LIMIT,
            )
            .await?;

        let checks = documents
            .into_iter()
            .map(StatusCheck::from_document)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(checks)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::persistence::test_support::FailingStore;
    use chrono::{SubsecRound, Utc};
    use std::collections::HashSet;

    fn make_service() -> (StatusService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let shared: Arc<dyn DocumentStore> = Arc::clone(&store) as Arc<dyn DocumentStore>;
        (StatusService::new(shared), store)
    }

    #[tokio::test]
    async fn create_stores_one_document() {
        let (service, store) = make_service();
        let before = Utc::now().trunc_subsecs(6);

        let Ok(check) = service.create("uptime-bot".to_string()).await else {
            panic!("create failed");
        };

        assert_eq!(check.client_name, "uptime-bot");
        assert!(check.timestamp >= before && check.timestamp <= Utc::now());
        assert_eq!(store.count(STATUS_CHECKS).await, 1);
    }

    #[tokio::test]
    async fn list_returns_created_checks_in_order() {
        let (service, _store) = make_service();
        let mut created = Vec::new();
        for name in ["alpha", "beta", "gamma"] {
            let Ok(check) = service.create(name.to_string()).await else {
                panic!("create failed");
            };
            created.push(check);
        }

        let Ok(listed) = service.list().await else {
            panic!("list failed");
        };
        assert_eq!(listed.len(), 3);
        assert_eq!(listed, created);
    }

    #[tokio::test]
    async fn list_is_capped() {
        let (service, _store) = make_service();
        for i in 0..(STATUS_LIST_LIMIT + 5) {
            if service.create(format!("client-{i}")).await.is_err() {
                panic!("create failed");
            }
        }

        let Ok(listed) = service.list().await else {
            panic!("list failed");
        };
        assert_eq!(listed.len(), STATUS_LIST_LIMIT);
        let ids: HashSet<_> = listed.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), STATUS_LIST_LIMIT);
    }

    #[tokio::test]
    async fn store_failure_is_a_persistence_error() {
        let service = StatusService::new(Arc::new(FailingStore));
        assert!(matches!(
            service.create("uptime-bot".to_string()).await,
            Err(ApiError::Persistence(_))
        ));
        assert!(matches!(service.list().await, Err(ApiError::Persistence(_))));
    }
}
