//! Assignment graph manager
//!
//! Creates and removes health-worker/feminine links and answers the graph
//! queries the admin screens need. Stateless over the record store.

use std::sync::Arc;

use fw_core::traits::Id;
use fw_models::{display_name, Role};
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};
use crate::store::RecordStore;

/// Feminine user linked to a worker, as shown in the assignment modal
#[derive(Debug, Clone, Serialize)]
pub struct AssignedFeminine {
    pub feminine_id: Id,
    pub assignment_id: Id,
    pub full_name: String,
}

/// Active feminine user available for assignment to a worker
#[derive(Debug, Clone, Serialize)]
pub struct FeminineOption {
    pub id: Id,
    pub full_name: String,
}

/// Assignment graph service
pub struct AssignmentService {
    store: Arc<dyn RecordStore>,
}

impl AssignmentService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Attach a list of feminine users to one worker.
    ///
    /// Idempotent per pair: already-linked pairs are left untouched rather
    /// than duplicated. Returns the number of ids processed.
    pub async fn assign(&self, health_worker_id: Id, feminine_ids: &[Id]) -> ServiceResult<usize> {
        if feminine_ids.is_empty() {
            return Err(ServiceError::validation(
                "Please select at least one feminine.",
            ));
        }

        self.expect_role(health_worker_id, Role::HealthWorker).await?;

        for &feminine_id in feminine_ids {
            self.expect_role(feminine_id, Role::Feminine).await?;
            let inserted = self
                .store
                .insert_assignment(feminine_id, health_worker_id)
                .await?;
            if !inserted {
                tracing::debug!(
                    feminine_id,
                    health_worker_id,
                    "assignment already exists, skipping"
                );
            }
        }

        Ok(feminine_ids.len())
    }

    /// Remove one link by its own id; returns the affected worker's
    /// remaining assignment count.
    pub async fn unassign(&self, assignment_id: Id) -> ServiceResult<i64> {
        let health_worker_id = self
            .store
            .delete_assignment(assignment_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Something went wrong, please try again.")
            })?;

        self.store.count_assignments_of_worker(health_worker_id).await
    }

    /// Feminine users currently linked to the worker, ordered by name
    pub async fn assigned_feminine(
        &self,
        health_worker_id: Id,
    ) -> ServiceResult<Vec<AssignedFeminine>> {
        let entries = self.store.assigned_feminine(health_worker_id).await?;
        Ok(entries
            .into_iter()
            .map(|e| AssignedFeminine {
                feminine_id: e.feminine_id,
                assignment_id: e.assignment_id,
                full_name: display_name(&e.first_name, &e.last_name, e.middle_name.as_deref()),
            })
            .collect())
    }

    /// Active feminine users NOT linked to this specific worker.
    ///
    /// A feminine user assigned to a different worker still appears here;
    /// assignment is many-to-many.
    pub async fn unassigned_feminine(
        &self,
        health_worker_id: Id,
    ) -> ServiceResult<Vec<FeminineOption>> {
        let candidates = self.store.unassigned_feminine(health_worker_id).await?;
        Ok(candidates
            .into_iter()
            .map(|c| FeminineOption {
                id: c.id,
                full_name: display_name(&c.first_name, &c.last_name, c.middle_name.as_deref()),
            })
            .collect())
    }

    async fn expect_role(&self, id: Id, role: Role) -> ServiceResult<()> {
        let user = self
            .store
            .find_user(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found, please try again."))?;

        if user.role != role {
            return Err(ServiceError::validation(format!(
                "User {} is not a {}.",
                id,
                role.label()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRecordStore;
    use chrono::NaiveDate;
    use fw_models::User;

    async fn seed_user(store: &MemoryRecordStore, role: Role, first: &str, last: &str) -> Id {
        let mut user = User::new(
            role,
            first,
            last,
            NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
        );
        user.is_active = true;
        store.create_user(user).await.unwrap().id.unwrap()
    }

    async fn setup() -> (Arc<MemoryRecordStore>, AssignmentService) {
        let store = Arc::new(MemoryRecordStore::new());
        let service = AssignmentService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_assign_then_list_contains_each_exactly_once() {
        let (store, service) = setup().await;
        let worker = seed_user(&store, Role::HealthWorker, "Ana", "Reyes").await;
        let f1 = seed_user(&store, Role::Feminine, "Maria", "Santos").await;
        let f2 = seed_user(&store, Role::Feminine, "Luz", "Cruz").await;

        let processed = service.assign(worker, &[f1, f2]).await.unwrap();
        assert_eq!(processed, 2);

        let assigned = service.assigned_feminine(worker).await.unwrap();
        assert_eq!(assigned.len(), 2);
        assert_eq!(
            assigned.iter().filter(|a| a.feminine_id == f1).count(),
            1
        );
        // Ordered by last name: Cruz before Santos
        assert_eq!(assigned[0].full_name, "Cruz, Luz");
        assert_eq!(assigned[1].full_name, "Santos, Maria");
    }

    #[tokio::test]
    async fn test_assign_twice_is_idempotent() {
        let (store, service) = setup().await;
        let worker = seed_user(&store, Role::HealthWorker, "Ana", "Reyes").await;
        let f1 = seed_user(&store, Role::Feminine, "Maria", "Santos").await;

        service.assign(worker, &[f1]).await.unwrap();
        service.assign(worker, &[f1]).await.unwrap();

        let assigned = service.assigned_feminine(worker).await.unwrap();
        assert_eq!(assigned.len(), 1);
    }

    #[tokio::test]
    async fn test_assign_empty_list_is_rejected() {
        let (store, service) = setup().await;
        let worker = seed_user(&store, Role::HealthWorker, "Ana", "Reyes").await;

        let err = service.assign(worker, &[]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(service.assigned_feminine(worker).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_assign_rejects_wrong_roles() {
        let (store, service) = setup().await;
        let worker = seed_user(&store, Role::HealthWorker, "Ana", "Reyes").await;
        let other_worker = seed_user(&store, Role::HealthWorker, "Bea", "Lopez").await;

        let err = service.assign(worker, &[other_worker]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let feminine = seed_user(&store, Role::Feminine, "Maria", "Santos").await;
        let err = service.assign(feminine, &[feminine]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unassign_returns_remaining_count() {
        let (store, service) = setup().await;
        let worker = seed_user(&store, Role::HealthWorker, "Ana", "Reyes").await;
        let f1 = seed_user(&store, Role::Feminine, "Maria", "Santos").await;
        let f2 = seed_user(&store, Role::Feminine, "Luz", "Cruz").await;

        service.assign(worker, &[f1, f2]).await.unwrap();
        let assigned = service.assigned_feminine(worker).await.unwrap();

        let remaining = service.unassign(assigned[0].assignment_id).await.unwrap();
        assert_eq!(remaining, 1);
    }

    #[tokio::test]
    async fn test_unassign_missing_link_is_not_found() {
        let (_store, service) = setup().await;
        let err = service.unassign(404).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unassigned_list_is_per_worker_not_exclusive() {
        let (store, service) = setup().await;
        let w1 = seed_user(&store, Role::HealthWorker, "Ana", "Reyes").await;
        let w2 = seed_user(&store, Role::HealthWorker, "Bea", "Lopez").await;
        let f1 = seed_user(&store, Role::Feminine, "Maria", "Santos").await;
        let f2 = seed_user(&store, Role::Feminine, "Luz", "Cruz").await;

        // No assignments yet: every active feminine is available to w1.
        let available = service.unassigned_feminine(w1).await.unwrap();
        assert_eq!(available.len(), 2);

        service.assign(w1, &[f1, f2]).await.unwrap();

        let available = service.unassigned_feminine(w1).await.unwrap();
        assert!(available.is_empty());

        // f1 is linked to w1 only, so it still appears as available to w2.
        let available = service.unassigned_feminine(w2).await.unwrap();
        assert_eq!(available.len(), 2);
        assert!(available.iter().any(|c| c.id == f1));
    }

    #[tokio::test]
    async fn test_inactive_feminine_not_offered_for_assignment() {
        let (store, service) = setup().await;
        let worker = seed_user(&store, Role::HealthWorker, "Ana", "Reyes").await;

        let pending = User::new(
            Role::Feminine,
            "Nina",
            "Diaz",
            NaiveDate::from_ymd_opt(1999, 8, 2).unwrap(),
        );
        store.create_user(pending).await.unwrap();

        let available = service.unassigned_feminine(worker).await.unwrap();
        assert!(available.is_empty());
    }
}
