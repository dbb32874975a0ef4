//! Notification aggregator
//!
//! Both notification classes are pull computations: no notification rows
//! exist, every read recomputes the unseen/unverified predicates against
//! the record store.

use std::sync::Arc;

use fw_core::traits::Id;
use fw_models::period::NOTIFICATION_DATE_FORMAT;
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};
use crate::store::RecordStore;

/// Who is asking for period notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Admin view, unscoped by assignment
    Global,
    /// One health worker's view, restricted to their assigned users
    HealthWorker(Id),
}

impl Scope {
    fn health_worker_id(self) -> Option<Id> {
        match self {
            Scope::Global => None,
            Scope::HealthWorker(id) => Some(id),
        }
    }
}

/// New-signup notification (unverified Feminine account)
#[derive(Debug, Clone, Serialize)]
pub struct SignupNotification {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub email: Option<String>,
    pub menstruation_status: Option<bool>,
}

/// New period-entry notification
#[derive(Debug, Clone, Serialize)]
pub struct PeriodNotification {
    pub id: Id,
    pub user_id: Id,
    pub formatted_menstruation_date: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
}

/// Result of acknowledging one period entry
#[derive(Debug, Clone, Serialize)]
pub struct SeenAcknowledgement {
    pub id: Id,
    pub new_notification_count: usize,
}

/// Notification service
pub struct NotificationService {
    store: Arc<dyn RecordStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Unverified Feminine accounts, newest first. The admin's badge count
    /// is the length of this list.
    pub async fn signup_notifications(&self) -> ServiceResult<Vec<SignupNotification>> {
        let pending = self.store.unverified_feminine().await?;
        Ok(pending
            .into_iter()
            .map(|user| SignupNotification {
                id: user.id.unwrap_or_default(),
                first_name: user.first_name,
                last_name: user.last_name,
                middle_name: user.middle_name,
                email: user.email,
                menstruation_status: user.menstruation_status,
            })
            .collect())
    }

    pub async fn signup_count(&self) -> ServiceResult<usize> {
        Ok(self.signup_notifications().await?.len())
    }

    /// Unseen period entries of active Feminine users, scoped per caller.
    pub async fn period_notifications(
        &self,
        scope: Scope,
    ) -> ServiceResult<Vec<PeriodNotification>> {
        let entries = self
            .store
            .unseen_periods(scope.health_worker_id())
            .await?;

        Ok(entries
            .into_iter()
            .map(|e| PeriodNotification {
                id: e.period_id,
                user_id: e.user_id,
                formatted_menstruation_date: e
                    .menstruation_date
                    .format(NOTIFICATION_DATE_FORMAT)
                    .to_string(),
                first_name: e.first_name,
                last_name: e.last_name,
                middle_name: e.middle_name,
            })
            .collect())
    }

    pub async fn unseen_count(&self, scope: Scope) -> ServiceResult<usize> {
        Ok(self
            .store
            .unseen_periods(scope.health_worker_id())
            .await?
            .len())
    }

    /// Acknowledge one entry and report the caller's refreshed badge count.
    pub async fn mark_period_seen(
        &self,
        period_id: Id,
        scope: Scope,
    ) -> ServiceResult<SeenAcknowledgement> {
        let updated = self.store.mark_period_seen(period_id).await?;
        if !updated {
            return Err(ServiceError::not_found("Something went wrong."));
        }

        Ok(SeenAcknowledgement {
            id: period_id,
            new_notification_count: self.unseen_count(scope).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignments::AssignmentService;
    use crate::memory::MemoryRecordStore;
    use chrono::NaiveDate;
    use fw_models::{Role, User};

    async fn seed_user(
        store: &MemoryRecordStore,
        role: Role,
        first: &str,
        last: &str,
        active: bool,
    ) -> Id {
        let mut user = User::new(
            role,
            first,
            last,
            NaiveDate::from_ymd_opt(1992, 6, 20).unwrap(),
        );
        user.is_active = active;
        store.create_user(user).await.unwrap().id.unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_signup_notifications_newest_first() {
        let store = Arc::new(MemoryRecordStore::new());
        let service = NotificationService::new(store.clone());

        let older = seed_user(&store, Role::Feminine, "Maria", "Santos", false).await;
        let newer = seed_user(&store, Role::Feminine, "Luz", "Cruz", false).await;
        // Verified and non-feminine accounts never show up.
        seed_user(&store, Role::Feminine, "Vera", "Gomez", true).await;
        seed_user(&store, Role::HealthWorker, "Ana", "Reyes", false).await;

        let notifications = service.signup_notifications().await.unwrap();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].id, newer);
        assert_eq!(notifications[1].id, older);
        assert_eq!(service.signup_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_mark_seen_scenario_global_scope() {
        let store = Arc::new(MemoryRecordStore::new());
        let service = NotificationService::new(store.clone());

        let feminine = seed_user(&store, Role::Feminine, "Maria", "Santos", true).await;
        let entry1 = store
            .create_period(feminine, date(2024, 3, 5))
            .await
            .unwrap()
            .id
            .unwrap();
        let entry2 = store
            .create_period(feminine, date(2024, 4, 2))
            .await
            .unwrap()
            .id
            .unwrap();

        let all = service.period_notifications(Scope::Global).await.unwrap();
        assert_eq!(all.len(), 2);

        let ack = service
            .mark_period_seen(entry1, Scope::Global)
            .await
            .unwrap();
        assert_eq!(ack.id, entry1);
        assert_eq!(ack.new_notification_count, 1);

        let remaining = service.period_notifications(Scope::Global).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, entry2);
    }

    #[tokio::test]
    async fn test_mark_seen_missing_entry_is_not_found() {
        let store = Arc::new(MemoryRecordStore::new());
        let service = NotificationService::new(store);

        let err = service
            .mark_period_seen(404, Scope::Global)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_worker_scope_never_leaks_unassigned_entries() {
        let store = Arc::new(MemoryRecordStore::new());
        let notifications = NotificationService::new(store.clone());
        let assignments = AssignmentService::new(store.clone());

        let worker = seed_user(&store, Role::HealthWorker, "Ana", "Reyes", true).await;
        let assigned = seed_user(&store, Role::Feminine, "Maria", "Santos", true).await;
        let unassigned = seed_user(&store, Role::Feminine, "Luz", "Cruz", true).await;

        assignments.assign(worker, &[assigned]).await.unwrap();
        store.create_period(assigned, date(2024, 5, 1)).await.unwrap();
        store.create_period(unassigned, date(2024, 5, 2)).await.unwrap();

        let scoped = notifications
            .period_notifications(Scope::HealthWorker(worker))
            .await
            .unwrap();
        assert_eq!(scoped.len(), 1);
        assert!(scoped.iter().all(|n| n.user_id == assigned));

        // Every scoped entry's owner appears in the worker's assigned list.
        let assigned_list = assignments.assigned_feminine(worker).await.unwrap();
        for entry in &scoped {
            assert!(assigned_list.iter().any(|a| a.feminine_id == entry.user_id));
        }

        let global = notifications
            .period_notifications(Scope::Global)
            .await
            .unwrap();
        assert_eq!(global.len(), 2);
    }

    #[tokio::test]
    async fn test_inactive_owner_entries_are_excluded() {
        let store = Arc::new(MemoryRecordStore::new());
        let service = NotificationService::new(store.clone());

        let pending = seed_user(&store, Role::Feminine, "Nina", "Diaz", false).await;
        store.create_period(pending, date(2024, 6, 1)).await.unwrap();

        let all = service.period_notifications(Scope::Global).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_date_formatting() {
        let store = Arc::new(MemoryRecordStore::new());
        let service = NotificationService::new(store.clone());

        let feminine = seed_user(&store, Role::Feminine, "Maria", "Santos", true).await;
        store.create_period(feminine, date(2024, 3, 5)).await.unwrap();

        let all = service.period_notifications(Scope::Global).await.unwrap();
        assert_eq!(all[0].formatted_menstruation_date, "Mar 5, 2024");
    }
}
