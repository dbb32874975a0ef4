//! Roster listings
//!
//! Structured data behind the admin tables: feminine and health-worker
//! overviews, the account-settings list, and the calendar feed. Rendering
//! is the caller's concern; nothing here produces markup.

use std::sync::Arc;

use chrono::NaiveDate;
use fw_core::traits::Id;
use serde::Serialize;

use crate::assignments::AssignedFeminine;
use crate::error::ServiceResult;
use crate::store::RecordStore;
use fw_models::display_name;

/// Feminine row in the admin table
#[derive(Debug, Clone, Serialize)]
pub struct FeminineOverview {
    pub id: Id,
    pub full_name: String,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub address: Option<String>,
    pub birthdate: NaiveDate,
    pub menstruation_status: Option<bool>,
    pub is_active: bool,
    pub remarks: Option<String>,
    pub is_assigned: bool,
    /// Names of the monitoring workers, "Last, First"
    pub assigned_health_workers: Vec<String>,
}

/// Health worker row in the admin table
#[derive(Debug, Clone, Serialize)]
pub struct HealthWorkerOverview {
    pub id: Id,
    pub full_name: String,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub address: Option<String>,
    pub birthdate: NaiveDate,
    pub is_active: bool,
    pub remarks: Option<String>,
    pub assigned_feminine: Vec<AssignedFeminine>,
}

/// Account-settings row (active non-admin users)
#[derive(Debug, Clone, Serialize)]
pub struct AccountOverview {
    pub id: Id,
    pub full_name: String,
    pub email: Option<String>,
    pub role: String,
}

/// Calendar feed entry: one active feminine user and her latest entry
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    pub user_id: Id,
    pub name: String,
    pub period_id: Option<Id>,
    pub period_date: Option<NaiveDate>,
}

/// Roster service
pub struct RosterService {
    store: Arc<dyn RecordStore>,
}

impl RosterService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// All Feminine accounts, ordered by name, with assignment state
    pub async fn feminine_overview(&self) -> ServiceResult<Vec<FeminineOverview>> {
        let users = self.store.feminine_ordered().await?;

        let mut rows = Vec::with_capacity(users.len());
        for user in users {
            let id = user.id.unwrap_or_default();
            let workers = self.store.workers_of_feminine(id).await?;

            rows.push(FeminineOverview {
                id,
                full_name: user.full_name(),
                email: user.email,
                contact_no: user.contact_no,
                address: user.address,
                birthdate: user.birthdate,
                menstruation_status: user.menstruation_status,
                is_active: user.is_active,
                remarks: user.remarks,
                is_assigned: !workers.is_empty(),
                assigned_health_workers: workers
                    .into_iter()
                    .map(|(first, last)| display_name(&first, &last, None))
                    .collect(),
            });
        }

        Ok(rows)
    }

    /// All Health Worker accounts, ordered by name, with assigned lists
    pub async fn health_worker_overview(&self) -> ServiceResult<Vec<HealthWorkerOverview>> {
        let users = self.store.health_workers_ordered().await?;

        let mut rows = Vec::with_capacity(users.len());
        for user in users {
            let id = user.id.unwrap_or_default();
            let assigned = self.store.assigned_feminine(id).await?;

            rows.push(HealthWorkerOverview {
                id,
                full_name: user.full_name(),
                email: user.email,
                contact_no: user.contact_no,
                address: user.address,
                birthdate: user.birthdate,
                is_active: user.is_active,
                remarks: user.remarks,
                assigned_feminine: assigned
                    .into_iter()
                    .map(|e| AssignedFeminine {
                        feminine_id: e.feminine_id,
                        assignment_id: e.assignment_id,
                        full_name: display_name(
                            &e.first_name,
                            &e.last_name,
                            e.middle_name.as_deref(),
                        ),
                    })
                    .collect(),
            });
        }

        Ok(rows)
    }

    /// Active non-admin accounts with role labels (password-reset screen)
    pub async fn account_overview(&self) -> ServiceResult<Vec<AccountOverview>> {
        let users = self.store.active_non_admin_ordered().await?;
        Ok(users
            .into_iter()
            .map(|user| AccountOverview {
                id: user.id.unwrap_or_default(),
                full_name: user.full_name(),
                email: user.email.clone(),
                role: user.role.label().to_string(),
            })
            .collect())
    }

    /// Latest entry per active feminine user
    pub async fn calendar(&self) -> ServiceResult<Vec<CalendarEntry>> {
        let entries = self.store.latest_periods_of_active_feminine().await?;
        Ok(entries
            .into_iter()
            .map(|e| CalendarEntry {
                user_id: e.user_id,
                name: display_name(&e.first_name, &e.last_name, None),
                period_id: e.period_id,
                period_date: e.menstruation_date,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignments::AssignmentService;
    use crate::memory::MemoryRecordStore;
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
            NaiveDate::from_ymd_opt(1993, 11, 8).unwrap(),
        );
        user.is_active = active;
        store.create_user(user).await.unwrap().id.unwrap()
    }

    #[tokio::test]
    async fn test_feminine_overview_reports_assignment_state() {
        let store = Arc::new(MemoryRecordStore::new());
        let roster = RosterService::new(store.clone());
        let assignments = AssignmentService::new(store.clone());

        let worker = seed_user(&store, Role::HealthWorker, "Ana", "Reyes", true).await;
        let assigned = seed_user(&store, Role::Feminine, "Maria", "Santos", true).await;
        let unassigned = seed_user(&store, Role::Feminine, "Luz", "Cruz", true).await;

        assignments.assign(worker, &[assigned]).await.unwrap();

        let rows = roster.feminine_overview().await.unwrap();
        assert_eq!(rows.len(), 2);

        // Ordered by last name: Cruz before Santos
        assert_eq!(rows[0].id, unassigned);
        assert!(!rows[0].is_assigned);
        assert!(rows[0].assigned_health_workers.is_empty());

        assert_eq!(rows[1].id, assigned);
        assert!(rows[1].is_assigned);
        assert_eq!(rows[1].assigned_health_workers, vec!["Reyes, Ana"]);
    }

    #[tokio::test]
    async fn test_health_worker_overview_embeds_assigned_list() {
        let store = Arc::new(MemoryRecordStore::new());
        let roster = RosterService::new(store.clone());
        let assignments = AssignmentService::new(store.clone());

        let worker = seed_user(&store, Role::HealthWorker, "Ana", "Reyes", true).await;
        let f1 = seed_user(&store, Role::Feminine, "Maria", "Santos", true).await;

        assignments.assign(worker, &[f1]).await.unwrap();

        let rows = roster.health_worker_overview().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].assigned_feminine.len(), 1);
        assert_eq!(rows[0].assigned_feminine[0].full_name, "Santos, Maria");
    }

    #[tokio::test]
    async fn test_account_overview_excludes_pending_accounts() {
        let store = Arc::new(MemoryRecordStore::new());
        let roster = RosterService::new(store.clone());

        seed_user(&store, Role::Feminine, "Maria", "Santos", true).await;
        seed_user(&store, Role::HealthWorker, "Ana", "Reyes", true).await;
        seed_user(&store, Role::Feminine, "Nina", "Diaz", false).await;

        let rows = roster.account_overview().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].role, "Health Worker");
        assert_eq!(rows[1].role, "Feminine");
    }

    #[tokio::test]
    async fn test_calendar_includes_users_without_entries() {
        let store = Arc::new(MemoryRecordStore::new());
        let roster = RosterService::new(store.clone());

        let with_entry = seed_user(&store, Role::Feminine, "Maria", "Santos", true).await;
        let without_entry = seed_user(&store, Role::Feminine, "Luz", "Cruz", true).await;

        store
            .create_period(with_entry, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
            .await
            .unwrap();
        store
            .create_period(with_entry, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .await
            .unwrap();

        let entries = roster.calendar().await.unwrap();
        assert_eq!(entries.len(), 2);

        let maria = entries.iter().find(|e| e.user_id == with_entry).unwrap();
        assert_eq!(
            maria.period_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );

        let luz = entries.iter().find(|e| e.user_id == without_entry).unwrap();
        assert!(luz.period_date.is_none());
    }
}
