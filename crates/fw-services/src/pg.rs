//! PostgreSQL record store
//!
//! Adapts the fw-db repositories onto the [`RecordStore`] port.

use async_trait::async_trait;
use chrono::NaiveDate;
use fw_core::traits::Id;
use fw_models::{MenstruationPeriod, Role, User};
use fw_db::{AssignmentRepository, PeriodRepository, UserRepository};
use sqlx::PgPool;

use crate::error::ServiceResult;
use crate::store::{
    AssignedFeminineEntry, FeminineCandidate, LatestPeriodEntry, RecordStore, UnseenPeriodEntry,
};

/// Record store backed by the PostgreSQL repositories
pub struct PgRecordStore {
    users: UserRepository,
    periods: PeriodRepository,
    assignments: AssignmentRepository,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            periods: PeriodRepository::new(pool.clone()),
            assignments: AssignmentRepository::new(pool),
        }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create_user(&self, user: User) -> ServiceResult<User> {
        Ok(self.users.create(&user).await?)
    }

    async fn find_user(&self, id: Id) -> ServiceResult<Option<User>> {
        Ok(self.users.find_by_id(id).await?)
    }

    async fn activate_user(&self, id: Id) -> ServiceResult<bool> {
        Ok(self.users.activate(id).await?)
    }

    async fn reset_password(&self, id: Id, password_hash: &str) -> ServiceResult<bool> {
        Ok(self.users.reset_password(id, password_hash).await?)
    }

    async fn delete_user_cascade(&self, id: Id) -> ServiceResult<bool> {
        Ok(self.users.delete_cascade(id).await?)
    }

    async fn unverified_feminine(&self) -> ServiceResult<Vec<User>> {
        Ok(self.users.unverified_feminine().await?)
    }

    async fn feminine_ordered(&self) -> ServiceResult<Vec<User>> {
        Ok(self.users.feminine_ordered().await?)
    }

    async fn health_workers_ordered(&self) -> ServiceResult<Vec<User>> {
        Ok(self.users.health_workers_ordered().await?)
    }

    async fn active_non_admin_ordered(&self) -> ServiceResult<Vec<User>> {
        Ok(self.users.active_non_admin_ordered().await?)
    }

    async fn count_by_role(&self, role: Role) -> ServiceResult<i64> {
        Ok(self.users.count_by_role(role).await?)
    }

    async fn count_non_admin(&self) -> ServiceResult<i64> {
        Ok(self.users.count_non_admin().await?)
    }

    async fn count_inactive(&self, role: Option<Role>) -> ServiceResult<i64> {
        Ok(self.users.count_inactive(role).await?)
    }

    async fn count_feminine_by_status(&self, status: bool) -> ServiceResult<i64> {
        Ok(self.users.count_feminine_by_status(status).await?)
    }

    async fn count_pending_feminine(&self) -> ServiceResult<i64> {
        Ok(self.users.count_pending_feminine().await?)
    }

    async fn create_period(
        &self,
        user_id: Id,
        date: NaiveDate,
    ) -> ServiceResult<MenstruationPeriod> {
        Ok(self.periods.create(user_id, date).await?)
    }

    async fn mark_period_seen(&self, id: Id) -> ServiceResult<bool> {
        Ok(self.periods.mark_seen(id).await?)
    }

    async fn unseen_periods(
        &self,
        health_worker_id: Option<Id>,
    ) -> ServiceResult<Vec<UnseenPeriodEntry>> {
        let rows = self.periods.unseen(health_worker_id).await?;
        Ok(rows
            .into_iter()
            .map(|row| UnseenPeriodEntry {
                period_id: row.id,
                user_id: row.user_id,
                menstruation_date: row.menstruation_date,
                first_name: row.first_name,
                last_name: row.last_name,
                middle_name: row.middle_name,
            })
            .collect())
    }

    async fn count_periods_in_year(&self, year: i32) -> ServiceResult<i64> {
        Ok(self.periods.count_in_year(year).await?)
    }

    async fn monthly_period_counts(&self, year: i32) -> ServiceResult<Vec<(u32, i64)>> {
        let rows = self.periods.monthly_counts(year).await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.month as u32, row.count))
            .collect())
    }

    async fn latest_periods_of_active_feminine(
        &self,
    ) -> ServiceResult<Vec<LatestPeriodEntry>> {
        let rows = self.periods.latest_per_active_feminine().await?;
        Ok(rows
            .into_iter()
            .map(|row| LatestPeriodEntry {
                user_id: row.user_id,
                first_name: row.first_name,
                last_name: row.last_name,
                period_id: row.period_id,
                menstruation_date: row.menstruation_date,
            })
            .collect())
    }

    async fn insert_assignment(
        &self,
        feminine_id: Id,
        health_worker_id: Id,
    ) -> ServiceResult<bool> {
        Ok(self
            .assignments
            .insert_pair(feminine_id, health_worker_id)
            .await?)
    }

    async fn delete_assignment(&self, id: Id) -> ServiceResult<Option<Id>> {
        Ok(self.assignments.delete(id).await?)
    }

    async fn count_assignments_of_worker(&self, health_worker_id: Id) -> ServiceResult<i64> {
        Ok(self.assignments.count_for_worker(health_worker_id).await?)
    }

    async fn count_assignments_of_feminine(&self, feminine_id: Id) -> ServiceResult<i64> {
        Ok(self.assignments.count_for_feminine(feminine_id).await?)
    }

    async fn assigned_feminine(
        &self,
        health_worker_id: Id,
    ) -> ServiceResult<Vec<AssignedFeminineEntry>> {
        let rows = self.assignments.assigned_feminine(health_worker_id).await?;
        Ok(rows
            .into_iter()
            .map(|row| AssignedFeminineEntry {
                feminine_id: row.feminine_id,
                assignment_id: row.assignment_id,
                first_name: row.first_name,
                last_name: row.last_name,
                middle_name: row.middle_name,
            })
            .collect())
    }

    async fn unassigned_feminine(
        &self,
        health_worker_id: Id,
    ) -> ServiceResult<Vec<FeminineCandidate>> {
        let rows = self
            .assignments
            .unassigned_feminine(health_worker_id)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| FeminineCandidate {
                id: row.id,
                first_name: row.first_name,
                last_name: row.last_name,
                middle_name: row.middle_name,
            })
            .collect())
    }

    async fn workers_of_feminine(&self, feminine_id: Id) -> ServiceResult<Vec<(String, String)>> {
        Ok(self.assignments.workers_of_feminine(feminine_id).await?)
    }
}
