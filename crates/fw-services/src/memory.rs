//! In-memory record store for development/testing
//!
//! Mirrors the relational constraints: pair uniqueness on assignment
//! links, email/contact uniqueness on users, and an all-or-nothing user
//! cascade (all record sets are mutated under simultaneously held locks).

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use fw_core::traits::Id;
use fw_models::{Assignment, MenstruationPeriod, Role, User};
use tokio::sync::RwLock;

use crate::error::{ServiceError, ServiceResult};
use crate::store::{
    AssignedFeminineEntry, FeminineCandidate, LatestPeriodEntry, RecordStore, UnseenPeriodEntry,
};

/// In-memory record store
pub struct MemoryRecordStore {
    users: RwLock<Vec<User>>,
    periods: RwLock<Vec<MenstruationPeriod>>,
    assignments: RwLock<Vec<Assignment>>,
    next_id: AtomicI64,
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            periods: RwLock::new(Vec::new()),
            assignments: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn fresh_id(&self) -> Id {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn by_name(a: &User, b: &User) -> std::cmp::Ordering {
        (a.last_name.as_str(), a.first_name.as_str())
            .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create_user(&self, mut user: User) -> ServiceResult<User> {
        let mut users = self.users.write().await;

        if let Some(email) = &user.email {
            if users.iter().any(|u| u.email.as_ref() == Some(email)) {
                return Err(ServiceError::Conflict(
                    "The email has already been taken.".to_string(),
                ));
            }
        }
        if let Some(contact_no) = &user.contact_no {
            if users.iter().any(|u| u.contact_no.as_ref() == Some(contact_no)) {
                return Err(ServiceError::Conflict(
                    "The contact number has already been taken.".to_string(),
                ));
            }
        }

        user.id = Some(self.fresh_id());
        let now = Utc::now();
        user.created_at = Some(now);
        user.updated_at = Some(now);
        users.push(user.clone());

        Ok(user)
    }

    async fn find_user(&self, id: Id) -> ServiceResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == Some(id)).cloned())
    }

    async fn activate_user(&self, id: Id) -> ServiceResult<bool> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == Some(id)) {
            Some(user) => {
                user.is_active = true;
                user.is_verified = true;
                user.updated_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn reset_password(&self, id: Id, password_hash: &str) -> ServiceResult<bool> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == Some(id)) {
            Some(user) => {
                user.password_hash = Some(password_hash.to_string());
                user.updated_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_user_cascade(&self, id: Id) -> ServiceResult<bool> {
        // Hold all three sets for the duration so the cascade is atomic.
        let mut users = self.users.write().await;
        let mut periods = self.periods.write().await;
        let mut assignments = self.assignments.write().await;

        let Some(pos) = users.iter().position(|u| u.id == Some(id)) else {
            return Ok(false);
        };

        periods.retain(|p| p.user_id != id);
        assignments.retain(|a| a.feminine_id != id && a.health_worker_id != id);
        users.remove(pos);

        Ok(true)
    }

    async fn unverified_feminine(&self) -> ServiceResult<Vec<User>> {
        let users = self.users.read().await;
        let mut pending: Vec<User> = users
            .iter()
            .filter(|u| u.role == Role::Feminine && !u.is_active)
            .cloned()
            .collect();
        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(pending)
    }

    async fn feminine_ordered(&self) -> ServiceResult<Vec<User>> {
        let users = self.users.read().await;
        let mut list: Vec<User> = users
            .iter()
            .filter(|u| u.role == Role::Feminine)
            .cloned()
            .collect();
        list.sort_by(Self::by_name);
        Ok(list)
    }

    async fn health_workers_ordered(&self) -> ServiceResult<Vec<User>> {
        let users = self.users.read().await;
        let mut list: Vec<User> = users
            .iter()
            .filter(|u| u.role == Role::HealthWorker)
            .cloned()
            .collect();
        list.sort_by(Self::by_name);
        Ok(list)
    }

    async fn active_non_admin_ordered(&self) -> ServiceResult<Vec<User>> {
        let users = self.users.read().await;
        let mut list: Vec<User> = users
            .iter()
            .filter(|u| u.role != Role::Admin && u.is_active)
            .cloned()
            .collect();
        list.sort_by(Self::by_name);
        Ok(list)
    }

    async fn count_by_role(&self, role: Role) -> ServiceResult<i64> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.role == role).count() as i64)
    }

    async fn count_non_admin(&self) -> ServiceResult<i64> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.role != Role::Admin).count() as i64)
    }

    async fn count_inactive(&self, role: Option<Role>) -> ServiceResult<i64> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| !u.is_active && u.role != Role::Admin)
            .filter(|u| role.map_or(true, |r| u.role == r))
            .count() as i64)
    }

    async fn count_feminine_by_status(&self, status: bool) -> ServiceResult<i64> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| u.role == Role::Feminine && u.menstruation_status == Some(status))
            .count() as i64)
    }

    async fn count_pending_feminine(&self) -> ServiceResult<i64> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| u.role == Role::Feminine && !u.is_active)
            .count() as i64)
    }

    async fn create_period(
        &self,
        user_id: Id,
        date: NaiveDate,
    ) -> ServiceResult<MenstruationPeriod> {
        let mut periods = self.periods.write().await;
        let mut period = MenstruationPeriod::new(user_id, date);
        period.id = Some(self.fresh_id());
        period.created_at = Some(Utc::now());
        periods.push(period.clone());
        Ok(period)
    }

    async fn mark_period_seen(&self, id: Id) -> ServiceResult<bool> {
        let mut periods = self.periods.write().await;
        match periods.iter_mut().find(|p| p.id == Some(id)) {
            Some(period) => {
                period.is_seen = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn unseen_periods(
        &self,
        health_worker_id: Option<Id>,
    ) -> ServiceResult<Vec<UnseenPeriodEntry>> {
        let users = self.users.read().await;
        let periods = self.periods.read().await;
        let assignments = self.assignments.read().await;

        let mut entries: Vec<UnseenPeriodEntry> = periods
            .iter()
            .filter(|p| !p.is_seen)
            .filter_map(|p| {
                let owner = users
                    .iter()
                    .find(|u| u.id == Some(p.user_id))
                    .filter(|u| u.role == Role::Feminine && u.is_active)?;

                if let Some(worker_id) = health_worker_id {
                    assignments
                        .iter()
                        .find(|a| a.feminine_id == p.user_id && a.health_worker_id == worker_id)?;
                }

                Some(UnseenPeriodEntry {
                    period_id: p.id.unwrap_or_default(),
                    user_id: p.user_id,
                    menstruation_date: p.menstruation_date,
                    first_name: owner.first_name.clone(),
                    last_name: owner.last_name.clone(),
                    middle_name: owner.middle_name.clone(),
                })
            })
            .collect();

        entries.sort_by(|a, b| {
            b.menstruation_date
                .cmp(&a.menstruation_date)
                .then(b.period_id.cmp(&a.period_id))
        });
        Ok(entries)
    }

    async fn count_periods_in_year(&self, year: i32) -> ServiceResult<i64> {
        let periods = self.periods.read().await;
        Ok(periods
            .iter()
            .filter(|p| p.menstruation_date.year() == year)
            .count() as i64)
    }

    async fn monthly_period_counts(&self, year: i32) -> ServiceResult<Vec<(u32, i64)>> {
        let periods = self.periods.read().await;
        let mut counts = [0i64; 12];
        for period in periods
            .iter()
            .filter(|p| p.menstruation_date.year() == year)
        {
            counts[(period.menstruation_date.month() - 1) as usize] += 1;
        }

        Ok(counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(i, &count)| (i as u32 + 1, count))
            .collect())
    }

    async fn latest_periods_of_active_feminine(
        &self,
    ) -> ServiceResult<Vec<LatestPeriodEntry>> {
        let users = self.users.read().await;
        let periods = self.periods.read().await;

        let mut feminine: Vec<&User> = users
            .iter()
            .filter(|u| u.role == Role::Feminine && u.is_active)
            .collect();
        feminine.sort_by(|a, b| Self::by_name(a, b));

        Ok(feminine
            .into_iter()
            .map(|user| {
                let latest = periods
                    .iter()
                    .filter(|p| Some(p.user_id) == user.id)
                    .max_by_key(|p| (p.menstruation_date, p.id));

                LatestPeriodEntry {
                    user_id: user.id.unwrap_or_default(),
                    first_name: user.first_name.clone(),
                    last_name: user.last_name.clone(),
                    period_id: latest.and_then(|p| p.id),
                    menstruation_date: latest.map(|p| p.menstruation_date),
                }
            })
            .collect())
    }

    async fn insert_assignment(
        &self,
        feminine_id: Id,
        health_worker_id: Id,
    ) -> ServiceResult<bool> {
        let mut assignments = self.assignments.write().await;

        // Uniqueness check under the write lock, the in-memory equivalent
        // of the table's unique constraint.
        if assignments
            .iter()
            .any(|a| a.feminine_id == feminine_id && a.health_worker_id == health_worker_id)
        {
            return Ok(false);
        }

        let mut link = Assignment::new(feminine_id, health_worker_id);
        link.id = Some(self.fresh_id());
        link.created_at = Some(Utc::now());
        assignments.push(link);
        Ok(true)
    }

    async fn delete_assignment(&self, id: Id) -> ServiceResult<Option<Id>> {
        let mut assignments = self.assignments.write().await;
        match assignments.iter().position(|a| a.id == Some(id)) {
            Some(pos) => {
                let link = assignments.remove(pos);
                Ok(Some(link.health_worker_id))
            }
            None => Ok(None),
        }
    }

    async fn count_assignments_of_worker(&self, health_worker_id: Id) -> ServiceResult<i64> {
        let assignments = self.assignments.read().await;
        Ok(assignments
            .iter()
            .filter(|a| a.health_worker_id == health_worker_id)
            .count() as i64)
    }

    async fn count_assignments_of_feminine(&self, feminine_id: Id) -> ServiceResult<i64> {
        let assignments = self.assignments.read().await;
        Ok(assignments
            .iter()
            .filter(|a| a.feminine_id == feminine_id)
            .count() as i64)
    }

    async fn assigned_feminine(
        &self,
        health_worker_id: Id,
    ) -> ServiceResult<Vec<AssignedFeminineEntry>> {
        let users = self.users.read().await;
        let assignments = self.assignments.read().await;

        let mut entries: Vec<AssignedFeminineEntry> = assignments
            .iter()
            .filter(|a| a.health_worker_id == health_worker_id)
            .filter_map(|a| {
                let user = users.iter().find(|u| u.id == Some(a.feminine_id))?;
                Some(AssignedFeminineEntry {
                    feminine_id: a.feminine_id,
                    assignment_id: a.id.unwrap_or_default(),
                    first_name: user.first_name.clone(),
                    last_name: user.last_name.clone(),
                    middle_name: user.middle_name.clone(),
                })
            })
            .collect();

        entries.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(entries)
    }

    async fn unassigned_feminine(
        &self,
        health_worker_id: Id,
    ) -> ServiceResult<Vec<FeminineCandidate>> {
        let users = self.users.read().await;
        let assignments = self.assignments.read().await;

        let mut candidates: Vec<FeminineCandidate> = users
            .iter()
            .filter(|u| u.role == Role::Feminine && u.is_active)
            .filter(|u| {
                !assignments.iter().any(|a| {
                    Some(a.feminine_id) == u.id && a.health_worker_id == health_worker_id
                })
            })
            .map(|u| FeminineCandidate {
                id: u.id.unwrap_or_default(),
                first_name: u.first_name.clone(),
                last_name: u.last_name.clone(),
                middle_name: u.middle_name.clone(),
            })
            .collect();

        candidates.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(candidates)
    }

    async fn workers_of_feminine(&self, feminine_id: Id) -> ServiceResult<Vec<(String, String)>> {
        let users = self.users.read().await;
        let assignments = self.assignments.read().await;

        let mut names: Vec<(String, String)> = assignments
            .iter()
            .filter(|a| a.feminine_id == feminine_id)
            .filter_map(|a| {
                let worker = users
                    .iter()
                    .find(|u| u.id == Some(a.health_worker_id))
                    .filter(|u| u.role == Role::HealthWorker)?;
                Some((worker.first_name.clone(), worker.last_name.clone()))
            })
            .collect();

        names.sort_by(|a, b| (a.1.as_str(), a.0.as_str()).cmp(&(b.1.as_str(), b.0.as_str())));
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feminine(first: &str, last: &str) -> User {
        let mut user = User::new(
            Role::Feminine,
            first,
            last,
            NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
        );
        user.is_active = true;
        user
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let store = MemoryRecordStore::new();

        let mut first = feminine("Maria", "Santos");
        first.email = Some("maria@example.com".to_string());
        store.create_user(first).await.unwrap();

        let mut second = feminine("Ana", "Reyes");
        second.email = Some("maria@example.com".to_string());
        let err = store.create_user(second).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_insert_assignment_is_idempotent() {
        let store = MemoryRecordStore::new();
        assert!(store.insert_assignment(1, 2).await.unwrap());
        assert!(!store.insert_assignment(1, 2).await.unwrap());
        assert_eq!(store.count_assignments_of_worker(2).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_user_cascade_removes_dependents() {
        let store = MemoryRecordStore::new();
        let user = store.create_user(feminine("Maria", "Santos")).await.unwrap();
        let id = user.id.unwrap();

        store
            .create_period(id, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
            .await
            .unwrap();
        store.insert_assignment(id, 99).await.unwrap();

        assert!(store.delete_user_cascade(id).await.unwrap());
        assert!(store.find_user(id).await.unwrap().is_none());
        assert_eq!(store.count_assignments_of_feminine(id).await.unwrap(), 0);
        assert_eq!(store.unseen_periods(None).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_noop() {
        let store = MemoryRecordStore::new();
        assert!(!store.delete_user_cascade(404).await.unwrap());
    }
}
