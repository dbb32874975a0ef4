//! Record Store port
//!
//! The aggregators' view of persistence. Services hold no state of their
//! own; every read is a fresh computation against this trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use fw_core::traits::Id;
use fw_models::{MenstruationPeriod, Role, User};

use crate::error::ServiceResult;

/// Unseen period entry joined with its owner's name parts
#[derive(Debug, Clone)]
pub struct UnseenPeriodEntry {
    pub period_id: Id,
    pub user_id: Id,
    pub menstruation_date: NaiveDate,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
}

/// Feminine user linked to a worker
#[derive(Debug, Clone)]
pub struct AssignedFeminineEntry {
    pub feminine_id: Id,
    pub assignment_id: Id,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
}

/// Active feminine user not linked to a given worker
#[derive(Debug, Clone)]
pub struct FeminineCandidate {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
}

/// Latest period entry per active feminine user
#[derive(Debug, Clone)]
pub struct LatestPeriodEntry {
    pub user_id: Id,
    pub first_name: String,
    pub last_name: String,
    pub period_id: Option<Id>,
    pub menstruation_date: Option<NaiveDate>,
}

/// Persistence port for all services.
///
/// Implementations must guarantee that assignment-pair uniqueness and
/// email/contact uniqueness hold under concurrent writers, and that
/// `delete_user_cascade` is all-or-nothing.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // -- users ---------------------------------------------------------

    /// Persist a new user; rejects duplicate email/contact with a conflict.
    async fn create_user(&self, user: User) -> ServiceResult<User>;

    async fn find_user(&self, id: Id) -> ServiceResult<Option<User>>;

    /// Activate (verify) an account. False when the user does not exist.
    async fn activate_user(&self, id: Id) -> ServiceResult<bool>;

    /// Overwrite the stored password hash. False when the user does not exist.
    async fn reset_password(&self, id: Id, password_hash: &str) -> ServiceResult<bool>;

    /// Remove the user, their period entries, and their assignment links
    /// atomically. False when the user does not exist.
    async fn delete_user_cascade(&self, id: Id) -> ServiceResult<bool>;

    /// Unverified Feminine accounts, newest first
    async fn unverified_feminine(&self) -> ServiceResult<Vec<User>>;

    /// All Feminine accounts ordered by name
    async fn feminine_ordered(&self) -> ServiceResult<Vec<User>>;

    /// All Health Worker accounts ordered by name
    async fn health_workers_ordered(&self) -> ServiceResult<Vec<User>>;

    /// Active non-admin accounts ordered by name
    async fn active_non_admin_ordered(&self) -> ServiceResult<Vec<User>>;

    async fn count_by_role(&self, role: Role) -> ServiceResult<i64>;

    async fn count_non_admin(&self) -> ServiceResult<i64>;

    /// Inactive users; restricted to one role when given
    async fn count_inactive(&self, role: Option<Role>) -> ServiceResult<i64>;

    /// Feminine users by menstruation status
    async fn count_feminine_by_status(&self, status: bool) -> ServiceResult<i64>;

    /// Feminine accounts awaiting verification
    async fn count_pending_feminine(&self) -> ServiceResult<i64>;

    // -- period entries ------------------------------------------------

    async fn create_period(&self, user_id: Id, date: NaiveDate)
        -> ServiceResult<MenstruationPeriod>;

    /// Acknowledge one entry. False when the id does not exist.
    async fn mark_period_seen(&self, id: Id) -> ServiceResult<bool>;

    /// Unseen entries of active Feminine users; scoped to one worker's
    /// assigned users when a worker id is given.
    async fn unseen_periods(
        &self,
        health_worker_id: Option<Id>,
    ) -> ServiceResult<Vec<UnseenPeriodEntry>>;

    async fn count_periods_in_year(&self, year: i32) -> ServiceResult<i64>;

    /// (month, count) pairs for one year; months without entries absent
    async fn monthly_period_counts(&self, year: i32) -> ServiceResult<Vec<(u32, i64)>>;

    async fn latest_periods_of_active_feminine(&self)
        -> ServiceResult<Vec<LatestPeriodEntry>>;

    // -- assignment links ----------------------------------------------

    /// Insert one link if absent. True when a row was inserted.
    async fn insert_assignment(
        &self,
        feminine_id: Id,
        health_worker_id: Id,
    ) -> ServiceResult<bool>;

    /// Delete one link by id, reporting the affected worker.
    /// None when the id does not exist.
    async fn delete_assignment(&self, id: Id) -> ServiceResult<Option<Id>>;

    async fn count_assignments_of_worker(&self, health_worker_id: Id) -> ServiceResult<i64>;

    async fn count_assignments_of_feminine(&self, feminine_id: Id) -> ServiceResult<i64>;

    /// Feminine users linked to one worker, ordered by name
    async fn assigned_feminine(
        &self,
        health_worker_id: Id,
    ) -> ServiceResult<Vec<AssignedFeminineEntry>>;

    /// Active Feminine users not linked to this specific worker
    async fn unassigned_feminine(
        &self,
        health_worker_id: Id,
    ) -> ServiceResult<Vec<FeminineCandidate>>;

    /// (first_name, last_name) of the workers monitoring one feminine user
    async fn workers_of_feminine(&self, feminine_id: Id) -> ServiceResult<Vec<(String, String)>>;
}
