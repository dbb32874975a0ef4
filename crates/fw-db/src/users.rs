//! User repository
//!
//! Database operations for users, including the cascading delete that
//! removes a user's period entries and assignment links in one transaction.

use chrono::{DateTime, NaiveDate, Utc};
use fw_core::traits::Id;
use fw_models::{Role, User};
use sqlx::{FromRow, PgPool};

use crate::repository::{map_unique_violation, RepositoryError, RepositoryResult};

const USER_COLUMNS: &str = "id, user_role_id, first_name, last_name, middle_name, email, \
     contact_no, address, birthdate, is_active, is_verified, menstruation_status, remarks, \
     password_hash, created_at, updated_at";

/// User database entity
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub user_role_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub address: Option<String>,
    pub birthdate: NaiveDate,
    pub is_active: bool,
    pub is_verified: bool,
    pub menstruation_status: Option<bool>,
    pub remarks: Option<String>,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert into the domain entity
    pub fn into_user(self) -> RepositoryResult<User> {
        let role = Role::from_i32(self.user_role_id).ok_or_else(|| {
            RepositoryError::Validation(format!(
                "unknown role discriminator {} for user {}",
                self.user_role_id, self.id
            ))
        })?;

        Ok(User {
            id: Some(self.id),
            role,
            first_name: self.first_name,
            last_name: self.last_name,
            middle_name: self.middle_name,
            email: self.email,
            contact_no: self.contact_no,
            address: self.address,
            birthdate: self.birthdate,
            is_active: self.is_active,
            is_verified: self.is_verified,
            menstruation_status: self.menstruation_status,
            remarks: self.remarks,
            password_hash: self.password_hash,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        })
    }
}

/// User repository implementation
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user row.
    ///
    /// Email/contact uniqueness is enforced by the database constraints, not
    /// by a pre-check, so concurrent duplicate submissions collapse to one
    /// conflict error.
    pub async fn create(&self, user: &User) -> RepositoryResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (
                user_role_id, first_name, last_name, middle_name, email, contact_no,
                address, birthdate, is_active, is_verified, menstruation_status, remarks,
                password_hash, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW(), NOW()
            )
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.role.as_i32())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.middle_name)
        .bind(&user.email)
        .bind(&user.contact_no)
        .bind(&user.address)
        .bind(user.birthdate)
        .bind(user.is_active)
        .bind(user.is_verified)
        .bind(user.menstruation_status)
        .bind(&user.remarks)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        row.into_user()
    }

    /// Find a user by id
    pub async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Verify an account: activates it and records the verification.
    /// Returns false when the user does not exist.
    pub async fn activate(&self, id: Id) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET is_active = TRUE, is_verified = TRUE, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the stored password hash.
    /// Returns false when the user does not exist.
    pub async fn reset_password(&self, id: Id, password_hash: &str) -> RepositoryResult<bool> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
                .bind(password_hash)
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a user together with their period entries and assignment
    /// links, as a single transaction. Returns false when the user does
    /// not exist (nothing is deleted in that case).
    pub async fn delete_cascade(&self, id: Id) -> RepositoryResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM menstruation_periods WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM feminine_health_worker_groups \
             WHERE feminine_id = $1 OR health_worker_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        tracing::info!(user_id = id, "deleted user and dependent records");
        Ok(true)
    }

    /// Unverified Feminine accounts, newest first (signup notifications)
    pub async fn unverified_feminine(&self) -> RepositoryResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE user_role_id = $1 AND is_active = FALSE
            ORDER BY created_at DESC
            "#
        ))
        .bind(Role::Feminine.as_i32())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// All Feminine accounts ordered by last name
    pub async fn feminine_ordered(&self) -> RepositoryResult<Vec<User>> {
        self.by_role_ordered(Role::Feminine, false).await
    }

    /// All Health Worker accounts ordered by last name
    pub async fn health_workers_ordered(&self) -> RepositoryResult<Vec<User>> {
        self.by_role_ordered(Role::HealthWorker, false).await
    }

    /// Active Feminine accounts ordered by last name
    pub async fn active_feminine_ordered(&self) -> RepositoryResult<Vec<User>> {
        self.by_role_ordered(Role::Feminine, true).await
    }

    async fn by_role_ordered(&self, role: Role, active_only: bool) -> RepositoryResult<Vec<User>> {
        let mut sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_role_id = $1"
        );
        if active_only {
            sql.push_str(" AND is_active = TRUE");
        }
        sql.push_str(" ORDER BY last_name ASC, first_name ASC");

        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(role.as_i32())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Active non-admin accounts ordered by last name (account settings list)
    pub async fn active_non_admin_ordered(&self) -> RepositoryResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE user_role_id IN ($1, $2) AND is_active = TRUE
            ORDER BY last_name ASC, first_name ASC
            "#
        ))
        .bind(Role::Feminine.as_i32())
        .bind(Role::HealthWorker.as_i32())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Count users holding a role
    pub async fn count_by_role(&self, role: Role) -> RepositoryResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE user_role_id = $1")
                .bind(role.as_i32())
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Count non-admin users
    pub async fn count_non_admin(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE user_role_id IN ($1, $2)",
        )
        .bind(Role::Feminine.as_i32())
        .bind(Role::HealthWorker.as_i32())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Count inactive users; restricted to one role when given
    pub async fn count_inactive(&self, role: Option<Role>) -> RepositoryResult<i64> {
        let count = match role {
            Some(role) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM users WHERE user_role_id = $1 AND is_active = FALSE",
                )
                .bind(role.as_i32())
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM users \
                     WHERE user_role_id IN ($1, $2) AND is_active = FALSE",
                )
                .bind(Role::Feminine.as_i32())
                .bind(Role::HealthWorker.as_i32())
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(count)
    }

    /// Count Feminine users by menstruation status
    pub async fn count_feminine_by_status(&self, status: bool) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE user_role_id = $1 AND menstruation_status = $2",
        )
        .bind(Role::Feminine.as_i32())
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Count Feminine accounts still awaiting verification
    pub async fn count_pending_feminine(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE user_role_id = $1 AND is_active = FALSE",
        )
        .bind(Role::Feminine.as_i32())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> UserRow {
        UserRow {
            id: 5,
            user_role_id: 2,
            first_name: "Maria".to_string(),
            last_name: "Santos".to_string(),
            middle_name: None,
            email: Some("maria@example.com".to_string()),
            contact_no: None,
            address: None,
            birthdate: NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
            is_active: true,
            is_verified: true,
            menstruation_status: Some(true),
            remarks: None,
            password_hash: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_into_user() {
        let user = sample_row().into_user().unwrap();
        assert_eq!(user.id, Some(5));
        assert_eq!(user.role, Role::Feminine);
        assert_eq!(user.menstruation_status, Some(true));
    }

    #[test]
    fn test_row_with_unknown_role_is_rejected() {
        let mut row = sample_row();
        row.user_role_id = 9;
        assert!(matches!(
            row.into_user(),
            Err(RepositoryError::Validation(_))
        ));
    }
}
