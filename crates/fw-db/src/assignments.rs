//! Assignment repository
//!
//! The health-worker/feminine link table. Pair uniqueness is guaranteed by
//! the table constraint; inserts race safely via ON CONFLICT DO NOTHING.

use fw_core::traits::Id;
use fw_models::Role;
use sqlx::{FromRow, PgPool};

use crate::repository::RepositoryResult;

/// Assigned feminine joined with name parts
#[derive(Debug, Clone, FromRow)]
pub struct AssignedFeminineRow {
    pub feminine_id: i64,
    pub assignment_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
}

/// Candidate feminine not yet linked to a given worker
#[derive(Debug, Clone, FromRow)]
pub struct UnassignedFeminineRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
}

/// Assignment repository
pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one link if absent. Returns true when a row was inserted,
    /// false when the pair already existed.
    pub async fn insert_pair(&self, feminine_id: Id, health_worker_id: Id) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO feminine_health_worker_groups (feminine_id, health_worker_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (feminine_id, health_worker_id) DO NOTHING
            "#,
        )
        .bind(feminine_id)
        .bind(health_worker_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete one link by its own id, reporting the affected worker.
    /// Returns None when the id does not exist.
    pub async fn delete(&self, id: Id) -> RepositoryResult<Option<Id>> {
        let worker_id = sqlx::query_scalar::<_, i64>(
            "DELETE FROM feminine_health_worker_groups WHERE id = $1 RETURNING health_worker_id",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(worker_id)
    }

    /// Remaining link count for one worker
    pub async fn count_for_worker(&self, health_worker_id: Id) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM feminine_health_worker_groups WHERE health_worker_id = $1",
        )
        .bind(health_worker_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Link count for one feminine user (drives Assigned/Not Assigned)
    pub async fn count_for_feminine(&self, feminine_id: Id) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM feminine_health_worker_groups WHERE feminine_id = $1",
        )
        .bind(feminine_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Feminine users linked to one worker, ordered by name
    pub async fn assigned_feminine(&self, health_worker_id: Id) -> RepositoryResult<Vec<AssignedFeminineRow>> {
        let rows = sqlx::query_as::<_, AssignedFeminineRow>(
            r#"
            SELECT g.feminine_id, g.id AS assignment_id,
                   u.first_name, u.last_name, u.middle_name
            FROM feminine_health_worker_groups g
            JOIN users u ON u.id = g.feminine_id
            WHERE g.health_worker_id = $1
            ORDER BY u.last_name ASC, u.first_name ASC
            "#,
        )
        .bind(health_worker_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Active Feminine users not linked to this specific worker.
    ///
    /// Users assigned to a different worker still appear; assignment is
    /// many-to-many, not exclusive.
    pub async fn unassigned_feminine(&self, health_worker_id: Id) -> RepositoryResult<Vec<UnassignedFeminineRow>> {
        let rows = sqlx::query_as::<_, UnassignedFeminineRow>(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.middle_name
            FROM users u
            WHERE u.user_role_id = $1
              AND u.is_active = TRUE
              AND NOT EXISTS (
                  SELECT 1 FROM feminine_health_worker_groups g
                  WHERE g.feminine_id = u.id AND g.health_worker_id = $2
              )
            ORDER BY u.last_name ASC, u.first_name ASC
            "#,
        )
        .bind(Role::Feminine.as_i32())
        .bind(health_worker_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Names of the workers monitoring one feminine user
    pub async fn workers_of_feminine(&self, feminine_id: Id) -> RepositoryResult<Vec<(String, String)>> {
        let rows = sqlx::query_as::<_, (String, String)>(
            r#"
            SELECT u.first_name, u.last_name
            FROM feminine_health_worker_groups g
            JOIN users u ON u.id = g.health_worker_id
            WHERE g.feminine_id = $1 AND u.user_role_id = $2
            ORDER BY u.last_name ASC, u.first_name ASC
            "#,
        )
        .bind(feminine_id)
        .bind(Role::HealthWorker.as_i32())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
