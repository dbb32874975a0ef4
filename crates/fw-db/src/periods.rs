//! Menstruation period repository
//!
//! Period rows plus the joined projections used by the notification and
//! dashboard queries.

use chrono::{DateTime, NaiveDate, Utc};
use fw_core::traits::Id;
use fw_models::{MenstruationPeriod, Role};
use sqlx::{FromRow, PgPool};

use crate::repository::RepositoryResult;

/// Period row from database
#[derive(Debug, Clone, FromRow)]
pub struct PeriodRow {
    pub id: i64,
    pub user_id: i64,
    pub menstruation_date: NaiveDate,
    pub is_seen: bool,
    pub created_at: DateTime<Utc>,
}

impl PeriodRow {
    pub fn into_period(self) -> MenstruationPeriod {
        MenstruationPeriod {
            id: Some(self.id),
            user_id: self.user_id,
            menstruation_date: self.menstruation_date,
            is_seen: self.is_seen,
            created_at: Some(self.created_at),
        }
    }
}

/// Unseen period entry joined with its owner's name parts
#[derive(Debug, Clone, FromRow)]
pub struct UnseenPeriodRow {
    pub id: i64,
    pub user_id: i64,
    pub menstruation_date: NaiveDate,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
}

/// Latest period entry per active Feminine user (calendar feed)
#[derive(Debug, Clone, FromRow)]
pub struct LatestPeriodRow {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub period_id: Option<i64>,
    pub menstruation_date: Option<NaiveDate>,
}

/// Per-month entry count within one year
#[derive(Debug, Clone, FromRow)]
pub struct MonthCountRow {
    pub month: i32,
    pub count: i64,
}

/// Period repository
pub struct PeriodRepository {
    pool: PgPool,
}

impl PeriodRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Log a new cycle-start date (always starts unseen)
    pub async fn create(&self, user_id: Id, date: NaiveDate) -> RepositoryResult<MenstruationPeriod> {
        let row = sqlx::query_as::<_, PeriodRow>(
            r#"
            INSERT INTO menstruation_periods (user_id, menstruation_date, is_seen, created_at)
            VALUES ($1, $2, FALSE, NOW())
            RETURNING id, user_id, menstruation_date, is_seen, created_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_period())
    }

    /// Acknowledge one entry. Returns false when the id does not exist.
    pub async fn mark_seen(&self, id: Id) -> RepositoryResult<bool> {
        let result = sqlx::query("UPDATE menstruation_periods SET is_seen = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Unseen entries belonging to active Feminine users; when a health
    /// worker id is given, restricted to that worker's assigned users.
    pub async fn unseen(&self, health_worker_id: Option<Id>) -> RepositoryResult<Vec<UnseenPeriodRow>> {
        let rows = match health_worker_id {
            None => {
                sqlx::query_as::<_, UnseenPeriodRow>(
                    r#"
                    SELECT p.id, u.id AS user_id, p.menstruation_date,
                           u.first_name, u.last_name, u.middle_name
                    FROM menstruation_periods p
                    JOIN users u ON u.id = p.user_id
                    WHERE u.user_role_id = $1 AND u.is_active = TRUE AND p.is_seen = FALSE
                    ORDER BY p.menstruation_date DESC, p.id DESC
                    "#,
                )
                .bind(Role::Feminine.as_i32())
                .fetch_all(&self.pool)
                .await?
            }
            Some(worker_id) => {
                sqlx::query_as::<_, UnseenPeriodRow>(
                    r#"
                    SELECT p.id, u.id AS user_id, p.menstruation_date,
                           u.first_name, u.last_name, u.middle_name
                    FROM menstruation_periods p
                    JOIN users u ON u.id = p.user_id
                    JOIN feminine_health_worker_groups g ON g.feminine_id = p.user_id
                    WHERE g.health_worker_id = $1
                      AND u.user_role_id = $2 AND u.is_active = TRUE AND p.is_seen = FALSE
                    ORDER BY p.menstruation_date DESC, p.id DESC
                    "#,
                )
                .bind(worker_id)
                .bind(Role::Feminine.as_i32())
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    /// Total entries logged within a calendar year
    pub async fn count_in_year(&self, year: i32) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM menstruation_periods \
             WHERE EXTRACT(YEAR FROM menstruation_date)::INT = $1",
        )
        .bind(year)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Entry counts grouped by month within one year. Months without
    /// entries are absent here; the dashboard layer zero-fills them.
    pub async fn monthly_counts(&self, year: i32) -> RepositoryResult<Vec<MonthCountRow>> {
        let rows = sqlx::query_as::<_, MonthCountRow>(
            r#"
            SELECT EXTRACT(MONTH FROM menstruation_date)::INT AS month, COUNT(*) AS count
            FROM menstruation_periods
            WHERE EXTRACT(YEAR FROM menstruation_date)::INT = $1
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Latest entry per active Feminine user, users without entries included
    pub async fn latest_per_active_feminine(&self) -> RepositoryResult<Vec<LatestPeriodRow>> {
        let rows = sqlx::query_as::<_, LatestPeriodRow>(
            r#"
            SELECT u.id AS user_id, u.first_name, u.last_name,
                   p.id AS period_id, p.menstruation_date
            FROM users u
            LEFT JOIN LATERAL (
                SELECT id, menstruation_date
                FROM menstruation_periods
                WHERE user_id = u.id
                ORDER BY menstruation_date DESC, id DESC
                LIMIT 1
            ) p ON TRUE
            WHERE u.user_role_id = $1 AND u.is_active = TRUE
            ORDER BY u.last_name ASC, u.first_name ASC
            "#,
        )
        .bind(Role::Feminine.as_i32())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_into_period() {
        let row = PeriodRow {
            id: 3,
            user_id: 8,
            menstruation_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            is_seen: false,
            created_at: Utc::now(),
        };

        let period = row.into_period();
        assert_eq!(period.id, Some(3));
        assert_eq!(period.user_id, 8);
        assert!(!period.is_seen);
    }
}
