//! Health checks

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sqlx::PgPool;

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health report for the whole process
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: &'static str,
    pub database: HealthStatus,
}

impl HealthReport {
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Health checker over the database pool
pub struct HealthChecker {
    pool: Option<PgPool>,
}

impl HealthChecker {
    pub fn new(pool: Option<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn check(&self) -> HealthReport {
        let database = match &self.pool {
            Some(pool) => match sqlx::query("SELECT 1").execute(pool).await {
                Ok(_) => HealthStatus::Healthy,
                Err(e) => {
                    tracing::warn!("database health check failed: {}", e);
                    HealthStatus::Unhealthy
                }
            },
            None => HealthStatus::Unhealthy,
        };

        HealthReport {
            status: database,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }
    }
}

/// GET /health
pub async fn health(
    State(checker): State<Arc<HealthChecker>>,
) -> (StatusCode, Json<HealthReport>) {
    let report = checker.check().await;
    (report.http_status(), Json(report))
}

/// GET /health/live — process is up, nothing else checked
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_pool_is_unhealthy() {
        let checker = HealthChecker::new(None);
        let report = checker.check().await;
        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert_eq!(report.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
