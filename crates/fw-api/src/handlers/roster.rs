//! Roster API handlers
//!
//! Structured rows for the admin tables; rendering happens client-side.

use axum::{extract::State, Json};
use fw_services::{
    AccountOverview, CalendarEntry, FeminineOverview, HealthWorkerOverview, RosterService,
};
use serde::Serialize;

use crate::error::ApiResult;
use crate::extractors::AppState;

#[derive(Serialize)]
pub struct RosterResponse<T> {
    status: &'static str,
    data: Vec<T>,
}

impl<T> RosterResponse<T> {
    fn new(data: Vec<T>) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

/// All Feminine accounts with assignment state
///
/// GET /roster/feminine
pub async fn feminine(
    State(state): State<AppState>,
) -> ApiResult<Json<RosterResponse<FeminineOverview>>> {
    let service = RosterService::new(state.store());
    Ok(Json(RosterResponse::new(service.feminine_overview().await?)))
}

/// All Health Worker accounts with their assigned lists
///
/// GET /roster/health-workers
pub async fn health_workers(
    State(state): State<AppState>,
) -> ApiResult<Json<RosterResponse<HealthWorkerOverview>>> {
    let service = RosterService::new(state.store());
    Ok(Json(RosterResponse::new(
        service.health_worker_overview().await?,
    )))
}

/// Active non-admin accounts (password-reset screen)
///
/// GET /roster/accounts
pub async fn accounts(
    State(state): State<AppState>,
) -> ApiResult<Json<RosterResponse<AccountOverview>>> {
    let service = RosterService::new(state.store());
    Ok(Json(RosterResponse::new(service.account_overview().await?)))
}

/// Latest period entry per active Feminine user
///
/// GET /roster/calendar
pub async fn calendar(
    State(state): State<AppState>,
) -> ApiResult<Json<RosterResponse<CalendarEntry>>> {
    let service = RosterService::new(state.store());
    Ok(Json(RosterResponse::new(service.calendar().await?)))
}
