//! Dashboard API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use fw_core::traits::Id;
use fw_services::{DashboardService, DashboardSummary, MonthBucket, PieBucket};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extractors::AppState;

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

impl YearQuery {
    fn year_or_current(&self) -> i32 {
        self.year.unwrap_or_else(|| Utc::now().year())
    }
}

#[derive(Serialize)]
pub struct SummaryResponse {
    status: &'static str,
    #[serde(flatten)]
    summary: DashboardSummary,
}

/// Point-in-time dashboard counts
///
/// GET /dashboard/summary?year=YYYY
pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> ApiResult<Json<SummaryResponse>> {
    let service = DashboardService::new(state.store());
    let summary = service.summary(query.year_or_current()).await?;

    Ok(Json(SummaryResponse {
        status: "success",
        summary,
    }))
}

#[derive(Serialize)]
pub struct PieChartResponse {
    status: &'static str,
    data: Vec<PieBucket>,
}

/// Feminine-user categories; empty buckets are omitted
///
/// GET /dashboard/pie-chart
pub async fn pie_chart(State(state): State<AppState>) -> ApiResult<Json<PieChartResponse>> {
    let service = DashboardService::new(state.store());
    let data = service.pie_chart().await?;

    Ok(Json(PieChartResponse {
        status: "success",
        data,
    }))
}

#[derive(Serialize)]
pub struct MonthlyGraphResponse {
    status: &'static str,
    data: Vec<MonthBucket>,
}

/// Twelve-month period-entry histogram
///
/// GET /dashboard/monthly-graph?year=YYYY
pub async fn monthly_graph(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> ApiResult<Json<MonthlyGraphResponse>> {
    let service = DashboardService::new(state.store());
    let data = service.monthly_histogram(query.year_or_current()).await?;

    Ok(Json(MonthlyGraphResponse {
        status: "success",
        data,
    }))
}

#[derive(Serialize)]
pub struct AssignmentStatusResponse {
    status: &'static str,
    is_assigned: bool,
}

/// Whether any worker is assigned to this feminine user
///
/// GET /feminine/:id/assignment-status
pub async fn assignment_status(
    State(state): State<AppState>,
    Path(feminine_id): Path<Id>,
) -> ApiResult<Json<AssignmentStatusResponse>> {
    let service = DashboardService::new(state.store());
    let is_assigned = service.assignment_status_of(feminine_id).await?;

    Ok(Json(AssignmentStatusResponse {
        status: "success",
        is_assigned,
    }))
}
