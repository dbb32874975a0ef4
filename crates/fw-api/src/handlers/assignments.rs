//! Assignment API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use fw_core::traits::Id;
use fw_services::{AssignedFeminine, AssignmentService, FeminineOption};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extractors::AppState;

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    #[serde(default)]
    pub feminine_ids: Vec<Id>,
}

#[derive(Serialize)]
pub struct AssignResponse {
    status: &'static str,
    message: String,
    assigned_count: usize,
}

/// Bulk-attach feminine users to one worker (idempotent per pair)
///
/// POST /health-workers/:id/assignments
pub async fn assign_feminine(
    State(state): State<AppState>,
    Path(health_worker_id): Path<Id>,
    Json(request): Json<AssignRequest>,
) -> ApiResult<Json<AssignResponse>> {
    let service = AssignmentService::new(state.store());
    let assigned_count = service
        .assign(health_worker_id, &request.feminine_ids)
        .await?;

    Ok(Json(AssignResponse {
        status: "success",
        message: format!("{} Feminine successfully assigned.", assigned_count),
        assigned_count,
    }))
}

#[derive(Serialize)]
pub struct UnassignResponse {
    status: &'static str,
    message: &'static str,
    updated_count: i64,
}

/// Remove one assignment link by its own id
///
/// DELETE /assignments/:id
pub async fn unassign(
    State(state): State<AppState>,
    Path(assignment_id): Path<Id>,
) -> ApiResult<Json<UnassignResponse>> {
    let service = AssignmentService::new(state.store());
    let updated_count = service.unassign(assignment_id).await?;

    Ok(Json(UnassignResponse {
        status: "success",
        message: "Feminine successfully deleted.",
        updated_count,
    }))
}

#[derive(Serialize)]
pub struct AssignmentListsResponse {
    status: &'static str,
    assigned_feminine_list: Vec<AssignedFeminine>,
    feminine_list: Vec<FeminineOption>,
}

/// Both sides of the assignment modal: who is linked to this worker, and
/// which active feminine users could still be linked
///
/// GET /health-workers/:id/feminine
pub async fn assignment_lists(
    State(state): State<AppState>,
    Path(health_worker_id): Path<Id>,
) -> ApiResult<Json<AssignmentListsResponse>> {
    let service = AssignmentService::new(state.store());
    let assigned_feminine_list = service.assigned_feminine(health_worker_id).await?;
    let feminine_list = service.unassigned_feminine(health_worker_id).await?;

    Ok(Json(AssignmentListsResponse {
        status: "success",
        assigned_feminine_list,
        feminine_list,
    }))
}
