//! Notification API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use fw_core::traits::Id;
use fw_services::{
    NotificationService, PeriodNotification, Scope, SignupNotification,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extractors::AppState;

/// Optional worker scope for period-notification queries
#[derive(Debug, Deserialize)]
pub struct ScopeQuery {
    pub health_worker_id: Option<Id>,
}

impl ScopeQuery {
    fn scope(&self) -> Scope {
        match self.health_worker_id {
            Some(id) => Scope::HealthWorker(id),
            None => Scope::Global,
        }
    }
}

#[derive(Serialize)]
pub struct SignupNotificationsResponse {
    status: &'static str,
    count: usize,
    notifications: Vec<SignupNotification>,
}

/// List unverified Feminine signups (admin badge feed)
///
/// GET /notifications/signups
pub async fn signup_notifications(
    State(state): State<AppState>,
) -> ApiResult<Json<SignupNotificationsResponse>> {
    let service = NotificationService::new(state.store());
    let notifications = service.signup_notifications().await?;

    Ok(Json(SignupNotificationsResponse {
        status: "success",
        count: notifications.len(),
        notifications,
    }))
}

#[derive(Serialize)]
pub struct PeriodNotificationsResponse {
    status: &'static str,
    count: usize,
    notifications: Vec<PeriodNotification>,
}

/// List unseen period entries, globally or scoped to one worker
///
/// GET /notifications/periods?health_worker_id=N
pub async fn period_notifications(
    State(state): State<AppState>,
    Query(query): Query<ScopeQuery>,
) -> ApiResult<Json<PeriodNotificationsResponse>> {
    let service = NotificationService::new(state.store());
    let notifications = service.period_notifications(query.scope()).await?;

    Ok(Json(PeriodNotificationsResponse {
        status: "success",
        count: notifications.len(),
        notifications,
    }))
}

#[derive(Serialize)]
pub struct SeenResponse {
    status: &'static str,
    id: Id,
    new_notification_count: usize,
}

/// Acknowledge one period entry; reports the caller's refreshed badge count
///
/// POST /notifications/periods/:id/seen?health_worker_id=N
pub async fn mark_period_seen(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Query(query): Query<ScopeQuery>,
) -> ApiResult<Json<SeenResponse>> {
    let service = NotificationService::new(state.store());
    let ack = service.mark_period_seen(id, query.scope()).await?;

    Ok(Json(SeenResponse {
        status: "success",
        id: ack.id,
        new_notification_count: ack.new_notification_count,
    }))
}
