//! Account API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use fw_core::traits::Id;
use fw_models::NewUser;
use fw_services::AccountService;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extractors::AppState;

#[derive(Serialize)]
pub struct RegisterResponse {
    status: &'static str,
    message: &'static str,
    id: Id,
}

/// Self-registration; the account awaits admin verification
///
/// POST /accounts/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<NewUser>,
) -> ApiResult<Json<RegisterResponse>> {
    let service = AccountService::new(state.store());
    let user = service.register(input).await?;

    Ok(Json(RegisterResponse {
        status: "success",
        message: "Registration completed! Please wait for the admin to verify your account.",
        id: user.id.unwrap_or_default(),
    }))
}

#[derive(Serialize)]
pub struct VerifyResponse {
    status: &'static str,
    message: &'static str,
    new_notification_count: usize,
}

/// Admin verification; activates the account
///
/// POST /accounts/:id/verify
pub async fn verify_account(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<Json<VerifyResponse>> {
    let service = AccountService::new(state.store());
    let new_notification_count = service.verify_account(id).await?;

    Ok(Json(VerifyResponse {
        status: "success",
        message: "Account successfully verified.",
        new_notification_count,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password_hash: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    status: &'static str,
    message: &'static str,
}

/// Overwrite the stored password hash
///
/// POST /accounts/:id/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(request): Json<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = AccountService::new(state.store());
    service.reset_password(id, &request.password_hash).await?;

    Ok(Json(MessageResponse {
        status: "success",
        message: "Password successfully reset.",
    }))
}

/// Delete an account and everything attached to it
///
/// DELETE /accounts/:id
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<Json<MessageResponse>> {
    let service = AccountService::new(state.store());
    service.delete_user(id).await?;

    Ok(Json(MessageResponse {
        status: "success",
        message: "Account successfully deleted.",
    }))
}

#[derive(Debug, Deserialize)]
pub struct LogPeriodRequest {
    pub user_id: Id,
    pub menstruation_date: NaiveDate,
}

#[derive(Serialize)]
pub struct LogPeriodResponse {
    status: &'static str,
    message: &'static str,
    id: Id,
}

/// Log one cycle-start date for a Feminine user
///
/// POST /periods
pub async fn log_period(
    State(state): State<AppState>,
    Json(request): Json<LogPeriodRequest>,
) -> ApiResult<Json<LogPeriodResponse>> {
    let service = AccountService::new(state.store());
    let period = service
        .log_period(request.user_id, request.menstruation_date)
        .await?;

    Ok(Json(LogPeriodResponse {
        status: "success",
        message: "Period entry successfully recorded.",
        id: period.id.unwrap_or_default(),
    }))
}
