//! API routes

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::{accounts, assignments, dashboard, notifications, roster};

/// Create the complete API router
pub fn router(state: AppState) -> Router {
    Router::new()
        // notifications
        .route("/notifications/signups", get(notifications::signup_notifications))
        .route("/notifications/periods", get(notifications::period_notifications))
        .route(
            "/notifications/periods/:id/seen",
            post(notifications::mark_period_seen),
        )
        // accounts
        .route("/accounts/register", post(accounts::register))
        .route("/accounts/:id/verify", post(accounts::verify_account))
        .route("/accounts/:id/reset-password", post(accounts::reset_password))
        .route("/accounts/:id", delete(accounts::delete_account))
        .route("/periods", post(accounts::log_period))
        // assignment graph
        .route(
            "/health-workers/:id/assignments",
            post(assignments::assign_feminine),
        )
        .route("/health-workers/:id/feminine", get(assignments::assignment_lists))
        .route("/assignments/:id", delete(assignments::unassign))
        // dashboard
        .route("/dashboard/summary", get(dashboard::summary))
        .route("/dashboard/pie-chart", get(dashboard::pie_chart))
        .route("/dashboard/monthly-graph", get(dashboard::monthly_graph))
        .route(
            "/feminine/:id/assignment-status",
            get(dashboard::assignment_status),
        )
        // roster
        .route("/roster/feminine", get(roster::feminine))
        .route("/roster/health-workers", get(roster::health_workers))
        .route("/roster/accounts", get(roster::accounts))
        .route("/roster/calendar", get(roster::calendar))
        .with_state(state)
}
