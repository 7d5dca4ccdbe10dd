// ABOUTME: HTTP request handler for the rig-down reminder scan
// ABOUTME: Thin translation onto the reminder orchestrator

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use chrono::Utc;
use tracing::{error, info};

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// Scan all projects and dispatch due rig-down reminders
pub async fn check_reminders(State(state): State<AppState>) -> impl IntoResponse {
    let today = Utc::now().date_naive();
    info!("Running reminder scan for {}", today);

    match state.reminders.scan(today).await {
        Ok(summary) => {
            info!("Reminder scan fired {} reminder(s)", summary.reminders_sent);
            (StatusCode::OK, ResponseJson(ApiResponse::success(summary))).into_response()
        }
        Err(e) => {
            error!("Reminder scan failed: {}", e);
            ApiError::from(e).into_response()
        }
    }
}
