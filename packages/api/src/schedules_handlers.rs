// ABOUTME: HTTP request handlers for schedule operations
// ABOUTME: Creation dispatches the assignment email without blocking the request

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use tracing::{error, info};

use csms_core::{validate_schedule_data, ScheduleCreateInput};
use csms_notify::templates;

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// List all schedules
pub async fn list_schedules(State(state): State<AppState>) -> impl IntoResponse {
    info!("Listing all schedules");

    match state.store.list_schedules().await {
        Ok(schedules) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(schedules))).into_response()
        }
        Err(e) => {
            error!("Failed to list schedules: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Create a new schedule and notify the assignee in the background
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(input): Json<ScheduleCreateInput>,
) -> impl IntoResponse {
    info!("Creating schedule for project: {}", input.project_name);

    let validation_errors = validate_schedule_data(&input);
    if !validation_errors.is_empty() {
        return ApiError::Validation(validation_errors).into_response();
    }

    let schedule = match state.store.create_schedule(input).await {
        Ok(schedule) => schedule,
        Err(e) => {
            error!("Failed to create schedule: {}", e);
            return ApiError::from(e).into_response();
        }
    };

    let mailer = state.mailer.clone();
    let subject = templates::schedule_subject(&schedule);
    let body = templates::schedule_notification(&schedule);
    let recipient = schedule.assigned_to_email.clone();
    let schedule_id = schedule.id.clone();
    tokio::spawn(async move {
        match mailer.send(&[recipient], &subject, &body).await {
            Ok(()) => info!("Schedule notification sent for {}", schedule_id),
            Err(e) => error!("Schedule notification failed for {}: {}", schedule_id, e),
        }
    });

    info!(
        "Created schedule: {} (ID: {})",
        schedule.project_name, schedule.id
    );
    (
        StatusCode::CREATED,
        ResponseJson(ApiResponse::success(schedule)),
    )
        .into_response()
}
