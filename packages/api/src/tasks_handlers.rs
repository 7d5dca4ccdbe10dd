// ABOUTME: HTTP request handlers for task operations
// ABOUTME: Status updates by field merge plus multipart attachment upload

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use csms_core::{validate_task_data, Attachment, TaskCreateInput, TaskStatus, TaskUpdateInput};

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

#[derive(Deserialize)]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub filename: String,
}

/// List all tasks, optionally filtered by status
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> impl IntoResponse {
    info!("Listing tasks");

    match state.store.list_tasks(None).await {
        Ok(tasks) => {
            let tasks: Vec<_> = match query.status {
                Some(status) => tasks.into_iter().filter(|t| t.status == status).collect(),
                None => tasks,
            };
            (StatusCode::OK, ResponseJson(ApiResponse::success(tasks))).into_response()
        }
        Err(e) => {
            error!("Failed to list tasks: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Create a new task
///
/// The referenced project must exist; the checklist seeded at project
/// creation can be extended with ad hoc entries this way.
pub async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<TaskCreateInput>,
) -> impl IntoResponse {
    info!("Creating task: {}", input.title);

    let validation_errors = validate_task_data(&input);
    if !validation_errors.is_empty() {
        return ApiError::Validation(validation_errors).into_response();
    }

    match state.store.create_task(input).await {
        Ok(task) => {
            info!("Created task: {} (ID: {})", task.title, task.id);
            (StatusCode::CREATED, ResponseJson(ApiResponse::success(task))).into_response()
        }
        Err(e) => {
            error!("Failed to create task: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Update an existing task
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(updates): Json<TaskUpdateInput>,
) -> impl IntoResponse {
    info!("Updating task: {}", id);

    match state.store.update_task(&id, updates).await {
        Ok(task) => {
            info!("Updated task: {} (ID: {})", task.title, task.id);
            (StatusCode::OK, ResponseJson(ApiResponse::success(task))).into_response()
        }
        Err(e) => {
            error!("Failed to update task {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}

/// Upload an attachment for a task
///
/// The bytes go to drive storage under the owning project's folder; only
/// `{filename, uploaded_at}` is appended to the task record.
pub async fn upload_attachment(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    info!("Uploading attachment for task: {}", task_id);

    let task = match state.store.get_task(&task_id).await {
        Ok(Some(task)) => task,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                ResponseJson(ApiResponse::<()>::error("Task not found".to_string())),
            )
                .into_response();
        }
        Err(e) => return ApiError::from(e).into_response(),
    };

    let project = match state.store.get_project(&task.project_id).await {
        Ok(Some(project)) => project,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                ResponseJson(ApiResponse::<()>::error("Project not found".to_string())),
            )
                .into_response();
        }
        Err(e) => return ApiError::from(e).into_response(),
    };

    let (filename, content) = loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let Some(filename) = field.file_name().map(str::to_string) else {
                    continue;
                };
                match field.bytes().await {
                    Ok(bytes) => break (filename, bytes.to_vec()),
                    Err(e) => {
                        error!("Failed to read upload body: {}", e);
                        return (
                            StatusCode::BAD_REQUEST,
                            ResponseJson(ApiResponse::<()>::error(
                                "Could not read uploaded file".to_string(),
                            )),
                        )
                            .into_response();
                    }
                }
            }
            Ok(None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    ResponseJson(ApiResponse::<()>::error("No file in request".to_string())),
                )
                    .into_response();
            }
            Err(e) => {
                error!("Malformed multipart request: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    ResponseJson(ApiResponse::<()>::error(
                        "Malformed multipart request".to_string(),
                    )),
                )
                    .into_response();
            }
        }
    };

    if let Err(e) = state
        .drive
        .upload_file(content, &filename, &project.name)
        .await
    {
        error!("Drive upload failed for '{}': {}", filename, e);
        return ApiError::from(e).into_response();
    }

    let attachment = Attachment {
        filename: filename.clone(),
        uploaded_at: Utc::now(),
    };

    match state.store.append_attachment(&task_id, attachment).await {
        Ok(_) => {
            info!("Attached '{}' to task {}", filename, task_id);
            (
                StatusCode::OK,
                ResponseJson(ApiResponse::success(UploadResponse { filename })),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to record attachment on {}: {}", task_id, e);
            ApiError::from(e).into_response()
        }
    }
}
