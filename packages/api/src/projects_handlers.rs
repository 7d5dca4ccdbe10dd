// ABOUTME: HTTP request handlers for project operations
// ABOUTME: Creation seeds the standard checklist and spawns drive folder setup

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use csms_core::{
    validate_project_data, validate_project_update, Project, ProjectCreateInput,
    ProjectUpdateInput, Task, TaskCreateInput, STANDARD_TASKS,
};

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// Project with its checklist tasks
#[derive(Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub tasks: Vec<Task>,
}

/// List all projects
pub async fn list_projects(State(state): State<AppState>) -> impl IntoResponse {
    info!("Listing all projects");

    match state.store.list_projects().await {
        Ok(projects) => {
            info!("Retrieved {} projects", projects.len());
            (StatusCode::OK, ResponseJson(ApiResponse::success(projects))).into_response()
        }
        Err(e) => {
            error!("Failed to list projects: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Create a new project, seed its standard checklist, and set up drive
/// storage in the background
pub async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<ProjectCreateInput>,
) -> impl IntoResponse {
    info!("Creating project: {}", input.name);

    let validation_errors = validate_project_data(&input);
    if !validation_errors.is_empty() {
        return ApiError::Validation(validation_errors).into_response();
    }

    let project = match state.store.create_project(input).await {
        Ok(project) => project,
        Err(e) => {
            error!("Failed to create project: {}", e);
            return ApiError::from(e).into_response();
        }
    };

    for standard in STANDARD_TASKS {
        let result = state
            .store
            .create_task(TaskCreateInput {
                title: standard.title.to_string(),
                project_id: project.id.clone(),
                code: Some(standard.code.to_string()),
                category: Some(standard.category.to_string()),
                status: None,
                description: String::new(),
            })
            .await;
        if let Err(e) = result {
            error!("Failed to seed task {} for {}: {}", standard.code, project.id, e);
            return ApiError::from(e).into_response();
        }
    }

    // Folder creation happens off the request path; a miss only costs the
    // upload endpoint a retry later.
    let drive = state.drive.clone();
    let project_name = project.name.clone();
    tokio::spawn(async move {
        if let Err(e) = drive.ensure_project_folder(&project_name).await {
            warn!("Drive folder setup failed for '{}': {}", project_name, e);
        }
    });

    info!("Created project: {} (ID: {})", project.name, project.id);
    (
        StatusCode::CREATED,
        ResponseJson(ApiResponse::success(project)),
    )
        .into_response()
}

/// Get a specific project by ID, with its tasks
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Getting project with ID: {}", id);

    let project = match state.store.get_project(&id).await {
        Ok(Some(project)) => project,
        Ok(None) => {
            info!("Project not found: {}", id);
            return (
                StatusCode::NOT_FOUND,
                ResponseJson(ApiResponse::<()>::error("Project not found".to_string())),
            )
                .into_response();
        }
        Err(e) => {
            error!("Failed to get project {}: {}", id, e);
            return ApiError::from(e).into_response();
        }
    };

    match state.store.list_tasks(Some(&id)).await {
        Ok(tasks) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(ProjectDetail { project, tasks })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list tasks for {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}

/// Update an existing project
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(updates): Json<ProjectUpdateInput>,
) -> impl IntoResponse {
    info!("Updating project: {}", id);

    let validation_errors = validate_project_update(&updates);
    if !validation_errors.is_empty() {
        return ApiError::Validation(validation_errors).into_response();
    }

    match state.store.update_project(&id, updates).await {
        Ok(project) => {
            info!("Updated project: {} (ID: {})", project.name, project.id);
            (StatusCode::OK, ResponseJson(ApiResponse::success(project))).into_response()
        }
        Err(e) => {
            error!("Failed to update project {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}
