// ABOUTME: Dashboard statistics aggregated from the record store
// ABOUTME: Counts by status, completion rates, and upcoming schedule dates

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use tracing::{error, info};

use csms_core::{Project, ProjectStatus, Schedule, Task, TaskStatus};

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// Projects listed in the per-project completion breakdown.
const COMPLETION_BREAKDOWN_LIMIT: usize = 10;

#[derive(Serialize)]
pub struct ProjectStatusCounts {
    #[serde(rename = "Upcoming")]
    pub upcoming: usize,
    /// Ongoing and InProgress count as one bucket on the dashboard.
    #[serde(rename = "InProgress")]
    pub in_progress: usize,
    #[serde(rename = "Completed")]
    pub completed: usize,
    #[serde(rename = "OnHold")]
    pub on_hold: usize,
}

#[derive(Serialize)]
pub struct ProjectStats {
    pub total: usize,
    pub by_status: ProjectStatusCounts,
}

#[derive(Serialize)]
pub struct TaskStatusCounts {
    #[serde(rename = "Upcoming")]
    pub upcoming: usize,
    #[serde(rename = "In Progress")]
    pub in_progress: usize,
    #[serde(rename = "Completed")]
    pub completed: usize,
}

#[derive(Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub by_status: TaskStatusCounts,
    pub completion_rate: f64,
    pub with_attachments: usize,
}

#[derive(Serialize)]
pub struct ScheduleStats {
    pub total: usize,
    pub upcoming_mwt: usize,
    pub upcoming_hse: usize,
    pub this_month: usize,
}

#[derive(Serialize)]
pub struct ProjectCompletion {
    pub name: String,
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
}

#[derive(Serialize)]
pub struct Statistics {
    pub projects: ProjectStats,
    pub tasks: TaskStats,
    pub schedules: ScheduleStats,
    pub project_completion: Vec<ProjectCompletion>,
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn project_stats(projects: &[Project]) -> ProjectStats {
    let count = |matcher: fn(&ProjectStatus) -> bool| {
        projects.iter().filter(|p| matcher(&p.status)).count()
    };

    ProjectStats {
        total: projects.len(),
        by_status: ProjectStatusCounts {
            upcoming: count(|s| *s == ProjectStatus::Upcoming),
            in_progress: count(|s| {
                matches!(s, ProjectStatus::InProgress | ProjectStatus::Ongoing)
            }),
            completed: count(|s| *s == ProjectStatus::Completed),
            on_hold: count(|s| *s == ProjectStatus::OnHold),
        },
    }
}

fn task_stats(tasks: &[Task]) -> TaskStats {
    let count =
        |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();

    let completed = count(TaskStatus::Completed);
    TaskStats {
        total: tasks.len(),
        by_status: TaskStatusCounts {
            upcoming: count(TaskStatus::Upcoming),
            in_progress: count(TaskStatus::InProgress),
            completed,
        },
        completion_rate: completed as f64 / tasks.len().max(1) as f64 * 100.0,
        with_attachments: tasks.iter().filter(|t| !t.attachments.is_empty()).count(),
    }
}

fn schedule_stats(schedules: &[Schedule], today: NaiveDate) -> ScheduleStats {
    // Malformed schedule dates are skipped, not errors.
    let mwt_dates: Vec<NaiveDate> = schedules
        .iter()
        .filter_map(|s| parse_date(&s.mwt_plan_date))
        .collect();
    let hse_dates: Vec<NaiveDate> = schedules
        .iter()
        .filter_map(|s| parse_date(&s.hse_meeting_date))
        .collect();

    ScheduleStats {
        total: schedules.len(),
        upcoming_mwt: mwt_dates.iter().filter(|d| **d >= today).count(),
        upcoming_hse: hse_dates.iter().filter(|d| **d >= today).count(),
        this_month: mwt_dates
            .iter()
            .filter(|d| d.month() == today.month() && d.year() == today.year())
            .count(),
    }
}

fn completion_breakdown(projects: &[Project], tasks: &[Task]) -> Vec<ProjectCompletion> {
    projects
        .iter()
        .take(COMPLETION_BREAKDOWN_LIMIT)
        .map(|project| {
            let project_tasks: Vec<&Task> =
                tasks.iter().filter(|t| t.project_id == project.id).collect();
            let completed = project_tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count();
            ProjectCompletion {
                name: project.name.chars().take(20).collect(),
                completed,
                total: project_tasks.len(),
                percentage: completed as f64 / project_tasks.len().max(1) as f64 * 100.0,
            }
        })
        .collect()
}

/// Get comprehensive statistics for the dashboard
pub async fn get_statistics(State(state): State<AppState>) -> impl IntoResponse {
    info!("Computing dashboard statistics");

    let projects = match state.store.list_projects().await {
        Ok(projects) => projects,
        Err(e) => {
            error!("Failed to list projects: {}", e);
            return ApiError::from(e).into_response();
        }
    };
    let tasks = match state.store.list_tasks(None).await {
        Ok(tasks) => tasks,
        Err(e) => {
            error!("Failed to list tasks: {}", e);
            return ApiError::from(e).into_response();
        }
    };
    let schedules = match state.store.list_schedules().await {
        Ok(schedules) => schedules,
        Err(e) => {
            error!("Failed to list schedules: {}", e);
            return ApiError::from(e).into_response();
        }
    };

    let today = Utc::now().date_naive();
    let statistics = Statistics {
        projects: project_stats(&projects),
        tasks: task_stats(&tasks),
        schedules: schedule_stats(&schedules, today),
        project_completion: completion_breakdown(&projects, &tasks),
    };

    (
        StatusCode::OK,
        ResponseJson(ApiResponse::success(statistics)),
    )
        .into_response()
}
