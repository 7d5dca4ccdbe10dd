// ABOUTME: HTTP API layer for CSMS providing REST endpoints and routing
// ABOUTME: Integration layer that depends on all domain packages

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use csms_drive::DriveClient;
use csms_notify::Mailer;
use csms_reminders::{ReminderConfig, ReminderService};
use csms_storage::RecordStore;

pub mod health;
pub mod projects_handlers;
pub mod reminders_handlers;
pub mod response;
pub mod schedules_handlers;
pub mod statistics_handlers;
pub mod tasks_handlers;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub mailer: Arc<dyn Mailer>,
    pub drive: Arc<DriveClient>,
    pub reminders: Arc<ReminderService>,
}

impl AppState {
    pub fn new(
        store: Arc<RecordStore>,
        mailer: Arc<dyn Mailer>,
        drive: Arc<DriveClient>,
        reminder_config: ReminderConfig,
    ) -> Self {
        let reminders = Arc::new(ReminderService::new(
            store.clone(),
            mailer.clone(),
            reminder_config,
        ));
        Self {
            store,
            mailer,
            drive,
            reminders,
        }
    }
}

/// Creates the CSMS API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_check))
        .route("/projects", get(projects_handlers::list_projects))
        .route("/projects", post(projects_handlers::create_project))
        .route("/projects/{id}", get(projects_handlers::get_project))
        .route("/projects/{id}", put(projects_handlers::update_project))
        .route("/tasks", get(tasks_handlers::list_tasks))
        .route("/tasks", post(tasks_handlers::create_task))
        .route("/tasks/{id}", put(tasks_handlers::update_task))
        .route("/tasks/{id}/upload", post(tasks_handlers::upload_attachment))
        .route("/schedules", get(schedules_handlers::list_schedules))
        .route("/schedules", post(schedules_handlers::create_schedule))
        .route("/check-reminders", get(reminders_handlers::check_reminders))
        .route("/statistics", get(statistics_handlers::get_statistics))
        .with_state(state)
}
