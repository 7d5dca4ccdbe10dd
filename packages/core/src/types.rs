use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ProjectStatus {
    Upcoming,
    Ongoing,
    InProgress,
    Completed,
    OnHold,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Ongoing
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Upcoming => write!(f, "Upcoming"),
            ProjectStatus::Ongoing => write!(f, "Ongoing"),
            ProjectStatus::InProgress => write!(f, "InProgress"),
            ProjectStatus::Completed => write!(f, "Completed"),
            ProjectStatus::OnHold => write!(f, "OnHold"),
        }
    }
}

/// Status of a checklist task
///
/// `InProgress` keeps the historical `"In Progress"` wire spelling so
/// existing record files stay readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TaskStatus {
    Upcoming,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Upcoming
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Upcoming => write!(f, "Upcoming"),
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// A file attached to a task
///
/// Content lives in external drive storage; the record only keeps the
/// filename and upload time. Attachments are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A well-service project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub well: Option<String>,
    pub kontrak_no: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Rig-down deadline, kept as a raw `YYYY-MM-DD` string. Unparsable
    /// values are tolerated in storage and skipped at reminder evaluation.
    pub rig_down: Option<String>,
    /// Person-in-charge address list; may hold several comma-separated
    /// addresses.
    pub pic_email: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

/// A checklist task belonging to a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub code: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

/// A field schedule entry (MWT plan and HSE committee meeting dates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub project_id: String,
    pub project_name: String,
    pub well_name: String,
    pub mwt_plan_date: String,
    pub hse_meeting_date: String,
    pub pic_name: String,
    pub assigned_to_email: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreateInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub well: Option<String>,
    pub kontrak_no: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub rig_down: Option<String>,
    pub pic_email: Option<String>,
    pub status: Option<ProjectStatus>,
}

/// Input for updating an existing project (field-merge semantics)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdateInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub well: Option<String>,
    pub kontrak_no: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub rig_down: Option<String>,
    pub pic_email: Option<String>,
    pub status: Option<ProjectStatus>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreateInput {
    pub title: String,
    pub project_id: String,
    pub code: Option<String>,
    pub category: Option<String>,
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub description: String,
}

/// Input for updating an existing task (field-merge semantics)
///
/// Attachments are deliberately absent here; they are appended through a
/// dedicated store operation and never rewritten wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdateInput {
    pub title: Option<String>,
    pub code: Option<String>,
    pub category: Option<String>,
    pub status: Option<TaskStatus>,
    pub description: Option<String>,
}

/// Input for creating a new schedule entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleCreateInput {
    pub project_id: String,
    pub project_name: String,
    pub well_name: String,
    pub mwt_plan_date: String,
    pub hse_meeting_date: String,
    pub pic_name: String,
    pub assigned_to_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn task_status_uses_historical_wire_spelling() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");

        let parsed: TaskStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(parsed, TaskStatus::InProgress);
    }

    #[test]
    fn project_status_round_trips() {
        for status in [
            ProjectStatus::Upcoming,
            ProjectStatus::Ongoing,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
            ProjectStatus::OnHold,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let parsed: ProjectStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn task_defaults_apply_on_deserialize() {
        let json = r#"{
            "id": "t1",
            "project_id": "p1",
            "title": "Pressure Test",
            "code": null,
            "category": null,
            "created_at": "2026-01-02T03:04:05Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::Upcoming);
        assert_eq!(task.description, "");
        assert!(task.attachments.is_empty());
    }
}
