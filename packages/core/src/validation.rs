use chrono::NaiveDate;

use crate::types::{
    ProjectCreateInput, ProjectUpdateInput, ScheduleCreateInput, TaskCreateInput,
};

/// Validation errors for record inputs
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn is_calendar_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn looks_like_address(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.contains('@') && !trimmed.starts_with('@') && !trimmed.ends_with('@')
}

/// Validates project data for creation
pub fn validate_project_data(data: &ProjectCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if data.name.trim().is_empty() {
        errors.push(ValidationError::new("name", "Project name is required"));
    }

    errors
}

/// Validates project update data
pub fn validate_project_update(data: &ProjectUpdateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(ref name) = data.name {
        if name.trim().is_empty() {
            errors.push(ValidationError::new("name", "Project name cannot be empty"));
        }
    }

    errors
}

/// Validates task data for creation
pub fn validate_task_data(data: &TaskCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if data.title.trim().is_empty() {
        errors.push(ValidationError::new("title", "Task title is required"));
    }

    if data.project_id.trim().is_empty() {
        errors.push(ValidationError::new("project_id", "Project id is required"));
    }

    errors
}

/// Validates schedule data for creation
///
/// Schedule dates are hard requirements; unlike the project rig-down date
/// they are never tolerated in an unparsable form.
pub fn validate_schedule_data(data: &ScheduleCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if data.project_name.trim().is_empty() {
        errors.push(ValidationError::new(
            "project_name",
            "Project name is required",
        ));
    }

    if !is_calendar_date(&data.mwt_plan_date) {
        errors.push(ValidationError::new(
            "mwt_plan_date",
            "MWT plan date must be a YYYY-MM-DD calendar date",
        ));
    }

    if !is_calendar_date(&data.hse_meeting_date) {
        errors.push(ValidationError::new(
            "hse_meeting_date",
            "HSE meeting date must be a YYYY-MM-DD calendar date",
        ));
    }

    if !looks_like_address(&data.assigned_to_email) {
        errors.push(ValidationError::new(
            "assigned_to_email",
            "Recipient must be an email address",
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule_input() -> ScheduleCreateInput {
        ScheduleCreateInput {
            project_id: "p1".to_string(),
            project_name: "Well Service Alpha".to_string(),
            well_name: "ALPHA-01".to_string(),
            mwt_plan_date: "2026-08-10".to_string(),
            hse_meeting_date: "2026-08-12".to_string(),
            pic_name: "Rina".to_string(),
            assigned_to_email: "rina@example.com".to_string(),
        }
    }

    #[test]
    fn valid_schedule_passes() {
        assert!(validate_schedule_data(&schedule_input()).is_empty());
    }

    #[test]
    fn schedule_rejects_bad_date() {
        let mut input = schedule_input();
        input.mwt_plan_date = "10/08/2026".to_string();
        let errors = validate_schedule_data(&input);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "mwt_plan_date");
    }

    #[test]
    fn schedule_rejects_bad_recipient() {
        let mut input = schedule_input();
        input.assigned_to_email = "not-an-address".to_string();
        let errors = validate_schedule_data(&input);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "assigned_to_email");
    }

    #[test]
    fn project_requires_name() {
        let input = ProjectCreateInput {
            name: "  ".to_string(),
            description: String::new(),
            well: None,
            kontrak_no: None,
            start_date: None,
            end_date: None,
            rig_down: None,
            pic_email: None,
            status: None,
        };
        let errors = validate_project_data(&input);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn project_accepts_unparsable_rig_down() {
        // Bad deadline strings are a reminder-evaluation concern, not a
        // creation error.
        let input = ProjectCreateInput {
            name: "Well Service Alpha".to_string(),
            description: String::new(),
            well: None,
            kontrak_no: None,
            start_date: None,
            end_date: None,
            rig_down: Some("soon".to_string()),
            pic_email: None,
            status: None,
        };
        assert!(validate_project_data(&input).is_empty());
    }
}
