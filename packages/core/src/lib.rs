// ABOUTME: Core types, constants, and validation for CSMS
// ABOUTME: Foundational package shared across all CSMS packages

pub mod checklist;
pub mod constants;
pub mod types;
pub mod validation;

// Re-export main types
pub use types::{
    Attachment, Project, ProjectCreateInput, ProjectStatus, ProjectUpdateInput, Schedule,
    ScheduleCreateInput, Task, TaskCreateInput, TaskStatus, TaskUpdateInput,
};

// Re-export constants
pub use constants::{csms_dir, default_data_dir};

// Re-export checklist
pub use checklist::{StandardTask, STANDARD_TASKS};

// Re-export validation
pub use validation::{
    validate_project_data, validate_project_update, validate_schedule_data, validate_task_data,
    ValidationError,
};
