use chrono::NaiveDate;
use csms_core::{Project, Task, TaskStatus};
use serde::Serialize;

/// Default days-before-deadline eligibility window.
const DEFAULT_WINDOW_DAYS: i64 = 2;

/// Default required completion percentage. The historical code paths used
/// both 95 and 80; the value is configuration, never hardcoded at a call
/// site.
const DEFAULT_COMPLETION_THRESHOLD: f64 = 95.0;

/// Default recipient when a project carries no usable PIC address.
const DEFAULT_RECIPIENT: &str = "operations@csms.local";

/// Named thresholds governing when a reminder fires
#[derive(Debug, Clone)]
pub struct ReminderConfig {
    /// A reminder is considered only when `0 <= days_until <= window_days`.
    pub window_days: i64,
    /// A reminder fires only when completion is strictly below this
    /// percentage.
    pub completion_threshold: f64,
    /// Fallback address when a project resolves to no recipients.
    pub default_recipient: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            completion_threshold: DEFAULT_COMPLETION_THRESHOLD,
            default_recipient: DEFAULT_RECIPIENT.to_string(),
        }
    }
}

impl ReminderConfig {
    /// Load configuration from environment variables
    ///
    /// | Variable                    | Default                   |
    /// |-----------------------------|---------------------------|
    /// | `CSMS_REMINDER_WINDOW_DAYS` | `2`                       |
    /// | `CSMS_COMPLETION_THRESHOLD` | `95`                      |
    /// | `CSMS_DEFAULT_RECIPIENT`    | `operations@csms.local`   |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            window_days: std::env::var("CSMS_REMINDER_WINDOW_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.window_days),
            completion_threshold: std::env::var("CSMS_COMPLETION_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.completion_threshold),
            default_recipient: std::env::var("CSMS_DEFAULT_RECIPIENT")
                .unwrap_or(defaults.default_recipient),
        }
    }
}

/// Why a project was not eligible for a reminder
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// No rig-down date on record.
    MissingDeadline,
    /// The rig-down date is not a parseable calendar date.
    InvalidDeadline { value: String },
    /// Outside the eligibility window; past-deadline projects land here too.
    OutsideWindow { days_until: i64 },
    /// No tasks, so no completion denominator.
    NoTasks,
    /// Completion already meets the configured threshold.
    CompletionMet { completion_percentage: f64 },
}

/// Payload of a firing reminder decision; derived on demand, never stored
#[derive(Debug, Clone)]
pub struct ReminderEvent {
    pub project: Project,
    pub rig_down: NaiveDate,
    pub days_until: i64,
    pub completion_percentage: f64,
    /// Tasks with status other than Completed, in store order.
    pub incomplete_tasks: Vec<Task>,
    pub recipients: Vec<String>,
}

/// Outcome of evaluating one project
#[derive(Debug, Clone)]
pub enum ReminderDecision {
    Fire(ReminderEvent),
    Skip(SkipReason),
}

/// Split a PIC address field into individual recipients
///
/// Splits on commas, trims, and drops empty entries; an empty result falls
/// back to the configured default address.
pub fn resolve_recipients(pic_email: Option<&str>, default_recipient: &str) -> Vec<String> {
    let recipients: Vec<String> = pic_email
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if recipients.is_empty() {
        vec![default_recipient.to_string()]
    } else {
        recipients
    }
}

/// Decide whether a deadline-approaching reminder must fire for one project
///
/// Pure function of its inputs: no store, no clock, no side effects.
pub fn evaluate(
    project: &Project,
    tasks: &[Task],
    today: NaiveDate,
    config: &ReminderConfig,
) -> ReminderDecision {
    let raw_deadline = match project.rig_down.as_deref() {
        Some(value) if !value.trim().is_empty() => value,
        _ => return ReminderDecision::Skip(SkipReason::MissingDeadline),
    };

    let rig_down = match NaiveDate::parse_from_str(raw_deadline, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            return ReminderDecision::Skip(SkipReason::InvalidDeadline {
                value: raw_deadline.to_string(),
            })
        }
    };

    let days_until = (rig_down - today).num_days();
    if days_until < 0 || days_until > config.window_days {
        return ReminderDecision::Skip(SkipReason::OutsideWindow { days_until });
    }

    if tasks.is_empty() {
        return ReminderDecision::Skip(SkipReason::NoTasks);
    }

    let completed = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    let completion_percentage = completed as f64 * 100.0 / tasks.len() as f64;

    if completion_percentage >= config.completion_threshold {
        return ReminderDecision::Skip(SkipReason::CompletionMet {
            completion_percentage,
        });
    }

    let incomplete_tasks: Vec<Task> = tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Completed)
        .cloned()
        .collect();

    ReminderDecision::Fire(ReminderEvent {
        recipients: resolve_recipients(project.pic_email.as_deref(), &config.default_recipient),
        project: project.clone(),
        rig_down,
        days_until,
        completion_percentage,
        incomplete_tasks,
    })
}
