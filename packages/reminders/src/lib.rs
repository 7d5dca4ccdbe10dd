// ABOUTME: Rig-down completion reminder engine
// ABOUTME: Pure per-project evaluator plus a scanning orchestrator with fire-and-forget dispatch

pub mod evaluator;
pub mod orchestrator;

pub use evaluator::{
    evaluate, resolve_recipients, ReminderConfig, ReminderDecision, ReminderEvent, SkipReason,
};
pub use orchestrator::{
    ProjectReminderReport, ReminderOutcome, ReminderService, ScanError, ScanSummary,
};
