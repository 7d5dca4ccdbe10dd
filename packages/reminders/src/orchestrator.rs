use std::sync::Arc;

use chrono::NaiveDate;
use csms_core::Task;
use csms_notify::{templates, Mailer};
use csms_storage::{RecordStore, StorageError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::evaluator::{evaluate, ReminderConfig, ReminderDecision, ReminderEvent, SkipReason};

/// Scan errors
#[derive(Error, Debug)]
pub enum ScanError {
    /// Systemic: no project can succeed without sender credentials.
    #[error("Reminder mailer not configured")]
    NotConfigured,
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Per-project scan outcome
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReminderOutcome {
    Fired {
        days_until: i64,
        completion_percentage: f64,
        recipients: Vec<String>,
    },
    Skipped {
        reason: SkipReason,
    },
}

/// One entry per project evaluated, in store order
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReminderReport {
    pub project_id: String,
    pub project_name: String,
    pub rig_down: Option<String>,
    #[serde(flatten)]
    pub outcome: ReminderOutcome,
}

/// Result of one reminder scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub reminders_sent: usize,
    pub details: Vec<ProjectReminderReport>,
}

/// Scans all projects and dispatches due reminders
///
/// Dispatch is fire-and-forget: the scan returns before any delivery
/// completes, and a failed delivery is logged, not retried. Re-running a
/// scan may re-notify the same project; no dedup state is kept.
pub struct ReminderService {
    store: Arc<RecordStore>,
    mailer: Arc<dyn Mailer>,
    config: ReminderConfig,
}

impl ReminderService {
    pub fn new(store: Arc<RecordStore>, mailer: Arc<dyn Mailer>, config: ReminderConfig) -> Self {
        Self {
            store,
            mailer,
            config,
        }
    }

    pub fn config(&self) -> &ReminderConfig {
        &self.config
    }

    /// Evaluate every project against `today` and dispatch due reminders
    pub async fn scan(&self, today: NaiveDate) -> Result<ScanSummary, ScanError> {
        if !self.mailer.is_configured() {
            return Err(ScanError::NotConfigured);
        }

        let projects = self.store.list_projects().await?;
        let all_tasks = self.store.list_tasks(None).await?;

        let mut details = Vec::with_capacity(projects.len());
        let mut reminders_sent = 0;

        for project in projects {
            let tasks: Vec<Task> = all_tasks
                .iter()
                .filter(|t| t.project_id == project.id)
                .cloned()
                .collect();

            // One project's bad data must not stop the rest of the scan;
            // every data problem is a skip entry, never an abort.
            match evaluate(&project, &tasks, today, &self.config) {
                ReminderDecision::Fire(event) => {
                    info!(
                        "Rig-down reminder due for '{}': {:.1}% complete, {} day(s) left",
                        project.name, event.completion_percentage, event.days_until
                    );
                    details.push(ProjectReminderReport {
                        project_id: project.id.clone(),
                        project_name: project.name.clone(),
                        rig_down: project.rig_down.clone(),
                        outcome: ReminderOutcome::Fired {
                            days_until: event.days_until,
                            completion_percentage: event.completion_percentage,
                            recipients: event.recipients.clone(),
                        },
                    });
                    reminders_sent += 1;
                    self.dispatch(event);
                }
                ReminderDecision::Skip(reason) => {
                    if let SkipReason::InvalidDeadline { value } = &reason {
                        warn!(
                            "Skipping project '{}': unparsable rig-down date '{}'",
                            project.name, value
                        );
                    }
                    details.push(ProjectReminderReport {
                        project_id: project.id.clone(),
                        project_name: project.name.clone(),
                        rig_down: project.rig_down.clone(),
                        outcome: ReminderOutcome::Skipped { reason },
                    });
                }
            }
        }

        info!(
            "Reminder scan complete: {} of {} project(s) fired",
            reminders_sent,
            details.len()
        );

        Ok(ScanSummary {
            reminders_sent,
            details,
        })
    }

    /// Schedule one reminder send without waiting for delivery
    fn dispatch(&self, event: ReminderEvent) {
        let mailer = Arc::clone(&self.mailer);
        let subject = templates::rig_down_subject(&event.project.name);
        let body = templates::rig_down_reminder(
            &event.project,
            event.completion_percentage,
            &event.incomplete_tasks,
            self.config.completion_threshold,
        );
        let project_name = event.project.name.clone();
        let recipients = event.recipients;

        tokio::spawn(async move {
            match mailer.send(&recipients, &subject, &body).await {
                Ok(()) => info!("Reminder sent for '{}'", project_name),
                Err(e) => error!("Reminder delivery failed for '{}': {}", project_name, e),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use csms_core::{ProjectCreateInput, TaskCreateInput, TaskStatus};
    use csms_notify::{NotifyError, NotifyResult};
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    struct RecordingMailer {
        configured: bool,
        sent: mpsc::UnboundedSender<(Vec<String>, String)>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn send(
            &self,
            recipients: &[String],
            subject: &str,
            _html_body: &str,
        ) -> NotifyResult<()> {
            self.sent
                .send((recipients.to_vec(), subject.to_string()))
                .map_err(|e| NotifyError::Network(e.to_string()))?;
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    fn test_config() -> ReminderConfig {
        ReminderConfig {
            window_days: 2,
            completion_threshold: 95.0,
            default_recipient: "operations@csms.local".to_string(),
        }
    }

    async fn seed_project(
        store: &RecordStore,
        name: &str,
        rig_down: &str,
        pic_email: Option<&str>,
    ) -> String {
        let project = store
            .create_project(ProjectCreateInput {
                name: name.to_string(),
                description: String::new(),
                well: None,
                kontrak_no: None,
                start_date: None,
                end_date: None,
                rig_down: Some(rig_down.to_string()),
                pic_email: pic_email.map(str::to_string),
                status: None,
            })
            .await
            .unwrap();

        // Two tasks, one completed: 50% puts the project below threshold.
        for (title, status) in [
            ("Pressure Test", TaskStatus::Completed),
            ("Final Job Report", TaskStatus::Upcoming),
        ] {
            store
                .create_task(TaskCreateInput {
                    title: title.to_string(),
                    project_id: project.id.clone(),
                    code: None,
                    category: None,
                    status: Some(status),
                    description: String::new(),
                })
                .await
                .unwrap();
        }

        project.id
    }

    fn service(
        store: Arc<RecordStore>,
        configured: bool,
    ) -> (
        ReminderService,
        mpsc::UnboundedReceiver<(Vec<String>, String)>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mailer = Arc::new(RecordingMailer {
            configured,
            sent: tx,
        });
        (ReminderService::new(store, mailer, test_config()), rx)
    }

    #[tokio::test]
    async fn unconfigured_mailer_short_circuits_the_scan() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RecordStore::new(dir.path()));
        seed_project(&store, "Alpha", "2026-08-07", Some("pic@example.com")).await;

        let (service, _rx) = service(store, false);
        let result = service.scan(today()).await;
        assert!(matches!(result, Err(ScanError::NotConfigured)));
    }

    #[tokio::test]
    async fn bad_project_data_does_not_stop_the_scan() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RecordStore::new(dir.path()));

        seed_project(&store, "First", "2026-08-07", Some("a@example.com")).await;
        seed_project(&store, "Second", "sometime soon", Some("b@example.com")).await;
        seed_project(&store, "Third", "2026-08-08", Some("c@example.com")).await;

        let (service, mut rx) = service(store, true);
        let summary = service.scan(today()).await.unwrap();

        assert_eq!(summary.reminders_sent, 2);
        assert_eq!(summary.details.len(), 3);
        assert!(matches!(summary.details[0].outcome, ReminderOutcome::Fired { .. }));
        assert!(matches!(
            summary.details[1].outcome,
            ReminderOutcome::Skipped {
                reason: SkipReason::InvalidDeadline { .. }
            }
        ));
        assert!(matches!(summary.details[2].outcome, ReminderOutcome::Fired { .. }));

        // Both dispatches reach the sender.
        for _ in 0..2 {
            timeout(Duration::from_secs(1), rx.recv())
                .await
                .expect("dispatch timed out")
                .expect("sender dropped");
        }
    }

    #[tokio::test]
    async fn rescanning_refires_without_dedup() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RecordStore::new(dir.path()));
        seed_project(&store, "Alpha", "2026-08-07", Some("pic@example.com")).await;

        let (service, mut rx) = service(store, true);

        // No state changes between scans: both invocations notify again.
        let first = service.scan(today()).await.unwrap();
        let second = service.scan(today()).await.unwrap();
        assert_eq!(first.reminders_sent, 1);
        assert_eq!(second.reminders_sent, 1);

        let mut delivered = 0;
        while let Ok(Some(_)) = timeout(Duration::from_secs(1), rx.recv()).await {
            delivered += 1;
            if delivered == 2 {
                break;
            }
        }
        assert_eq!(delivered, 2);
    }

    #[tokio::test]
    async fn missing_pic_falls_back_to_default_recipient() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RecordStore::new(dir.path()));
        seed_project(&store, "Alpha", "2026-08-07", None).await;

        let (service, mut rx) = service(store, true);
        let summary = service.scan(today()).await.unwrap();
        assert_eq!(summary.reminders_sent, 1);

        let (recipients, subject) = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("dispatch timed out")
            .expect("sender dropped");
        assert_eq!(recipients, vec!["operations@csms.local".to_string()]);
        assert!(subject.contains("Alpha"));
    }
}
