use std::path::PathBuf;

use chrono::Utc;
use csms_core::{
    Attachment, Project, ProjectCreateInput, ProjectUpdateInput, Schedule, ScheduleCreateInput,
    Task, TaskCreateInput, TaskUpdateInput,
};
use tracing::{debug, info};

use crate::{files, generate_record_id, StorageError, StorageResult};

/// Record store over one JSON file per collection
///
/// Collections are JSON arrays in insertion order; every lookup is a linear
/// scan and every mutation rewrites the owning file in full.
pub struct RecordStore {
    data_dir: PathBuf,
}

impl RecordStore {
    /// Create a store rooted at an explicit data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn projects_file(&self) -> PathBuf {
        self.data_dir.join("projects.json")
    }

    fn tasks_file(&self) -> PathBuf {
        self.data_dir.join("tasks.json")
    }

    fn schedules_file(&self) -> PathBuf {
        self.data_dir.join("schedules.json")
    }

    // Projects

    /// Gets all projects in insertion order
    pub async fn list_projects(&self) -> StorageResult<Vec<Project>> {
        files::read_collection(&self.projects_file()).await
    }

    /// Gets a project by ID
    pub async fn get_project(&self, id: &str) -> StorageResult<Option<Project>> {
        let projects = self.list_projects().await?;
        Ok(projects.into_iter().find(|p| p.id == id))
    }

    /// Creates a new project
    pub async fn create_project(&self, input: ProjectCreateInput) -> StorageResult<Project> {
        let mut projects = self.list_projects().await?;

        let project = Project {
            id: generate_record_id(),
            name: input.name,
            description: input.description,
            well: input.well,
            kontrak_no: input.kontrak_no,
            start_date: input.start_date,
            end_date: input.end_date,
            rig_down: input.rig_down,
            pic_email: input.pic_email,
            status: input.status.unwrap_or_default(),
            created_at: Utc::now(),
        };

        projects.push(project.clone());
        files::write_collection(&self.projects_file(), &projects).await?;

        info!("Created project '{}' with ID {}", project.name, project.id);
        Ok(project)
    }

    /// Updates an existing project by field merge
    pub async fn update_project(
        &self,
        id: &str,
        updates: ProjectUpdateInput,
    ) -> StorageResult<Project> {
        let mut projects = self.list_projects().await?;

        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StorageError::NotFound)?;

        if let Some(name) = updates.name {
            project.name = name;
        }
        if let Some(description) = updates.description {
            project.description = description;
        }
        if let Some(well) = updates.well {
            project.well = Some(well);
        }
        if let Some(kontrak_no) = updates.kontrak_no {
            project.kontrak_no = Some(kontrak_no);
        }
        if let Some(start_date) = updates.start_date {
            project.start_date = Some(start_date);
        }
        if let Some(end_date) = updates.end_date {
            project.end_date = Some(end_date);
        }
        if let Some(rig_down) = updates.rig_down {
            project.rig_down = Some(rig_down);
        }
        if let Some(pic_email) = updates.pic_email {
            project.pic_email = Some(pic_email);
        }
        if let Some(status) = updates.status {
            project.status = status;
        }

        let updated = project.clone();
        files::write_collection(&self.projects_file(), &projects).await?;

        info!("Updated project '{}' (ID: {})", updated.name, updated.id);
        Ok(updated)
    }

    // Tasks

    /// Gets tasks, optionally filtered to one project, in insertion order
    pub async fn list_tasks(&self, project_id: Option<&str>) -> StorageResult<Vec<Task>> {
        let tasks: Vec<Task> = files::read_collection(&self.tasks_file()).await?;
        match project_id {
            Some(project_id) => Ok(tasks
                .into_iter()
                .filter(|t| t.project_id == project_id)
                .collect()),
            None => Ok(tasks),
        }
    }

    /// Gets a task by ID
    pub async fn get_task(&self, id: &str) -> StorageResult<Option<Task>> {
        let tasks = self.list_tasks(None).await?;
        Ok(tasks.into_iter().find(|t| t.id == id))
    }

    /// Creates a new task
    ///
    /// The referenced project must exist at creation time; the reference is
    /// not re-validated afterwards.
    pub async fn create_task(&self, input: TaskCreateInput) -> StorageResult<Task> {
        if self.get_project(&input.project_id).await?.is_none() {
            debug!("Rejecting task for unknown project {}", input.project_id);
            return Err(StorageError::NotFound);
        }

        let mut tasks = self.list_tasks(None).await?;

        let task = Task {
            id: generate_record_id(),
            project_id: input.project_id,
            title: input.title,
            code: input.code,
            category: input.category,
            status: input.status.unwrap_or_default(),
            description: input.description,
            attachments: Vec::new(),
            created_at: Utc::now(),
        };

        tasks.push(task.clone());
        files::write_collection(&self.tasks_file(), &tasks).await?;

        info!("Created task '{}' with ID {}", task.title, task.id);
        Ok(task)
    }

    /// Updates an existing task by field merge
    pub async fn update_task(&self, id: &str, updates: TaskUpdateInput) -> StorageResult<Task> {
        let mut tasks = self.list_tasks(None).await?;

        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StorageError::NotFound)?;

        if let Some(title) = updates.title {
            task.title = title;
        }
        if let Some(code) = updates.code {
            task.code = Some(code);
        }
        if let Some(category) = updates.category {
            task.category = Some(category);
        }
        if let Some(status) = updates.status {
            task.status = status;
        }
        if let Some(description) = updates.description {
            task.description = description;
        }

        let updated = task.clone();
        files::write_collection(&self.tasks_file(), &tasks).await?;

        info!("Updated task '{}' (ID: {})", updated.title, updated.id);
        Ok(updated)
    }

    /// Appends an attachment record to a task
    pub async fn append_attachment(
        &self,
        task_id: &str,
        attachment: Attachment,
    ) -> StorageResult<Task> {
        let mut tasks = self.list_tasks(None).await?;

        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(StorageError::NotFound)?;

        task.attachments.push(attachment);
        let updated = task.clone();
        files::write_collection(&self.tasks_file(), &tasks).await?;

        info!(
            "Attached '{}' to task {} ({} attachments)",
            updated
                .attachments
                .last()
                .map(|a| a.filename.as_str())
                .unwrap_or(""),
            updated.id,
            updated.attachments.len()
        );
        Ok(updated)
    }

    // Schedules

    /// Gets all schedules in insertion order
    pub async fn list_schedules(&self) -> StorageResult<Vec<Schedule>> {
        files::read_collection(&self.schedules_file()).await
    }

    /// Creates a new schedule entry
    pub async fn create_schedule(&self, input: ScheduleCreateInput) -> StorageResult<Schedule> {
        let mut schedules = self.list_schedules().await?;

        let schedule = Schedule {
            id: generate_record_id(),
            project_id: input.project_id,
            project_name: input.project_name,
            well_name: input.well_name,
            mwt_plan_date: input.mwt_plan_date,
            hse_meeting_date: input.hse_meeting_date,
            pic_name: input.pic_name,
            assigned_to_email: input.assigned_to_email,
            created_at: Utc::now(),
        };

        schedules.push(schedule.clone());
        files::write_collection(&self.schedules_file(), &schedules).await?;

        info!(
            "Created schedule for project '{}' with ID {}",
            schedule.project_name, schedule.id
        );
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csms_core::TaskStatus;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn project_input(name: &str) -> ProjectCreateInput {
        ProjectCreateInput {
            name: name.to_string(),
            description: "Slickline campaign".to_string(),
            well: Some("ALPHA-01".to_string()),
            kontrak_no: None,
            start_date: None,
            end_date: None,
            rig_down: Some("2026-08-20".to_string()),
            pic_email: Some("pic@example.com".to_string()),
            status: None,
        }
    }

    fn task_input(project_id: &str, title: &str) -> TaskCreateInput {
        TaskCreateInput {
            title: title.to_string(),
            project_id: project_id.to_string(),
            code: Some("CS-07".to_string()),
            category: Some("Execution".to_string()),
            status: None,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn create_and_get_project() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());

        let project = store.create_project(project_input("Alpha")).await.unwrap();
        assert_eq!(project.name, "Alpha");
        assert_eq!(project.status, csms_core::ProjectStatus::Ongoing);

        let retrieved = store.get_project(&project.id).await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().name, "Alpha");

        assert!(store.get_project("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn projects_keep_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());

        for name in ["First", "Second", "Third"] {
            store.create_project(project_input(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .list_projects()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn update_project_merges_fields() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());

        let project = store.create_project(project_input("Alpha")).await.unwrap();

        let updated = store
            .update_project(
                &project.id,
                ProjectUpdateInput {
                    rig_down: Some("2026-09-01".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Untouched fields survive the merge
        assert_eq!(updated.name, "Alpha");
        assert_eq!(updated.pic_email.as_deref(), Some("pic@example.com"));
        assert_eq!(updated.rig_down.as_deref(), Some("2026-09-01"));

        let result = store
            .update_project("missing", ProjectUpdateInput::default())
            .await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn task_requires_existing_project() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());

        let result = store.create_task(task_input("missing", "Pressure Test")).await;
        assert!(matches!(result, Err(StorageError::NotFound)));

        let project = store.create_project(project_input("Alpha")).await.unwrap();
        let task = store
            .create_task(task_input(&project.id, "Pressure Test"))
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Upcoming);
    }

    #[tokio::test]
    async fn list_tasks_filters_by_project() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());

        let a = store.create_project(project_input("Alpha")).await.unwrap();
        let b = store.create_project(project_input("Bravo")).await.unwrap();

        store.create_task(task_input(&a.id, "One")).await.unwrap();
        store.create_task(task_input(&b.id, "Two")).await.unwrap();
        store.create_task(task_input(&a.id, "Three")).await.unwrap();

        let for_a = store.list_tasks(Some(&a.id)).await.unwrap();
        assert_eq!(for_a.len(), 2);
        assert!(for_a.iter().all(|t| t.project_id == a.id));

        let all = store.list_tasks(None).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn attachments_append_only() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());

        let project = store.create_project(project_input("Alpha")).await.unwrap();
        let task = store
            .create_task(task_input(&project.id, "Pressure Test"))
            .await
            .unwrap();

        let first = Attachment {
            filename: "chart.png".to_string(),
            uploaded_at: Utc::now(),
        };
        let second = Attachment {
            filename: "report.pdf".to_string(),
            uploaded_at: Utc::now(),
        };

        store.append_attachment(&task.id, first).await.unwrap();
        let updated = store.append_attachment(&task.id, second).await.unwrap();

        let filenames: Vec<&str> = updated
            .attachments
            .iter()
            .map(|a| a.filename.as_str())
            .collect();
        assert_eq!(filenames, vec!["chart.png", "report.pdf"]);

        // A later field-merge update does not disturb the attachment list
        let after_update = store
            .update_task(
                &task.id,
                TaskUpdateInput {
                    status: Some(TaskStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(after_update.attachments.len(), 2);
    }

    #[tokio::test]
    async fn schedules_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());

        let schedule = store
            .create_schedule(ScheduleCreateInput {
                project_id: "p1".to_string(),
                project_name: "Alpha".to_string(),
                well_name: "ALPHA-01".to_string(),
                mwt_plan_date: "2026-08-10".to_string(),
                hse_meeting_date: "2026-08-12".to_string(),
                pic_name: "Rina".to_string(),
                assigned_to_email: "rina@example.com".to_string(),
            })
            .await
            .unwrap();

        let schedules = store.list_schedules().await.unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].id, schedule.id);
    }
}
