//! Card and select-option view models.

use crate::model::due_date::format_display_date;
use crate::model::task::TaskStatus;
use crate::repo::project_repo::ProjectRecord;
use crate::repo::task_repo::TaskRecord;
use crate::view::pipeline::ALL_PROJECTS;
use serde::Serialize;

/// Badge styling for a task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Default,
    Warning,
    Success,
}

impl BadgeVariant {
    pub fn for_status(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Completed => Self::Success,
            TaskStatus::InProgress => Self::Warning,
            TaskStatus::NotStarted => Self::Default,
        }
    }
}

/// One card on the projects tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCard {
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub task_count: u32,
    pub completed_count: u32,
    /// Completed share in `0.0..=1.0`.
    pub progress: f64,
    /// e.g. `1/15/2023`.
    pub created_label: String,
}

impl From<&ProjectRecord> for ProjectCard {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            project_id: record.project_id.to_string(),
            name: record.name.clone(),
            description: record.description.clone(),
            task_count: record.task_count,
            completed_count: record.completed_count,
            progress: record.progress(),
            created_label: format_display_date(record.created_at),
        }
    }
}

/// One card on the tasks tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCard {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub project_name: String,
    pub status_label: String,
    pub badge: BadgeVariant,
    /// e.g. `4/30/2023`.
    pub due_label: String,
}

impl From<&TaskRecord> for TaskCard {
    fn from(record: &TaskRecord) -> Self {
        Self {
            task_id: record.task_id.to_string(),
            title: record.title.clone(),
            description: record.description.clone(),
            project_name: record.project_name.clone(),
            status_label: record.status.label().to_string(),
            badge: BadgeVariant::for_status(record.status),
            due_label: format_display_date(record.due_date),
        }
    }
}

/// `(value, label)` pair for a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options for the project select in task dialogs.
pub fn project_options(projects: &[ProjectRecord]) -> Vec<SelectOption> {
    projects
        .iter()
        .map(|project| SelectOption::new(project.project_id.to_string(), project.name.as_str()))
        .collect()
}

/// Options for the task-list project filter; `All Projects` comes first.
pub fn filter_options(projects: &[ProjectRecord]) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new(ALL_PROJECTS, "All Projects")];
    options.extend(project_options(projects));
    options
}

/// Options for the status select.
pub fn status_options() -> Vec<SelectOption> {
    TaskStatus::ALL
        .into_iter()
        .map(|status| SelectOption::new(status.as_str(), status.label()))
        .collect()
}
