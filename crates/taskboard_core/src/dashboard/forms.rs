//! Dialog form drafts.
//!
//! Drafts hold whatever the user has typed so far. They are validated only on
//! submit, by the services.

use crate::model::due_date::{format_date_input, parse_date_input, today_epoch_ms};
use crate::model::project::ProjectId;
use crate::model::task::{TaskId, TaskStatus};
use crate::repo::project_repo::ProjectRecord;
use crate::repo::task_repo::TaskRecord;
use crate::service::task_service::NewTaskRequest;
use log::debug;

/// Draft for the add/edit project dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
}

/// Draft for the add/edit task dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub project_id: Option<ProjectId>,
    pub status: TaskStatus,
    /// Epoch ms due date.
    pub due_date: i64,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            project_id: None,
            status: TaskStatus::NotStarted,
            due_date: today_epoch_ms(),
        }
    }
}

impl TaskForm {
    /// Due date as `YYYY-MM-DD` for a date input.
    pub fn due_date_input(&self) -> String {
        format_date_input(self.due_date)
    }

    /// Applies a date-input change. Unparseable input keeps the old value.
    pub fn set_due_date_input(&mut self, value: &str) -> bool {
        match parse_date_input(value) {
            Ok(due_date) => {
                self.due_date = due_date;
                true
            }
            Err(err) => {
                debug!("event=form_input module=dashboard status=ignored field=due_date error={err}");
                false
            }
        }
    }

    pub(crate) fn to_request(&self) -> NewTaskRequest {
        NewTaskRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            project_id: self.project_id,
            status: self.status,
            due_date: self.due_date,
        }
    }
}

/// Open edit-project dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEdit {
    pub project_id: ProjectId,
    pub form: ProjectForm,
}

impl From<&ProjectRecord> for ProjectEdit {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            project_id: record.project_id,
            form: ProjectForm {
                name: record.name.clone(),
                description: record.description.clone(),
            },
        }
    }
}

/// Open edit-task dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub task_id: TaskId,
    pub form: TaskForm,
}

impl From<&TaskRecord> for TaskEdit {
    fn from(record: &TaskRecord) -> Self {
        Self {
            task_id: record.task_id,
            form: TaskForm {
                title: record.title.clone(),
                description: record.description.clone(),
                project_id: Some(record.project_id),
                status: record.status,
                due_date: record.due_date,
            },
        }
    }
}
