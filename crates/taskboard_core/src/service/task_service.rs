//! Task use-case service.
//!
//! # Invariants
//! - New tasks need a non-blank title and a selected, existing project.
//! - Edits replace every editable field and keep the task id.

use crate::model::project::ProjectId;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::repo::task_repo::{TaskListQuery, TaskRecord, TaskRepository};
use crate::repo::{RepoError, RepoResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from task service operations.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Title is blank after trim.
    BlankTitle,
    /// No project was selected.
    ProjectRequired,
    /// Selected project does not exist.
    ProjectNotFound(ProjectId),
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Repository-level failure.
    Repo(RepoError),
    /// Write succeeded but read-back did not find the row.
    InconsistentState(&'static str),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::ProjectRequired => write!(f, "task requires a project"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent task state: {details}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ProjectNotFound(id) => Self::ProjectNotFound(id),
            RepoError::TaskNotFound(id) => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for the new-task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskRequest {
    pub title: String,
    pub description: String,
    pub project_id: Option<ProjectId>,
    pub status: TaskStatus,
    /// Epoch ms due date.
    pub due_date: i64,
}

/// Task service facade over repository implementations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Appends a new task to its project.
    pub fn create_task(&self, request: &NewTaskRequest) -> Result<TaskRecord, TaskServiceError> {
        if request.title.trim().is_empty() {
            return Err(TaskServiceError::BlankTitle);
        }
        let project_id = request
            .project_id
            .ok_or(TaskServiceError::ProjectRequired)?;

        let task = Task::new(
            request.title.clone(),
            request.description.clone(),
            project_id,
            request.status,
            request.due_date,
        );
        self.insert_task(&task)
    }

    /// Appends a task whose identity already exists (seed data).
    pub fn insert_task(&self, task: &Task) -> Result<TaskRecord, TaskServiceError> {
        let task_id = self.repo.create_task(task)?;
        info!(
            "event=task_create module=service status=ok task_id={} project_id={}",
            task_id, task.project_id
        );
        self.read_back(task_id, "created task not found in read-back")
    }

    /// Replaces one task by id.
    pub fn update_task(&self, task: &Task) -> Result<TaskRecord, TaskServiceError> {
        self.repo.update_task(task)?;
        info!(
            "event=task_update module=service status=ok task_id={} project_id={} status={}",
            task.uuid,
            task.project_id,
            task.status.as_str()
        );
        self.read_back(task.uuid, "updated task not found in read-back")
    }

    /// Deletes one task.
    pub fn delete_task(&self, task_id: TaskId) -> Result<(), TaskServiceError> {
        self.repo.delete_task(task_id)?;
        info!(
            "event=task_delete module=service status=ok task_id={}",
            task_id
        );
        Ok(())
    }

    /// Gets one task by id.
    pub fn get_task(&self, task_id: TaskId) -> RepoResult<Option<TaskRecord>> {
        self.repo.get_task(task_id)
    }

    /// Lists tasks in insertion order.
    pub fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<TaskRecord>> {
        self.repo.list_tasks(query)
    }

    fn read_back(
        &self,
        task_id: TaskId,
        details: &'static str,
    ) -> Result<TaskRecord, TaskServiceError> {
        self.repo
            .get_task(task_id)?
            .ok_or(TaskServiceError::InconsistentState(details))
    }
}
