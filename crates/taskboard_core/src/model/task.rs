//! Task domain model.
//!
//! # Responsibility
//! - Define the stored shape of a task and its status enum.
//! - Provide the user-facing status labels used for display and sorting.
//!
//! # Invariants
//! - `uuid` and `project_id` are never nil.
//! - `due_date` is UTC midnight of a calendar day, in epoch milliseconds.

use crate::model::project::ProjectId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Task progress state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// All statuses in select-list order.
    pub const ALL: [TaskStatus; 3] = [Self::NotStarted, Self::InProgress, Self::Completed];

    /// Human-facing label, as shown on badges and in status selects.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Storage/wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Parses a storage value or a display label.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == trimmed || status.label() == trimmed)
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Model-level validation failures for tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilUuid,
    NilProjectId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "task uuid must not be nil"),
            Self::NilProjectId => write!(f, "task project_id must not be nil"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub uuid: TaskId,
    pub title: String,
    pub description: String,
    /// Owning project.
    pub project_id: ProjectId,
    pub status: TaskStatus,
    /// Unix epoch milliseconds.
    pub due_date: i64,
}

impl Task {
    /// Creates a task with a generated id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        project_id: ProjectId,
        status: TaskStatus,
        due_date: i64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            project_id,
            status,
            due_date,
        }
    }

    /// Checks model invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.uuid.is_nil() {
            return Err(TaskValidationError::NilUuid);
        }
        if self.project_id.is_nil() {
            return Err(TaskValidationError::NilProjectId);
        }
        Ok(())
    }
}
