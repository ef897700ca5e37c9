//! Core domain logic for Taskboard.
//! This crate is the single source of truth for project/task invariants.

pub mod dashboard;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use dashboard::{
    Dashboard, DashboardError, DashboardResult, ProjectEdit, ProjectForm, Tab, TaskEdit, TaskForm,
};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::due_date::{
    format_date_input, format_display_date, parse_date_input, DateInputError,
};
pub use model::project::{Project, ProjectId, ProjectValidationError};
pub use model::task::{Task, TaskId, TaskStatus, TaskValidationError};
pub use repo::project_repo::{ProjectRecord, ProjectRepository, SqliteProjectRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskListQuery, TaskRecord, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::project_service::{ProjectService, ProjectServiceError};
pub use service::task_service::{NewTaskRequest, TaskService, TaskServiceError};
pub use view::cards::{BadgeVariant, ProjectCard, SelectOption, TaskCard};
pub use view::pipeline::{filter_and_sort, TaskFilter, TaskSort, ALL_PROJECTS};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
