//! Dashboard session and view-state.
//!
//! # Responsibility
//! - Own the in-memory session database for one page lifetime.
//! - Hold transient UI state: active tab, dialog drafts, open edit dialogs,
//!   task filter and sort selection.
//! - Turn form submissions into service calls and render read projections.
//!
//! # Invariants
//! - Invalid submissions (blank name/title, no project) are silent no-ops:
//!   they return `Ok(None)`/`Ok(false)` and leave drafts untouched.
//! - Only substrate failures surface as `DashboardError`.
//! - A successful create resets its draft; a successful save closes its dialog.
//! - Deleting a project resets a filter or new-task selection pointing at it.

use crate::db::{open_db_in_memory, DbError};
use crate::model::project::ProjectId;
use crate::model::task::TaskId;
use crate::repo::project_repo::{ProjectRecord, SqliteProjectRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskListQuery, TaskRecord};
use crate::repo::RepoError;
use crate::service::project_service::{ProjectService, ProjectServiceError};
use crate::service::task_service::{TaskService, TaskServiceError};
use crate::view::cards::{
    filter_options, project_options, status_options, ProjectCard, SelectOption, TaskCard,
};
use crate::view::pipeline::{filter_and_sort, TaskFilter, TaskSort};
use log::{debug, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod forms;
mod seed;

pub use forms::{ProjectEdit, ProjectForm, TaskEdit, TaskForm};

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Substrate failures surfaced by the dashboard.
#[derive(Debug)]
pub enum DashboardError {
    Db(DbError),
    Repo(RepoError),
    Project(ProjectServiceError),
    Task(TaskServiceError),
    InconsistentState(&'static str),
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Project(err) => write!(f, "{err}"),
            Self::Task(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent dashboard state: {details}")
            }
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Project(err) => Some(err),
            Self::Task(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<DbError> for DashboardError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for DashboardError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ProjectServiceError> for DashboardError {
    fn from(value: ProjectServiceError) -> Self {
        match value {
            ProjectServiceError::Repo(err) => Self::Repo(err),
            other => Self::Project(other),
        }
    }
}

impl From<TaskServiceError> for DashboardError {
    fn from(value: TaskServiceError) -> Self {
        match value {
            TaskServiceError::Repo(err) => Self::Repo(err),
            other => Self::Task(other),
        }
    }
}

/// Top-level dashboard tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Projects,
    Tasks,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Self::Projects, Self::Tasks];

    /// Parses a tab label, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.label().eq_ignore_ascii_case(value.trim()))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::Tasks => "Tasks",
        }
    }
}

/// One dashboard session.
pub struct Dashboard {
    conn: Connection,
    active_tab: Tab,
    new_project: ProjectForm,
    new_task: TaskForm,
    editing_project: Option<ProjectEdit>,
    editing_task: Option<TaskEdit>,
    filter: TaskFilter,
    sort: TaskSort,
}

impl Dashboard {
    /// Opens an empty dashboard.
    pub fn open() -> DashboardResult<Self> {
        let conn = open_db_in_memory()?;
        info!("event=dashboard_open module=dashboard status=ok seed=false");
        Ok(Self::with_connection(conn))
    }

    /// Opens a dashboard pre-filled with the demo projects and tasks.
    pub fn open_with_demo_data() -> DashboardResult<Self> {
        let conn = open_db_in_memory()?;
        seed::seed_demo_data(&conn)?;
        info!("event=dashboard_open module=dashboard status=ok seed=true");
        Ok(Self::with_connection(conn))
    }

    fn with_connection(conn: Connection) -> Self {
        Self {
            conn,
            active_tab: Tab::default(),
            new_project: ProjectForm::default(),
            new_task: TaskForm::default(),
            editing_project: None,
            editing_task: None,
            filter: TaskFilter::default(),
            sort: TaskSort::default(),
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    // Projects

    pub fn new_project_form(&self) -> &ProjectForm {
        &self.new_project
    }

    pub fn new_project_form_mut(&mut self) -> &mut ProjectForm {
        &mut self.new_project
    }

    /// Submits the add-project dialog.
    ///
    /// Returns the new project id, or `None` when the name is blank.
    pub fn submit_new_project(&mut self) -> DashboardResult<Option<ProjectId>> {
        let created = {
            let service = self.project_service()?;
            ignore_rejected_project(service.create_project(
                self.new_project.name.clone(),
                self.new_project.description.clone(),
            ))?
        };

        Ok(created.map(|record| {
            self.new_project = ProjectForm::default();
            record.project_id
        }))
    }

    /// Opens the edit dialog for one project. Returns `false` if it is gone.
    pub fn begin_edit_project(&mut self, project_id: ProjectId) -> DashboardResult<bool> {
        let record = self.project_service()?.get_project(project_id)?;
        self.editing_project = record.as_ref().map(ProjectEdit::from);
        Ok(self.editing_project.is_some())
    }

    pub fn editing_project(&self) -> Option<&ProjectEdit> {
        self.editing_project.as_ref()
    }

    pub fn editing_project_mut(&mut self) -> Option<&mut ProjectEdit> {
        self.editing_project.as_mut()
    }

    /// Saves and closes the open edit-project dialog.
    ///
    /// Returns `false` when no dialog is open or the project vanished.
    pub fn save_project_edit(&mut self) -> DashboardResult<bool> {
        let Some(edit) = self.editing_project.take() else {
            return Ok(false);
        };
        let saved = ignore_rejected_project(self.project_service()?.update_project(
            edit.project_id,
            edit.form.name,
            edit.form.description,
        ))?;
        Ok(saved.is_some())
    }

    /// Closes the edit-project dialog without saving.
    pub fn cancel_project_edit(&mut self) {
        self.editing_project = None;
    }

    /// Deletes one project and all of its tasks. Unknown ids are a no-op.
    pub fn delete_project(&mut self, project_id: ProjectId) -> DashboardResult<bool> {
        let deleted = ignore_rejected_project(self.project_service()?.delete_project(project_id))?;
        if deleted.is_none() {
            return Ok(false);
        }

        if self.filter == TaskFilter::Project(project_id) {
            self.filter = TaskFilter::All;
        }
        if self.new_task.project_id == Some(project_id) {
            self.new_task.project_id = None;
        }
        if self
            .editing_project
            .as_ref()
            .is_some_and(|edit| edit.project_id == project_id)
        {
            self.editing_project = None;
        }
        if self
            .editing_task
            .as_ref()
            .is_some_and(|edit| edit.form.project_id == Some(project_id))
        {
            self.editing_task = None;
        }
        Ok(true)
    }

    /// Projects in insertion order with derived counters.
    pub fn projects(&self) -> DashboardResult<Vec<ProjectRecord>> {
        Ok(self.project_service()?.list_projects()?)
    }

    pub fn project_cards(&self) -> DashboardResult<Vec<ProjectCard>> {
        Ok(self.projects()?.iter().map(ProjectCard::from).collect())
    }

    /// Options for the project select of task dialogs.
    pub fn project_options(&self) -> DashboardResult<Vec<SelectOption>> {
        Ok(project_options(&self.projects()?))
    }

    /// Options for the task-list filter select.
    pub fn filter_options(&self) -> DashboardResult<Vec<SelectOption>> {
        Ok(filter_options(&self.projects()?))
    }

    pub fn status_options(&self) -> Vec<SelectOption> {
        status_options()
    }

    // Tasks

    pub fn new_task_form(&self) -> &TaskForm {
        &self.new_task
    }

    pub fn new_task_form_mut(&mut self) -> &mut TaskForm {
        &mut self.new_task
    }

    /// Submits the add-task dialog.
    ///
    /// Returns the new task id, or `None` when the title is blank or no
    /// existing project is selected.
    pub fn submit_new_task(&mut self) -> DashboardResult<Option<TaskId>> {
        let request = self.new_task.to_request();
        let created = ignore_rejected_task(self.task_service()?.create_task(&request))?;

        Ok(created.map(|record| {
            self.new_task = TaskForm::default();
            record.task_id
        }))
    }

    /// Opens the edit dialog for one task. Returns `false` if it is gone.
    pub fn begin_edit_task(&mut self, task_id: TaskId) -> DashboardResult<bool> {
        let record = self.task_service()?.get_task(task_id)?;
        self.editing_task = record.as_ref().map(TaskEdit::from);
        Ok(self.editing_task.is_some())
    }

    pub fn editing_task(&self) -> Option<&TaskEdit> {
        self.editing_task.as_ref()
    }

    pub fn editing_task_mut(&mut self) -> Option<&mut TaskEdit> {
        self.editing_task.as_mut()
    }

    /// Saves and closes the open edit-task dialog.
    ///
    /// Returns `false` when no dialog is open, the task vanished, or the
    /// selected project no longer exists.
    pub fn save_task_edit(&mut self) -> DashboardResult<bool> {
        let Some(edit) = self.editing_task.take() else {
            return Ok(false);
        };
        let Some(project_id) = edit.form.project_id else {
            debug!("event=task_update module=dashboard status=ignored reason=no_project");
            return Ok(false);
        };

        let Some(record) = self.task_service()?.get_task(edit.task_id)? else {
            return Ok(false);
        };
        let mut task = record.to_task();
        task.title = edit.form.title;
        task.description = edit.form.description;
        task.project_id = project_id;
        task.status = edit.form.status;
        task.due_date = edit.form.due_date;

        let saved = ignore_rejected_task(self.task_service()?.update_task(&task))?;
        Ok(saved.is_some())
    }

    /// Closes the edit-task dialog without saving.
    pub fn cancel_task_edit(&mut self) {
        self.editing_task = None;
    }

    /// Deletes one task. Unknown ids are a no-op.
    pub fn delete_task(&mut self, task_id: TaskId) -> DashboardResult<bool> {
        let deleted = ignore_rejected_task(self.task_service()?.delete_task(task_id))?;
        if deleted.is_some()
            && self
                .editing_task
                .as_ref()
                .is_some_and(|edit| edit.task_id == task_id)
        {
            self.editing_task = None;
        }
        Ok(deleted.is_some())
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    /// Applies a filter select value. Unknown values keep the current filter.
    pub fn set_filter_selection(&mut self, value: &str) -> bool {
        match TaskFilter::from_selection(value) {
            Some(filter) => {
                self.filter = filter;
                true
            }
            None => false,
        }
    }

    pub fn sort(&self) -> TaskSort {
        self.sort
    }

    /// Applies a sort select value. Unknown values keep the current sort.
    pub fn set_sort_key(&mut self, value: &str) -> bool {
        match TaskSort::from_key(value) {
            Some(sort) => {
                self.sort = sort;
                true
            }
            None => false,
        }
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> DashboardResult<Vec<TaskRecord>> {
        Ok(self
            .task_service()?
            .list_tasks(&TaskListQuery::default())?)
    }

    /// Tasks after the current filter and sort.
    pub fn visible_tasks(&self) -> DashboardResult<Vec<TaskRecord>> {
        Ok(filter_and_sort(&self.tasks()?, &self.filter, self.sort))
    }

    pub fn task_cards(&self) -> DashboardResult<Vec<TaskCard>> {
        Ok(self.visible_tasks()?.iter().map(TaskCard::from).collect())
    }

    fn project_service(&self) -> DashboardResult<ProjectService<SqliteProjectRepository<'_>>> {
        Ok(ProjectService::new(SqliteProjectRepository::try_new(
            &self.conn,
        )?))
    }

    fn task_service(&self) -> DashboardResult<TaskService<SqliteTaskRepository<'_>>> {
        Ok(TaskService::new(SqliteTaskRepository::try_new(&self.conn)?))
    }
}

fn ignore_rejected_project<T>(result: Result<T, ProjectServiceError>) -> DashboardResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err @ (ProjectServiceError::BlankName | ProjectServiceError::ProjectNotFound(_))) => {
            debug!("event=project_submit module=dashboard status=ignored reason={err}");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn ignore_rejected_task<T>(result: Result<T, TaskServiceError>) -> DashboardResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(
            err @ (TaskServiceError::BlankTitle
            | TaskServiceError::ProjectRequired
            | TaskServiceError::ProjectNotFound(_)
            | TaskServiceError::TaskNotFound(_)),
        ) => {
            debug!("event=task_submit module=dashboard status=ignored reason={err}");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
