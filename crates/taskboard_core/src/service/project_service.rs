//! Project use-case service.
//!
//! # Invariants
//! - New projects need a name that is non-blank after trimming; the name is
//!   stored as entered.
//! - Edits replace name and description only.

use crate::model::project::{Project, ProjectId};
use crate::repo::project_repo::{ProjectRecord, ProjectRepository};
use crate::repo::{RepoError, RepoResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from project service operations.
#[derive(Debug)]
pub enum ProjectServiceError {
    /// Name is blank after trim.
    BlankName,
    /// Target project does not exist.
    ProjectNotFound(ProjectId),
    /// Repository-level failure.
    Repo(RepoError),
    /// Write succeeded but read-back did not find the row.
    InconsistentState(&'static str),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "project name must not be blank"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent project state: {details}"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ProjectNotFound(id) => Self::ProjectNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Project service facade over repository implementations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Appends a new project with zero tasks.
    pub fn create_project(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProjectServiceError::BlankName);
        }

        let project = Project::new(name, description);
        let project_id = self.repo.create_project(&project)?;
        info!(
            "event=project_create module=service status=ok project_id={}",
            project_id
        );
        self.read_back(project_id, "created project not found in read-back")
    }

    /// Appends a project whose identity already exists (seed data).
    pub fn insert_project(&self, project: &Project) -> Result<ProjectRecord, ProjectServiceError> {
        let project_id = self.repo.create_project(project)?;
        self.read_back(project_id, "inserted project not found in read-back")
    }

    /// Replaces name and description of one project.
    pub fn update_project(
        &self,
        project_id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        let existing = self
            .repo
            .get_project(project_id)?
            .ok_or(ProjectServiceError::ProjectNotFound(project_id))?;

        let mut project = existing.to_project();
        project.name = name.into();
        project.description = description.into();
        self.repo.update_project(&project)?;
        info!(
            "event=project_update module=service status=ok project_id={}",
            project_id
        );
        self.read_back(project_id, "updated project not found in read-back")
    }

    /// Deletes one project and its tasks; returns the cascaded task count.
    pub fn delete_project(&self, project_id: ProjectId) -> Result<u32, ProjectServiceError> {
        let cascaded = self.repo.delete_project(project_id)?;
        info!(
            "event=project_delete module=service status=ok project_id={} cascaded_tasks={}",
            project_id, cascaded
        );
        Ok(cascaded)
    }

    /// Gets one project by id.
    pub fn get_project(&self, project_id: ProjectId) -> RepoResult<Option<ProjectRecord>> {
        self.repo.get_project(project_id)
    }

    /// Lists projects in insertion order.
    pub fn list_projects(&self) -> RepoResult<Vec<ProjectRecord>> {
        self.repo.list_projects()
    }

    fn read_back(
        &self,
        project_id: ProjectId,
        details: &'static str,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        self.repo
            .get_project(project_id)?
            .ok_or(ProjectServiceError::InconsistentState(details))
    }
}
