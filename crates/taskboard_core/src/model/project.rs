//! Project domain model.
//!
//! # Responsibility
//! - Define the stored shape of a project.
//! - Validate identity before persistence.
//!
//! # Invariants
//! - `uuid` is never nil and never reused for another project.
//! - `created_at` is set once at creation and survives every edit.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// Model-level validation failures for projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    /// Project id is the nil UUID.
    NilUuid,
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "project uuid must not be nil"),
        }
    }
}

impl Error for ProjectValidationError {}

/// Canonical stored project.
///
/// Name emptiness is a create-time rule enforced by the service layer; edits
/// replace fields verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub uuid: ProjectId,
    pub name: String,
    pub description: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Project {
    /// Creates a project with a generated id, stamped with the current time.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Creates a project with caller-provided identity and creation time.
    ///
    /// Used by seed data where both already exist.
    pub fn with_id(
        uuid: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
        created_at: i64,
    ) -> Result<Self, ProjectValidationError> {
        let project = Self {
            uuid,
            name: name.into(),
            description: description.into(),
            created_at,
        };
        project.validate()?;
        Ok(project)
    }

    /// Checks model invariants.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.uuid.is_nil() {
            return Err(ProjectValidationError::NilUuid);
        }
        Ok(())
    }
}
