//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Append, edit, read and delete projects in insertion order.
//! - Derive per-project task and completed counters from the task table.
//!
//! # Invariants
//! - Counters are computed on every read; nothing stores them.
//! - Deleting a project removes its tasks through the foreign-key cascade.
//! - Editing never touches `uuid`, `created_at` or list position.

use super::schema::{
    ensure_connection_ready, next_position, parse_uuid, PROJECT_COLUMNS, TASK_COLUMNS,
};
use super::{RepoError, RepoResult};
use crate::model::project::{Project, ProjectId};
use rusqlite::{params, Connection, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    p.uuid AS uuid,
    p.name AS name,
    p.description AS description,
    p.created_at AS created_at,
    COUNT(t.uuid) AS task_count,
    COALESCE(SUM(CASE WHEN t.status = 'completed' THEN 1 ELSE 0 END), 0) AS completed_count
FROM projects p
LEFT JOIN tasks t ON t.project_uuid = p.uuid";

/// Read model for project cards and selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub project_id: ProjectId,
    pub name: String,
    pub description: String,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Number of tasks referencing this project.
    pub task_count: u32,
    /// Number of those tasks with status `Completed`.
    pub completed_count: u32,
}

impl ProjectRecord {
    /// Completed share in `0.0..=1.0`; zero for a project without tasks.
    pub fn progress(&self) -> f64 {
        if self.task_count == 0 {
            return 0.0;
        }
        f64::from(self.completed_count) / f64::from(self.task_count)
    }

    /// Stored shape of this record, without derived counters.
    pub fn to_project(&self) -> Project {
        Project {
            uuid: self.project_id,
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
        }
    }
}

/// Repository interface for project operations.
pub trait ProjectRepository {
    /// Appends one project and returns its id.
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId>;
    /// Replaces the editable fields of one project.
    fn update_project(&self, project: &Project) -> RepoResult<()>;
    /// Loads one project with derived counters.
    fn get_project(&self, project_id: ProjectId) -> RepoResult<Option<ProjectRecord>>;
    /// Lists all projects in insertion order.
    fn list_projects(&self) -> RepoResult<Vec<ProjectRecord>>;
    /// Deletes one project and returns how many tasks went with it.
    fn delete_project(&self, project_id: ProjectId) -> RepoResult<u32>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "projects", PROJECT_COLUMNS)?;
        ensure_connection_ready(conn, "tasks", TASK_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;
        let position = next_position(self.conn, "projects")?;

        self.conn.execute(
            "INSERT INTO projects (
                uuid,
                name,
                description,
                created_at,
                position
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                project.uuid.to_string(),
                project.name.as_str(),
                project.description.as_str(),
                project.created_at,
                position,
            ],
        )?;

        Ok(project.uuid)
    }

    fn update_project(&self, project: &Project) -> RepoResult<()> {
        project.validate()?;

        let changed = self.conn.execute(
            "UPDATE projects
             SET
                name = ?1,
                description = ?2
             WHERE uuid = ?3;",
            params![
                project.name.as_str(),
                project.description.as_str(),
                project.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::ProjectNotFound(project.uuid));
        }
        Ok(())
    }

    fn get_project(&self, project_id: ProjectId) -> RepoResult<Option<ProjectRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL}
             WHERE p.uuid = ?1
             GROUP BY p.uuid;"
        ))?;

        let mut rows = stmt.query([project_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn list_projects(&self) -> RepoResult<Vec<ProjectRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL}
             GROUP BY p.uuid
             ORDER BY p.position ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn delete_project(&self, project_id: ProjectId) -> RepoResult<u32> {
        let id_text = project_id.to_string();
        let cascaded: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE project_uuid = ?1;",
            [id_text.as_str()],
            |row| row.get(0),
        )?;

        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE uuid = ?1;", [id_text.as_str()])?;
        if changed == 0 {
            return Err(RepoError::ProjectNotFound(project_id));
        }
        Ok(cascaded)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<ProjectRecord> {
    let uuid_text: String = row.get("uuid")?;
    let task_count: i64 = row.get("task_count")?;
    let completed_count: i64 = row.get("completed_count")?;

    Ok(ProjectRecord {
        project_id: parse_uuid(&uuid_text, "projects.uuid")?,
        name: row.get("name")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        task_count: count_to_u32(task_count, "task_count")?,
        completed_count: count_to_u32(completed_count, "completed_count")?,
    })
}

fn count_to_u32(value: i64, column: &'static str) -> RepoResult<u32> {
    u32::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid count `{value}` in {column}")))
}
