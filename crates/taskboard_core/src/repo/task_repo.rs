//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Append, replace, read and delete tasks in insertion order.
//! - Join the owning project's current name into every read.
//!
//! # Invariants
//! - A task can only reference an existing project.
//! - Replacing a task keeps its id and list position.

use super::schema::{
    ensure_connection_ready, next_position, parse_uuid, PROJECT_COLUMNS, TASK_COLUMNS,
};
use super::{RepoError, RepoResult};
use crate::model::project::ProjectId;
use crate::model::task::{Task, TaskId, TaskStatus};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    t.uuid AS uuid,
    t.title AS title,
    t.description AS description,
    t.project_uuid AS project_uuid,
    p.name AS project_name,
    t.status AS status,
    t.due_date AS due_date
FROM tasks t
JOIN projects p ON p.uuid = t.project_uuid";

/// Read model for task cards and edit dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub task_id: TaskId,
    pub title: String,
    pub description: String,
    pub project_id: ProjectId,
    /// Current name of the owning project.
    pub project_name: String,
    pub status: TaskStatus,
    /// Epoch ms due date.
    pub due_date: i64,
}

impl TaskRecord {
    /// Stored shape of this record.
    pub fn to_task(&self) -> Task {
        Task {
            uuid: self.task_id,
            title: self.title.clone(),
            description: self.description.clone(),
            project_id: self.project_id,
            status: self.status,
            due_date: self.due_date,
        }
    }
}

/// Query options for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    /// Restrict to one project when set.
    pub project_id: Option<ProjectId>,
}

/// Repository interface for task operations.
pub trait TaskRepository {
    /// Appends one task and returns its id.
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    /// Replaces every field of one task except its id.
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    /// Loads one task.
    fn get_task(&self, task_id: TaskId) -> RepoResult<Option<TaskRecord>>;
    /// Lists tasks in insertion order.
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<TaskRecord>>;
    /// Deletes one task.
    fn delete_task(&self, task_id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "projects", PROJECT_COLUMNS)?;
        ensure_connection_ready(conn, "tasks", TASK_COLUMNS)?;
        Ok(Self { conn })
    }

    fn ensure_project_exists(&self, project_id: ProjectId) -> RepoResult<()> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE uuid = ?1);",
            [project_id.to_string()],
            |row| row.get(0),
        )?;
        if exists == 1 {
            Ok(())
        } else {
            Err(RepoError::ProjectNotFound(project_id))
        }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;
        self.ensure_project_exists(task.project_id)?;
        let position = next_position(self.conn, "tasks")?;

        self.conn.execute(
            "INSERT INTO tasks (
                uuid,
                title,
                description,
                project_uuid,
                status,
                due_date,
                position
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                task.uuid.to_string(),
                task.title.as_str(),
                task.description.as_str(),
                task.project_id.to_string(),
                task.status.as_str(),
                task.due_date,
                position,
            ],
        )?;

        Ok(task.uuid)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;
        self.ensure_project_exists(task.project_id)?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                project_uuid = ?3,
                status = ?4,
                due_date = ?5
             WHERE uuid = ?6;",
            params![
                task.title.as_str(),
                task.description.as_str(),
                task.project_id.to_string(),
                task.status.as_str(),
                task.due_date,
                task.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::TaskNotFound(task.uuid));
        }
        Ok(())
    }

    fn get_task(&self, task_id: TaskId) -> RepoResult<Option<TaskRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE t.uuid = ?1;"))?;

        let mut rows = stmt.query([task_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<TaskRecord>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(project_id) = query.project_id {
            sql.push_str(" AND t.project_uuid = ?");
            bind_values.push(Value::Text(project_id.to_string()));
        }
        sql.push_str(" ORDER BY t.position ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn delete_task(&self, task_id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE uuid = ?1;", [task_id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::TaskNotFound(task_id));
        }
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<TaskRecord> {
    let uuid_text: String = row.get("uuid")?;
    let project_text: String = row.get("project_uuid")?;
    let status_text: String = row.get("status")?;
    let status = TaskStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid task status `{status_text}` in tasks.status"))
    })?;

    Ok(TaskRecord {
        task_id: parse_uuid(&uuid_text, "tasks.uuid")?,
        title: row.get("title")?,
        description: row.get("description")?,
        project_id: parse_uuid(&project_text, "tasks.project_uuid")?,
        project_name: row.get("project_name")?,
        status,
        due_date: row.get("due_date")?,
    })
}
