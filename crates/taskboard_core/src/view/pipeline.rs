//! Task list filter/sort pipeline.
//!
//! Filtering keeps either every task (`All`) or the tasks of one project.
//! Sorting is either ascending due date or alphabetical status label. The
//! status order is by label text (`Completed < In Progress < Not Started`),
//! not by progress; [`compare_status_label`] is the single place to change
//! that.

use crate::model::project::ProjectId;
use crate::repo::task_repo::TaskRecord;
use std::cmp::Ordering;

/// Selection value meaning "no project filter".
pub const ALL_PROJECTS: &str = "All";

/// Project filter for the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    Project(ProjectId),
}

impl TaskFilter {
    /// Parses a select value: `All` or a project id.
    pub fn from_selection(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed == ALL_PROJECTS {
            return Some(Self::All);
        }
        ProjectId::parse_str(trimmed).ok().map(Self::Project)
    }

    /// Select value for this filter.
    pub fn selection_value(&self) -> String {
        match self {
            Self::All => ALL_PROJECTS.to_string(),
            Self::Project(project_id) => project_id.to_string(),
        }
    }

    pub fn matches(&self, task: &TaskRecord) -> bool {
        match self {
            Self::All => true,
            Self::Project(project_id) => task.project_id == *project_id,
        }
    }
}

/// Sort key for the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskSort {
    #[default]
    DueDate,
    Status,
}

impl TaskSort {
    pub const ALL: [TaskSort; 2] = [Self::DueDate, Self::Status];

    /// Parses a select value (`dueDate` or `status`).
    pub fn from_key(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sort| sort.key() == value.trim())
    }

    /// Select value.
    pub fn key(self) -> &'static str {
        match self {
            Self::DueDate => "dueDate",
            Self::Status => "status",
        }
    }

    /// Select label.
    pub fn label(self) -> &'static str {
        match self {
            Self::DueDate => "Due Date",
            Self::Status => "Status",
        }
    }

    fn compare(self, a: &TaskRecord, b: &TaskRecord) -> Ordering {
        match self {
            Self::DueDate => compare_due_date(a, b),
            Self::Status => compare_status_label(a, b),
        }
    }
}

/// Ascending due date.
pub fn compare_due_date(a: &TaskRecord, b: &TaskRecord) -> Ordering {
    a.due_date.cmp(&b.due_date)
}

/// Lexicographic status label.
pub fn compare_status_label(a: &TaskRecord, b: &TaskRecord) -> Ordering {
    a.status.label().cmp(b.status.label())
}

/// Applies the filter, then a stable sort, to a task list.
pub fn filter_and_sort(tasks: &[TaskRecord], filter: &TaskFilter, sort: TaskSort) -> Vec<TaskRecord> {
    let mut visible = tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect::<Vec<_>>();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}

#[cfg(test)]
mod tests {
    use super::{compare_status_label, filter_and_sort, TaskFilter, TaskSort, ALL_PROJECTS};
    use crate::model::task::TaskStatus;
    use crate::repo::task_repo::TaskRecord;
    use std::cmp::Ordering;
    use uuid::Uuid;

    fn record(title: &str, project_id: Uuid, status: TaskStatus, due_date: i64) -> TaskRecord {
        TaskRecord {
            task_id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            project_id,
            project_name: "p".to_string(),
            status,
            due_date,
        }
    }

    #[test]
    fn status_labels_sort_alphabetically_not_by_progress() {
        let project = Uuid::new_v4();
        let done = record("a", project, TaskStatus::Completed, 0);
        let doing = record("b", project, TaskStatus::InProgress, 0);
        let todo = record("c", project, TaskStatus::NotStarted, 0);

        assert_eq!(compare_status_label(&done, &doing), Ordering::Less);
        assert_eq!(compare_status_label(&doing, &todo), Ordering::Less);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let project = Uuid::new_v4();
        let tasks = vec![
            record("first", project, TaskStatus::NotStarted, 5),
            record("second", project, TaskStatus::NotStarted, 5),
        ];
        let sorted = filter_and_sort(&tasks, &TaskFilter::All, TaskSort::DueDate);
        assert_eq!(sorted[0].title, "first");
        assert_eq!(sorted[1].title, "second");
    }

    #[test]
    fn selection_values_parse() {
        let project = Uuid::new_v4();
        assert_eq!(TaskFilter::from_selection(ALL_PROJECTS), Some(TaskFilter::All));
        assert_eq!(
            TaskFilter::from_selection(&project.to_string()),
            Some(TaskFilter::Project(project))
        );
        assert_eq!(TaskFilter::from_selection("all"), None);
        assert_eq!(TaskSort::from_key("status"), Some(TaskSort::Status));
        assert_eq!(TaskSort::from_key("priority"), None);
    }
}
