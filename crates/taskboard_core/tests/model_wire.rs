use taskboard_core::{Project, ProjectValidationError, Task, TaskStatus, TaskValidationError};
use uuid::Uuid;

#[test]
fn project_new_generates_distinct_ids() {
    let first = Project::new("a", "");
    let second = Project::new("a", "");

    assert!(!first.uuid.is_nil());
    assert_ne!(first.uuid, second.uuid);
    assert!(first.created_at > 0);
}

#[test]
fn project_with_id_rejects_nil_uuid() {
    let err = Project::with_id(Uuid::nil(), "name", "", 0).unwrap_err();
    assert_eq!(err, ProjectValidationError::NilUuid);
}

#[test]
fn task_validate_rejects_nil_project() {
    let task = Task::new("t", "", Uuid::nil(), TaskStatus::NotStarted, 0);
    assert_eq!(task.validate(), Err(TaskValidationError::NilProjectId));
}

#[test]
fn status_labels_and_wire_values() {
    assert_eq!(TaskStatus::NotStarted.label(), "Not Started");
    assert_eq!(TaskStatus::InProgress.to_string(), "In Progress");
    assert_eq!(TaskStatus::Completed.as_str(), "completed");
    assert_eq!(TaskStatus::default(), TaskStatus::NotStarted);

    assert_eq!(TaskStatus::parse("In Progress"), Some(TaskStatus::InProgress));
    assert_eq!(TaskStatus::parse("not_started"), Some(TaskStatus::NotStarted));
    assert_eq!(TaskStatus::parse("done"), None);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let project_id = Uuid::parse_str("66666666-7777-4888-9999-aaaaaaaaaaaa").unwrap();
    let mut task = Task::new(
        "ship",
        "release notes",
        project_id,
        TaskStatus::InProgress,
        1_682_812_800_000,
    );
    task.uuid = task_id;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["uuid"], task_id.to_string());
    assert_eq!(json["project_id"], project_id.to_string());
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["due_date"], 1_682_812_800_000_i64);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}
