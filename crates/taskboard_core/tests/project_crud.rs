use taskboard_core::db::open_db_in_memory;
use taskboard_core::{
    NewTaskRequest, Project, ProjectRepository, ProjectService, ProjectServiceError, RepoError,
    SqliteProjectRepository, SqliteTaskRepository, TaskListQuery, TaskService, TaskStatus,
};
use uuid::Uuid;

fn task_request(title: &str, project_id: Uuid, status: TaskStatus) -> NewTaskRequest {
    NewTaskRequest {
        title: title.to_string(),
        description: String::new(),
        project_id: Some(project_id),
        status,
        due_date: 1_682_812_800_000,
    }
}

#[test]
fn create_project_appends_with_zero_counters() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());

    let created = service.create_project("Website Redesign", "Overhaul").unwrap();
    assert_eq!(created.name, "Website Redesign");
    assert_eq!(created.description, "Overhaul");
    assert_eq!(created.task_count, 0);
    assert_eq!(created.completed_count, 0);
    assert_eq!(created.progress(), 0.0);

    let listed = service.list_projects().unwrap();
    assert_eq!(listed, vec![created]);
}

#[test]
fn create_project_rejects_blank_name_without_side_effects() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());

    for name in ["", "   ", "\t\n"] {
        let err = service.create_project(name, "desc").unwrap_err();
        assert!(matches!(err, ProjectServiceError::BlankName));
    }
    assert!(service.list_projects().unwrap().is_empty());
}

#[test]
fn projects_list_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());

    let names = ["zeta", "alpha", "mid"];
    for name in names {
        service.create_project(name, "").unwrap();
    }

    let listed = service
        .list_projects()
        .unwrap()
        .into_iter()
        .map(|project| project.name)
        .collect::<Vec<_>>();
    assert_eq!(listed, names);
}

#[test]
fn update_project_replaces_fields_and_keeps_identity() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());
    let first = service.create_project("first", "one").unwrap();
    let second = service.create_project("second", "two").unwrap();

    let updated = service.update_project(first.project_id, "renamed", "").unwrap();
    assert_eq!(updated.project_id, first.project_id);
    assert_eq!(updated.created_at, first.created_at);
    assert_eq!(updated.name, "renamed");
    assert_eq!(updated.description, "");

    let listed = service.list_projects().unwrap();
    assert_eq!(listed[0].project_id, first.project_id);
    assert_eq!(listed[1], second);
}

#[test]
fn update_unknown_project_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());
    let missing = Uuid::new_v4();

    let err = service.update_project(missing, "x", "y").unwrap_err();
    assert!(matches!(err, ProjectServiceError::ProjectNotFound(id) if id == missing));

    let repo = SqliteProjectRepository::try_new(&conn).unwrap();
    let err = repo
        .update_project(&Project::with_id(missing, "x", "", 0).unwrap())
        .unwrap_err();
    assert!(matches!(err, RepoError::ProjectNotFound(id) if id == missing));
}

#[test]
fn counters_are_derived_from_tasks() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());
    let tasks = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());
    let project = projects.create_project("p", "").unwrap();

    tasks
        .create_task(&task_request("a", project.project_id, TaskStatus::Completed))
        .unwrap();
    tasks
        .create_task(&task_request("b", project.project_id, TaskStatus::InProgress))
        .unwrap();
    tasks
        .create_task(&task_request("c", project.project_id, TaskStatus::NotStarted))
        .unwrap();
    tasks
        .create_task(&task_request("d", project.project_id, TaskStatus::Completed))
        .unwrap();

    let loaded = projects.get_project(project.project_id).unwrap().unwrap();
    assert_eq!(loaded.task_count, 4);
    assert_eq!(loaded.completed_count, 2);
    assert_eq!(loaded.progress(), 0.5);
}

#[test]
fn delete_project_cascades_only_its_tasks() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());
    let tasks = TaskService::new(SqliteTaskRepository::try_new(&conn).unwrap());
    let doomed = projects.create_project("doomed", "").unwrap();
    let kept = projects.create_project("kept", "").unwrap();

    tasks
        .create_task(&task_request("x", doomed.project_id, TaskStatus::NotStarted))
        .unwrap();
    tasks
        .create_task(&task_request("y", doomed.project_id, TaskStatus::Completed))
        .unwrap();
    let survivor = tasks
        .create_task(&task_request("z", kept.project_id, TaskStatus::NotStarted))
        .unwrap();

    let cascaded = projects.delete_project(doomed.project_id).unwrap();
    assert_eq!(cascaded, 2);

    assert!(projects.get_project(doomed.project_id).unwrap().is_none());
    let remaining = tasks.list_tasks(&TaskListQuery::default()).unwrap();
    assert_eq!(remaining, vec![survivor]);
    assert_eq!(
        projects.get_project(kept.project_id).unwrap().unwrap().task_count,
        1
    );
}

#[test]
fn delete_unknown_project_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());
    service.create_project("stays", "").unwrap();

    let err = service.delete_project(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, ProjectServiceError::ProjectNotFound(_)));
    assert_eq!(service.list_projects().unwrap().len(), 1);
}
