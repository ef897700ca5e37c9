//! Demo data shown by a freshly opened dashboard.

use super::{DashboardError, DashboardResult};
use crate::model::due_date::ymd_epoch_ms;
use crate::model::project::Project;
use crate::model::task::{Task, TaskStatus};
use crate::repo::project_repo::SqliteProjectRepository;
use crate::repo::task_repo::SqliteTaskRepository;
use crate::service::project_service::ProjectService;
use crate::service::task_service::TaskService;
use rusqlite::Connection;
use uuid::Uuid;

struct SeedProject {
    name: &'static str,
    description: &'static str,
    created: (i32, u32, u32),
}

struct SeedTask {
    title: &'static str,
    description: &'static str,
    project: usize,
    status: TaskStatus,
    due: (i32, u32, u32),
}

const PROJECTS: &[SeedProject] = &[
    SeedProject {
        name: "Website Redesign",
        description: "Overhaul of company website",
        created: (2023, 1, 15),
    },
    SeedProject {
        name: "Mobile App Development",
        description: "New app for customer engagement",
        created: (2023, 2, 1),
    },
    SeedProject {
        name: "Marketing Campaign",
        description: "Q2 product launch campaign",
        created: (2023, 3, 10),
    },
];

const TASKS: &[SeedTask] = &[
    SeedTask {
        title: "Design homepage",
        description: "Create wireframes and mockups",
        project: 0,
        status: TaskStatus::InProgress,
        due: (2023, 4, 30),
    },
    SeedTask {
        title: "Implement user authentication",
        description: "Set up secure login system",
        project: 1,
        status: TaskStatus::Completed,
        due: (2023, 5, 15),
    },
    SeedTask {
        title: "Create social media content",
        description: "Design graphics and write copy",
        project: 2,
        status: TaskStatus::NotStarted,
        due: (2023, 6, 1),
    },
];

/// Inserts the demo projects and tasks into an empty session.
pub(super) fn seed_demo_data(conn: &Connection) -> DashboardResult<()> {
    let projects = ProjectService::new(SqliteProjectRepository::try_new(conn)?);
    let tasks = TaskService::new(SqliteTaskRepository::try_new(conn)?);

    let mut project_ids = Vec::with_capacity(PROJECTS.len());
    for seed in PROJECTS {
        let project = Project::with_id(
            Uuid::new_v4(),
            seed.name,
            seed.description,
            seed_date(seed.created)?,
        )
        .map_err(|_| DashboardError::InconsistentState("seed project failed validation"))?;
        let record = projects.insert_project(&project)?;
        project_ids.push(record.project_id);
    }

    for seed in TASKS {
        let project_id = *project_ids
            .get(seed.project)
            .ok_or(DashboardError::InconsistentState("seed task references unknown project"))?;
        let task = Task::new(
            seed.title,
            seed.description,
            project_id,
            seed.status,
            seed_date(seed.due)?,
        );
        tasks.insert_task(&task)?;
    }

    Ok(())
}

fn seed_date((year, month, day): (i32, u32, u32)) -> DashboardResult<i64> {
    ymd_epoch_ms(year, month, day).ok_or(DashboardError::InconsistentState("invalid seed date"))
}
