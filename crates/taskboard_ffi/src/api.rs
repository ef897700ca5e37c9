//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level dashboard functions to Dart via FRB.
//! - Keep one dashboard session per process behind a mutex.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every failure is reported through a response envelope message.
//! - The session is created lazily with demo data on first use.

use log::warn;
use std::sync::{Mutex, PoisonError};
use taskboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_date_input,
    ping as ping_inner, Dashboard, DashboardResult, ProjectCard, SelectOption, Tab, TaskCard,
    TaskForm, TaskStatus,
};
use uuid::Uuid;

static SESSION: Mutex<Option<Dashboard>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for dashboard mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the action changed dashboard state.
    pub ok: bool,
    /// Id of the created or touched entity, when there is one.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Project card as rendered on the projects tab.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCardItem {
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub task_count: u32,
    pub completed_count: u32,
    /// Completed share in `0.0..=1.0`.
    pub progress: f64,
    pub created_label: String,
}

/// Project list response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectListResponse {
    pub items: Vec<ProjectCardItem>,
    pub message: String,
}

/// Task card as rendered on the tasks tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCardItem {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub project_name: String,
    pub status_label: String,
    /// Badge variant (`default|warning|success`).
    pub badge: String,
    pub due_label: String,
}

/// Task list response envelope with the applied view selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Filtered and sorted task cards.
    pub items: Vec<TaskCardItem>,
    pub message: String,
    /// Applied filter select value (`All` or a project id).
    pub filter: String,
    /// Applied sort key (`dueDate|status`).
    pub sort: String,
}

/// `(value, label)` pair for a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub value: String,
    pub label: String,
}

/// Select-option response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionListResponse {
    pub items: Vec<SelectItem>,
    pub message: String,
}

/// Replaces the process session with a fresh one.
///
/// # FFI contract
/// - `seed_demo=true` loads the demo projects and tasks.
/// - Clears every draft, open dialog, filter and sort selection.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_reset(seed_demo: bool) -> ActionResponse {
    let opened = if seed_demo {
        Dashboard::open_with_demo_data()
    } else {
        Dashboard::open()
    };
    match opened {
        Ok(dashboard) => {
            *lock_session() = Some(dashboard);
            ActionResponse::success("Dashboard reset.", None)
        }
        Err(err) => failure("dashboard_reset", err),
    }
}

/// Creates a project from the add-project dialog.
///
/// Blank names are rejected with `ok=false` and leave state unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn project_create(name: String, description: String) -> ActionResponse {
    let result = with_dashboard(|dashboard| {
        let form = dashboard.new_project_form_mut();
        form.name = name;
        form.description = description;
        dashboard.submit_new_project()
    });
    match result {
        Ok(Some(project_id)) => {
            ActionResponse::success("Project created.", Some(project_id.to_string()))
        }
        Ok(None) => ActionResponse::failure("Project name must not be blank."),
        Err(err) => ActionResponse::failure(format!("project_create failed: {err}")),
    }
}

/// Replaces name and description of one project.
#[flutter_rust_bridge::frb(sync)]
pub fn project_update(project_id: String, name: String, description: String) -> ActionResponse {
    let Some(id) = parse_id(&project_id) else {
        return ActionResponse::failure(format!("invalid project id: {project_id}"));
    };
    let result = with_dashboard(|dashboard| {
        if !dashboard.begin_edit_project(id)? {
            return Ok(false);
        }
        if let Some(edit) = dashboard.editing_project_mut() {
            edit.form.name = name;
            edit.form.description = description;
        }
        dashboard.save_project_edit()
    });
    changed("project_update", result, "Project updated.", id)
}

/// Deletes one project together with all of its tasks.
#[flutter_rust_bridge::frb(sync)]
pub fn project_delete(project_id: String) -> ActionResponse {
    let Some(id) = parse_id(&project_id) else {
        return ActionResponse::failure(format!("invalid project id: {project_id}"));
    };
    let result = with_dashboard(|dashboard| dashboard.delete_project(id));
    changed("project_delete", result, "Project deleted.", id)
}

/// Creates a task from the add-task dialog.
///
/// Input semantics:
/// - `status`: a label (`In Progress`) or wire value (`in_progress`).
/// - `due_date`: `YYYY-MM-DD`; empty means today.
///
/// Each call starts from a fresh draft; nothing from a rejected call carries
/// over.
#[flutter_rust_bridge::frb(sync)]
pub fn task_create(
    title: String,
    description: String,
    project_id: String,
    status: String,
    due_date: String,
) -> ActionResponse {
    let status = match parse_status(&status) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let due_date = match parse_optional_date(&due_date) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let project_id = parse_id(&project_id);

    let result = with_dashboard(|dashboard| {
        let form = dashboard.new_task_form_mut();
        *form = TaskForm::default();
        form.title = title;
        form.description = description;
        form.project_id = project_id;
        form.status = status;
        if let Some(value) = due_date {
            form.due_date = value;
        }
        dashboard.submit_new_task()
    });
    match result {
        Ok(Some(task_id)) => ActionResponse::success("Task created.", Some(task_id.to_string())),
        Ok(None) => {
            ActionResponse::failure("Task needs a non-blank title and an existing project.")
        }
        Err(err) => ActionResponse::failure(format!("task_create failed: {err}")),
    }
}

/// Replaces every editable field of one task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(
    task_id: String,
    title: String,
    description: String,
    project_id: String,
    status: String,
    due_date: String,
) -> ActionResponse {
    let Some(id) = parse_id(&task_id) else {
        return ActionResponse::failure(format!("invalid task id: {task_id}"));
    };
    let status = match parse_status(&status) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let due_date = match parse_optional_date(&due_date) {
        Ok(value) => value,
        Err(response) => return response,
    };
    let Some(project_id) = parse_id(&project_id) else {
        return ActionResponse::failure(format!("invalid project id: {project_id}"));
    };

    let result = with_dashboard(|dashboard| {
        if !dashboard.begin_edit_task(id)? {
            return Ok(None);
        }
        if let Some(edit) = dashboard.editing_task_mut() {
            edit.form.title = title;
            edit.form.description = description;
            edit.form.project_id = Some(project_id);
            edit.form.status = status;
            if let Some(value) = due_date {
                edit.form.due_date = value;
            }
        }
        dashboard.save_task_edit().map(Some)
    });
    match result {
        Ok(Some(true)) => ActionResponse::success("Task updated.", Some(id.to_string())),
        Ok(Some(false)) => {
            ActionResponse::failure(format!("task_update ignored: project {project_id} not found"))
        }
        Ok(None) => ActionResponse::failure(format!("task_update ignored: task {id} not found")),
        Err(err) => failure("task_update", err),
    }
}

/// Deletes one task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> ActionResponse {
    let Some(id) = parse_id(&task_id) else {
        return ActionResponse::failure(format!("invalid task id: {task_id}"));
    };
    let result = with_dashboard(|dashboard| dashboard.delete_task(id));
    changed("task_delete", result, "Task deleted.", id)
}

/// Applies the task-list project filter (`All` or a project id).
///
/// Unknown values keep the current filter and return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn set_task_filter(selection: String) -> ActionResponse {
    match with_dashboard(|dashboard| Ok(dashboard.set_filter_selection(&selection))) {
        Ok(true) => ActionResponse::success("Filter applied.", None),
        Ok(false) => ActionResponse::failure(format!("unknown filter: {selection}")),
        Err(err) => ActionResponse::failure(format!("set_task_filter failed: {err}")),
    }
}

/// Applies the task-list sort key (`dueDate|status`).
///
/// Unknown keys keep the current sort and return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn set_task_sort(key: String) -> ActionResponse {
    match with_dashboard(|dashboard| Ok(dashboard.set_sort_key(&key))) {
        Ok(true) => ActionResponse::success("Sort applied.", None),
        Ok(false) => ActionResponse::failure(format!("unknown sort key: {key}")),
        Err(err) => ActionResponse::failure(format!("set_task_sort failed: {err}")),
    }
}

/// Switches the dashboard tab (`Projects|Tasks`, case-insensitive).
///
/// Unknown tabs keep the current tab and return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn set_active_tab(tab: String) -> ActionResponse {
    let Some(selected) = Tab::parse(&tab) else {
        return ActionResponse::failure(format!("unknown tab: {tab}"));
    };
    match with_dashboard(|dashboard| {
        dashboard.set_active_tab(selected);
        Ok(())
    }) {
        Ok(()) => ActionResponse::success("Tab selected.", None),
        Err(err) => failure("set_active_tab", err),
    }
}

/// Label of the active dashboard tab; empty when the session cannot open.
#[flutter_rust_bridge::frb(sync)]
pub fn active_tab() -> String {
    with_dashboard(|dashboard| Ok(dashboard.active_tab().label().to_string())).unwrap_or_default()
}

/// Lists project cards in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn project_cards() -> ProjectListResponse {
    match with_dashboard(|dashboard| dashboard.project_cards()) {
        Ok(cards) => ProjectListResponse {
            message: count_message(cards.len()),
            items: cards.into_iter().map(ProjectCardItem::from).collect(),
        },
        Err(err) => ProjectListResponse {
            items: Vec::new(),
            message: format!("project_cards failed: {err}"),
        },
    }
}

/// Lists task cards after the current filter and sort.
#[flutter_rust_bridge::frb(sync)]
pub fn task_cards() -> TaskListResponse {
    let result = with_dashboard(|dashboard| {
        Ok((
            dashboard.task_cards()?,
            dashboard.filter().selection_value(),
            dashboard.sort().key().to_string(),
        ))
    });
    match result {
        Ok((cards, filter, sort)) => TaskListResponse {
            message: count_message(cards.len()),
            items: cards.into_iter().map(TaskCardItem::from).collect(),
            filter,
            sort,
        },
        Err(err) => TaskListResponse {
            items: Vec::new(),
            message: format!("task_cards failed: {err}"),
            filter: String::new(),
            sort: String::new(),
        },
    }
}

/// Options for the project select of task dialogs.
#[flutter_rust_bridge::frb(sync)]
pub fn project_options() -> OptionListResponse {
    option_list("project_options", |dashboard| dashboard.project_options())
}

/// Options for the task-list filter select; `All Projects` comes first.
#[flutter_rust_bridge::frb(sync)]
pub fn filter_options() -> OptionListResponse {
    option_list("filter_options", |dashboard| dashboard.filter_options())
}

/// Options for the task status select.
#[flutter_rust_bridge::frb(sync)]
pub fn status_options() -> OptionListResponse {
    option_list("status_options", |dashboard| Ok(dashboard.status_options()))
}

impl From<ProjectCard> for ProjectCardItem {
    fn from(card: ProjectCard) -> Self {
        Self {
            project_id: card.project_id,
            name: card.name,
            description: card.description,
            task_count: card.task_count,
            completed_count: card.completed_count,
            progress: card.progress,
            created_label: card.created_label,
        }
    }
}

impl From<TaskCard> for TaskCardItem {
    fn from(card: TaskCard) -> Self {
        Self {
            task_id: card.task_id,
            title: card.title,
            description: card.description,
            project_name: card.project_name,
            status_label: card.status_label,
            badge: badge_label(card.badge).to_string(),
            due_label: card.due_label,
        }
    }
}

impl From<SelectOption> for SelectItem {
    fn from(option: SelectOption) -> Self {
        Self {
            value: option.value,
            label: option.label,
        }
    }
}

fn badge_label(badge: taskboard_core::BadgeVariant) -> &'static str {
    match badge {
        taskboard_core::BadgeVariant::Default => "default",
        taskboard_core::BadgeVariant::Warning => "warning",
        taskboard_core::BadgeVariant::Success => "success",
    }
}

fn lock_session() -> std::sync::MutexGuard<'static, Option<Dashboard>> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

fn with_dashboard<T>(
    f: impl FnOnce(&mut Dashboard) -> DashboardResult<T>,
) -> Result<T, String> {
    let mut session = lock_session();
    if session.is_none() {
        let dashboard =
            Dashboard::open_with_demo_data().map_err(|err| format!("session open failed: {err}"))?;
        *session = Some(dashboard);
    }
    match session.as_mut() {
        Some(dashboard) => f(dashboard).map_err(|err| err.to_string()),
        None => Err("session unavailable".to_string()),
    }
}

fn option_list(
    call: &'static str,
    f: impl FnOnce(&mut Dashboard) -> DashboardResult<Vec<SelectOption>>,
) -> OptionListResponse {
    match with_dashboard(f) {
        Ok(options) => OptionListResponse {
            message: count_message(options.len()),
            items: options.into_iter().map(SelectItem::from).collect(),
        },
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error call={call}");
            OptionListResponse {
                items: Vec::new(),
                message: format!("{call} failed: {err}"),
            }
        }
    }
}

fn changed(
    call: &'static str,
    result: Result<bool, String>,
    message: &str,
    id: Uuid,
) -> ActionResponse {
    match result {
        Ok(true) => ActionResponse::success(message, Some(id.to_string())),
        Ok(false) => ActionResponse::failure(format!("{call} ignored: {id} not found")),
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error call={call}");
            ActionResponse::failure(format!("{call} failed: {err}"))
        }
    }
}

fn failure(call: &'static str, err: impl std::fmt::Display) -> ActionResponse {
    warn!("event=ffi_call module=ffi status=error call={call}");
    ActionResponse::failure(format!("{call} failed: {err}"))
}

fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

fn parse_status(raw: &str) -> Result<TaskStatus, ActionResponse> {
    if raw.trim().is_empty() {
        return Ok(TaskStatus::default());
    }
    TaskStatus::parse(raw).ok_or_else(|| ActionResponse::failure(format!("unknown status: {raw}")))
}

fn parse_optional_date(raw: &str) -> Result<Option<i64>, ActionResponse> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date_input(raw)
        .map(Some)
        .map_err(|err| ActionResponse::failure(err.to_string()))
}

fn count_message(count: usize) -> String {
    if count == 0 {
        "No items.".to_string()
    } else {
        format!("Found {count} item(s).")
    }
}
