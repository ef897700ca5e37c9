//! Terminal front-end for the Taskboard dashboard.
//!
//! # Responsibility
//! - Drive one in-memory dashboard session from a line-oriented shell.
//! - Render project and task cards as numbered plain-text lists.
//!
//! # Invariants
//! - `<n>` arguments refer to the 1-based position in the last rendered list.
//! - Dialog prompts keep the current draft value on an empty answer; a lone
//!   `-` clears a text field.

use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use taskboard_core::{
    Dashboard, DashboardError, LogConfig, ProjectId, Tab, TaskForm, TaskId, TaskStatus,
    ALL_PROJECTS,
};

#[derive(Parser, Debug)]
#[command(name = "taskboard", version, about = "Project and task dashboard")]
struct Args {
    /// Log level (trace|debug|info|warn|error); overrides TASKBOARD_LOG_LEVEL.
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; overrides TASKBOARD_LOG_DIR.
    /// Logging is off when neither is set.
    #[arg(long)]
    log_dir: Option<String>,
    /// Start without the demo projects and tasks.
    #[arg(long)]
    empty: bool,
}

/// One shell line.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// List project cards.
    Projects,
    /// List task cards with the current filter and sort.
    Tasks,
    /// Open the add-project dialog.
    AddProject,
    /// Edit the n-th listed project.
    EditProject { index: usize },
    /// Delete the n-th listed project and its tasks.
    DeleteProject { index: usize },
    /// Open the add-task dialog.
    AddTask,
    /// Edit the n-th listed task.
    EditTask { index: usize },
    /// Delete the n-th listed task.
    DeleteTask { index: usize },
    /// Filter tasks by project: `All` or the n-th listed project.
    Filter { selection: String },
    /// Sort tasks: `dueDate` or `status`.
    Sort { key: String },
    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

fn main() {
    let args = Args::parse();
    let config = log_config(&args);
    if let Err(err) = config.apply() {
        eprintln!("logging disabled: {err}");
    }

    let opened = if args.empty {
        Dashboard::open()
    } else {
        Dashboard::open_with_demo_data()
    };
    let dashboard = match opened {
        Ok(dashboard) => dashboard,
        Err(err) => {
            eprintln!("failed to open dashboard: {err}");
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(dashboard, stdin.lock(), stdout.lock());
    if let Err(err) = shell.run() {
        eprintln!("taskboard: {err}");
        std::process::exit(1);
    }
}

/// Environment settings with command-line flags taking precedence.
fn log_config(args: &Args) -> LogConfig {
    let mut config = LogConfig::from_env();
    if let Some(level) = &args.log_level {
        config.level = level.clone();
    }
    if let Some(log_dir) = &args.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    config
}

/// Answer that clears a text field instead of keeping it.
const CLEAR_ANSWER: &str = "-";

#[derive(Debug)]
enum ShellError {
    Io(io::Error),
    Dashboard(DashboardError),
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Dashboard(err) => write!(f, "{err}"),
        }
    }
}

impl From<io::Error> for ShellError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DashboardError> for ShellError {
    fn from(value: DashboardError) -> Self {
        Self::Dashboard(value)
    }
}

type ShellResult<T> = Result<T, ShellError>;

struct Shell<R, W> {
    dashboard: Dashboard,
    input: R,
    output: W,
    listed_projects: Vec<ProjectId>,
    listed_tasks: Vec<TaskId>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    fn new(dashboard: Dashboard, input: R, output: W) -> Self {
        Self {
            dashboard,
            input,
            output,
            listed_projects: Vec::new(),
            listed_tasks: Vec::new(),
        }
    }

    fn run(&mut self) -> ShellResult<()> {
        info!("event=shell_start module=cli status=ok");
        writeln!(
            self.output,
            "Taskboard. Type `help` for commands. In dialogs, Enter keeps a value and `{CLEAR_ANSWER}` clears it."
        )?;
        self.render_projects()?;

        loop {
            let Some(line) = self.read_line("> ")? else {
                break;
            };
            if line.is_empty() {
                continue;
            }

            let command = match Line::try_parse_from(line.split_whitespace()) {
                Ok(parsed) => parsed.command,
                Err(err) => {
                    write!(self.output, "{}", err.render())?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            self.execute(command)?;
        }

        info!("event=shell_stop module=cli status=ok");
        Ok(())
    }

    fn execute(&mut self, command: Command) -> ShellResult<()> {
        match command {
            Command::Projects => {
                self.dashboard.set_active_tab(Tab::Projects);
                self.render_projects()
            }
            Command::Tasks => {
                self.dashboard.set_active_tab(Tab::Tasks);
                self.render_tasks()
            }
            Command::AddProject => self.add_project(),
            Command::EditProject { index } => self.edit_project(index),
            Command::DeleteProject { index } => {
                let Some(project_id) = self.listed_project(index)? else {
                    return Ok(());
                };
                if self.dashboard.delete_project(project_id)? {
                    writeln!(self.output, "Project deleted.")?;
                }
                self.render_projects()
            }
            Command::AddTask => self.add_task(),
            Command::EditTask { index } => self.edit_task(index),
            Command::DeleteTask { index } => {
                let Some(task_id) = self.listed_task(index)? else {
                    return Ok(());
                };
                if self.dashboard.delete_task(task_id)? {
                    writeln!(self.output, "Task deleted.")?;
                }
                self.render_tasks()
            }
            Command::Filter { selection } => self.apply_filter(&selection),
            Command::Sort { key } => {
                if !self.dashboard.set_sort_key(&key) {
                    writeln!(self.output, "Unknown sort `{key}`; use dueDate or status.")?;
                    return Ok(());
                }
                self.render_tasks()
            }
            Command::Quit => Ok(()),
        }
    }

    fn render_projects(&mut self) -> ShellResult<()> {
        let cards = self.dashboard.project_cards()?;
        self.listed_projects = self
            .dashboard
            .projects()?
            .into_iter()
            .map(|project| project.project_id)
            .collect();

        writeln!(self.output, "== Projects ==")?;
        if cards.is_empty() {
            writeln!(self.output, "(no projects)")?;
        }
        for (position, card) in cards.iter().enumerate() {
            writeln!(
                self.output,
                "{:>2}. {}  [{}/{} done, {:.0}%]  created {}",
                position + 1,
                card.name,
                card.completed_count,
                card.task_count,
                card.progress * 100.0,
                card.created_label
            )?;
            if !card.description.is_empty() {
                writeln!(self.output, "    {}", card.description)?;
            }
        }
        Ok(())
    }

    fn render_tasks(&mut self) -> ShellResult<()> {
        let tasks = self.dashboard.visible_tasks()?;
        let cards = self.dashboard.task_cards()?;
        self.listed_tasks = tasks.iter().map(|task| task.task_id).collect();

        let filter = match self.dashboard.filter().selection_value() {
            value if value == ALL_PROJECTS => "All Projects".to_string(),
            value => self
                .dashboard
                .filter_options()?
                .into_iter()
                .find(|option| option.value == value)
                .map(|option| option.label)
                .unwrap_or(value),
        };
        writeln!(
            self.output,
            "== Tasks ({filter}, by {}) ==",
            self.dashboard.sort().label()
        )?;
        if cards.is_empty() {
            writeln!(self.output, "(no tasks)")?;
        }
        for (position, card) in cards.iter().enumerate() {
            writeln!(
                self.output,
                "{:>2}. {}  [{}]  {}  due {}",
                position + 1,
                card.title,
                card.status_label,
                card.project_name,
                card.due_label
            )?;
            if !card.description.is_empty() {
                writeln!(self.output, "    {}", card.description)?;
            }
        }
        Ok(())
    }

    fn add_project(&mut self) -> ShellResult<()> {
        let draft = self.dashboard.new_project_form().clone();
        let name = self.prompt("Name", &draft.name)?;
        let description = self.prompt("Description", &draft.description)?;
        {
            let form = self.dashboard.new_project_form_mut();
            form.name = name;
            form.description = description;
        }

        match self.dashboard.submit_new_project()? {
            Some(_) => writeln!(self.output, "Project created.")?,
            None => writeln!(self.output, "Project not created: name is required.")?,
        }
        self.render_projects()
    }

    fn edit_project(&mut self, index: usize) -> ShellResult<()> {
        let Some(project_id) = self.listed_project(index)? else {
            return Ok(());
        };
        if !self.dashboard.begin_edit_project(project_id)? {
            writeln!(self.output, "Project no longer exists.")?;
            return Ok(());
        }
        let Some(draft) = self.dashboard.editing_project().map(|edit| edit.form.clone()) else {
            return Ok(());
        };

        let name = self.prompt("Name", &draft.name)?;
        let description = self.prompt("Description", &draft.description)?;
        if let Some(edit) = self.dashboard.editing_project_mut() {
            edit.form.name = name;
            edit.form.description = description;
        }

        if self.dashboard.save_project_edit()? {
            writeln!(self.output, "Project saved.")?;
        }
        self.render_projects()
    }

    fn add_task(&mut self) -> ShellResult<()> {
        let draft = self.dashboard.new_task_form().clone();
        let form = self.prompt_task_form(draft)?;
        *self.dashboard.new_task_form_mut() = form;

        match self.dashboard.submit_new_task()? {
            Some(_) => writeln!(self.output, "Task created.")?,
            None => writeln!(
                self.output,
                "Task not created: title and project are required."
            )?,
        }
        self.render_tasks()
    }

    fn edit_task(&mut self, index: usize) -> ShellResult<()> {
        let Some(task_id) = self.listed_task(index)? else {
            return Ok(());
        };
        if !self.dashboard.begin_edit_task(task_id)? {
            writeln!(self.output, "Task no longer exists.")?;
            return Ok(());
        }
        let Some(draft) = self.dashboard.editing_task().map(|edit| edit.form.clone()) else {
            return Ok(());
        };

        let form = self.prompt_task_form(draft)?;
        if let Some(edit) = self.dashboard.editing_task_mut() {
            edit.form = form;
        }

        if self.dashboard.save_task_edit()? {
            writeln!(self.output, "Task saved.")?;
        }
        self.render_tasks()
    }

    fn prompt_task_form(&mut self, mut form: TaskForm) -> ShellResult<TaskForm> {
        form.title = self.prompt("Title", &form.title)?;
        form.description = self.prompt("Description", &form.description)?;

        let options = self.dashboard.project_options()?;
        for (position, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {}", position + 1, option.label)?;
        }
        let current = form
            .project_id
            .and_then(|id| {
                options
                    .iter()
                    .position(|option| option.value == id.to_string())
            })
            .map(|position| (position + 1).to_string())
            .unwrap_or_default();
        let answer = self.prompt("Project #", &current)?;
        if answer != current {
            match answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|position| options.get(position))
                .and_then(|option| ProjectId::parse_str(&option.value).ok())
            {
                Some(project_id) => form.project_id = Some(project_id),
                None => writeln!(self.output, "Unknown project `{answer}`; keeping current.")?,
            }
        }

        let statuses = TaskStatus::ALL
            .iter()
            .map(|status| status.label())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(self.output, "  statuses: {statuses}")?;
        let answer = self.prompt("Status", form.status.label())?;
        match TaskStatus::parse(&answer) {
            Some(status) => form.status = status,
            None => writeln!(self.output, "Unknown status `{answer}`; keeping current.")?,
        }

        let current = form.due_date_input();
        let answer = self.prompt("Due date (YYYY-MM-DD)", &current)?;
        if !form.set_due_date_input(&answer) {
            writeln!(self.output, "Invalid date `{answer}`; keeping current.")?;
        }
        Ok(form)
    }

    fn apply_filter(&mut self, selection: &str) -> ShellResult<()> {
        let value = if selection.eq_ignore_ascii_case(ALL_PROJECTS) {
            ALL_PROJECTS.to_string()
        } else {
            match self.listed_project(selection.parse().unwrap_or(0))? {
                Some(project_id) => project_id.to_string(),
                None => return Ok(()),
            }
        };
        if !self.dashboard.set_filter_selection(&value) {
            warn!("event=shell_filter module=cli status=rejected");
            return Ok(());
        }
        self.render_tasks()
    }

    fn listed_project(&mut self, index: usize) -> ShellResult<Option<ProjectId>> {
        let found = index
            .checked_sub(1)
            .and_then(|position| self.listed_projects.get(position))
            .copied();
        if found.is_none() {
            writeln!(self.output, "No project #{index} in the last project list.")?;
        }
        Ok(found)
    }

    fn listed_task(&mut self, index: usize) -> ShellResult<Option<TaskId>> {
        let found = index
            .checked_sub(1)
            .and_then(|position| self.listed_tasks.get(position))
            .copied();
        if found.is_none() {
            writeln!(self.output, "No task #{index} in the last task list.")?;
        }
        Ok(found)
    }

    /// Prompts for one field; an empty answer returns `current` and
    /// [`CLEAR_ANSWER`] returns an empty string.
    fn prompt(&mut self, label: &str, current: &str) -> ShellResult<String> {
        let shown = if current.is_empty() {
            format!("{label}: ")
        } else {
            format!("{label} [{current}]: ")
        };
        match self.read_line(&shown)? {
            Some(answer) if answer == CLEAR_ANSWER => Ok(String::new()),
            Some(answer) if !answer.is_empty() => Ok(answer),
            _ => Ok(current.to_string()),
        }
    }

    fn read_line(&mut self, prompt: &str) -> ShellResult<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(buffer.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{log_config, Args, Command, Line, Shell};
    use clap::Parser;
    use std::io::Cursor;
    use taskboard_core::{Dashboard, Tab};

    fn run_script(dashboard: Dashboard, script: &str) -> (Dashboard, String) {
        let mut output = Vec::new();
        let mut shell = Shell::new(dashboard, Cursor::new(script.to_string()), &mut output);
        shell.run().unwrap();
        let Shell { dashboard, .. } = shell;
        (dashboard, String::from_utf8(output).unwrap())
    }

    #[test]
    fn parses_commands_with_arguments() {
        let line = Line::try_parse_from(["edit-project", "2"]).unwrap();
        assert_eq!(line.command, Command::EditProject { index: 2 });

        let line = Line::try_parse_from(["sort", "status"]).unwrap();
        assert_eq!(
            line.command,
            Command::Sort {
                key: "status".to_string()
            }
        );

        assert!(Line::try_parse_from(["delete-task", "x"]).is_err());
        assert!(Line::try_parse_from(["launch"]).is_err());
    }

    #[test]
    fn log_flags_override_environment_settings() {
        let args = Args::try_parse_from([
            "taskboard",
            "--log-level",
            "warn",
            "--log-dir",
            "/tmp/taskboard-logs",
            "--empty",
        ])
        .unwrap();
        let config = log_config(&args);
        assert_eq!(config.level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/taskboard-logs"));
        assert!(args.empty);
    }

    #[test]
    fn dash_answer_clears_description_on_edit() {
        let (dashboard, output) = run_script(
            Dashboard::open_with_demo_data().unwrap(),
            "edit-project 1\n\n-\nquit\n",
        );
        assert!(output.contains("Project saved."));
        let project = &dashboard.projects().unwrap()[0];
        assert_eq!(project.name, "Website Redesign");
        assert_eq!(project.description, "");
    }

    #[test]
    fn tab_commands_switch_active_tab() {
        let (dashboard, _) = run_script(Dashboard::open().unwrap(), "tasks\nquit\n");
        assert_eq!(dashboard.active_tab(), Tab::Tasks);
        let (dashboard, _) = run_script(Dashboard::open().unwrap(), "tasks\nprojects\nquit\n");
        assert_eq!(dashboard.active_tab(), Tab::Projects);
    }

    #[test]
    fn demo_session_lists_seed_projects() {
        let (_, output) = run_script(Dashboard::open_with_demo_data().unwrap(), "quit\n");
        assert!(output.contains(" 1. Website Redesign"));
        assert!(output.contains(" 3. Marketing Campaign"));
    }

    #[test]
    fn add_project_prompts_and_creates() {
        let (dashboard, output) = run_script(
            Dashboard::open().unwrap(),
            "add-project\nLaunch\nQ3 launch\nquit\n",
        );
        assert!(output.contains("Project created."));
        let projects = dashboard.projects().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Launch");
        assert_eq!(projects[0].description, "Q3 launch");
    }

    #[test]
    fn blank_project_name_is_ignored() {
        let (dashboard, output) =
            run_script(Dashboard::open().unwrap(), "add-project\n\n\nquit\n");
        assert!(output.contains("name is required"));
        assert!(dashboard.projects().unwrap().is_empty());
    }

    #[test]
    fn add_task_then_edit_keeps_unanswered_fields() {
        let script = "add-project\nApp\n\n\
                      add-task\nShip it\nnotes\n1\nIn Progress\n2023-04-30\n\
                      edit-task 1\n\n\n\ncompleted\n\n\
                      quit\n";
        let (dashboard, output) = run_script(Dashboard::open().unwrap(), script);
        assert!(output.contains("Task created."));
        assert!(output.contains("Task saved."));

        let tasks = dashboard.tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Ship it");
        assert_eq!(tasks[0].description, "notes");
        assert_eq!(tasks[0].project_name, "App");
        assert_eq!(tasks[0].status.label(), "Completed");
        assert!(output.contains("due 4/30/2023"));
    }

    #[test]
    fn delete_project_by_position_cascades() {
        let (dashboard, output) = run_script(
            Dashboard::open_with_demo_data().unwrap(),
            "delete-project 1\ndelete-project 9\nquit\n",
        );
        assert!(output.contains("Project deleted."));
        assert!(output.contains("No project #9"));
        assert_eq!(dashboard.projects().unwrap().len(), 2);
        assert_eq!(dashboard.tasks().unwrap().len(), 2);
    }

    #[test]
    fn filter_and_sort_commands_update_view() {
        let (dashboard, output) = run_script(
            Dashboard::open_with_demo_data().unwrap(),
            "filter 2\nsort status\nsort priority\nquit\n",
        );
        assert!(output.contains("== Tasks (Mobile App Development, by Due Date) =="));
        assert!(output.contains("by Status"));
        assert!(output.contains("Unknown sort `priority`"));
        assert_eq!(dashboard.visible_tasks().unwrap().len(), 1);
    }
}
