use super::{confirm, print_json, split_assignment};
use crate::controllers::{ProjectController, TaskController, UserController};
use crate::db::db::Db;
use crate::libs::formatter::{self, parse_date_input};
use crate::libs::id::{ProjectId, TaskId, UserId};
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskStatus, TaskUpdate};
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_success};
use anyhow::Result;
use chrono::Duration;
use clap::{Args, Subcommand};
use std::collections::HashMap;

/// Days until a new task is due when `--due` is omitted.
const DEFAULT_DUE_DAYS: i64 = 7;

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a new task
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// 1 (high), 2 (medium) or 3 (low)
        #[arg(short, long, default_value_t = 1)]
        priority: i64,
        /// Due date (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS), defaults to a week from now
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        project: Option<ProjectId>,
        #[arg(long)]
        assignee: Option<UserId>,
    },
    /// List all tasks
    List {
        #[arg(long)]
        json: bool,
    },
    /// Change fields of a task: title, description, priority, status, due_date, project_id, assignee_id
    Update {
        id: TaskId,
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        set: Vec<String>,
    },
    /// Set the status of a task (pending, in_progress, completed)
    Status { id: TaskId, status: String },
    /// Delete a task
    Delete {
        id: TaskId,
        #[arg(short, long)]
        yes: bool,
    },
    /// Find tasks whose title contains the query, ignoring case
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Show tasks past their due date that are not completed
    Overdue {
        #[arg(long)]
        json: bool,
    },
    /// Show the tasks of a project
    ByProject {
        id: ProjectId,
        #[arg(long)]
        json: bool,
    },
    /// Show the tasks assigned to a user
    ByUser {
        id: UserId,
        #[arg(long)]
        json: bool,
    },
}

pub fn cmd(db: &Db, args: TaskArgs) -> Result<()> {
    let tasks = TaskController::new(db)?;

    match args.command {
        TaskCommand::Add {
            title,
            description,
            priority,
            due,
            project,
            assignee,
        } => {
            let due = match due {
                Some(raw) => parse_date_input("due_date", &raw)?,
                None => formatter::now() + Duration::days(DEFAULT_DUE_DAYS),
            };

            match tasks.add_task(&title, description.as_deref(), priority, due, project, assignee)? {
                Some(task) => msg_success!(Message::TaskCreated(task.title, task.id.map(|id| id.get()).unwrap_or_default())),
                None => anyhow::bail!(Message::TaskCreateFailed),
            }
        }
        TaskCommand::List { json } => {
            let all = tasks.get_all_tasks()?;
            if json {
                return print_json(&all);
            }
            show_tasks(db, &all, Message::TasksHeader)?;
        }
        TaskCommand::Update { id, set } => {
            let mut update = TaskUpdate::default();
            for raw in &set {
                let (field, value) = split_assignment(raw)?;
                update.set(field, value)?;
            }
            if !tasks.update_task(id, &update)? {
                anyhow::bail!(Message::TaskUpdateFailed(id.get()));
            }
            msg_success!(Message::TaskUpdated(id.get()));
        }
        TaskCommand::Status { id, status } => {
            let status: TaskStatus = status.parse()?;
            if !tasks.update_task_status(id, status) {
                anyhow::bail!(Message::TaskUpdateFailed(id.get()));
            }
            msg_success!(Message::TaskStatusChanged(id.get(), status.to_string()));
        }
        TaskCommand::Delete { id, yes } => {
            let Some(task) = tasks.get_task(id)? else {
                anyhow::bail!(Message::TaskNotFound(id.get()));
            };
            if !confirm(yes, Message::ConfirmDeleteTask(task.title))? {
                return Ok(());
            }
            if !tasks.delete_task(id) {
                anyhow::bail!(Message::TaskNotFound(id.get()));
            }
            msg_success!(Message::TaskDeleted(id.get()));
        }
        TaskCommand::Search { query, json } => {
            let found = tasks.search_tasks(&query)?;
            if json {
                return print_json(&found);
            }
            show_tasks(db, &found, Message::SearchResultsHeader(query))?;
        }
        TaskCommand::Overdue { json } => {
            let overdue = tasks.get_overdue_tasks()?;
            if json {
                return print_json(&overdue);
            }
            if overdue.is_empty() {
                msg_info!(Message::NoOverdueTasks);
                return Ok(());
            }
            show_tasks(db, &overdue, Message::OverdueTasksHeader)?;
        }
        TaskCommand::ByProject { id, json } => {
            let found = tasks.get_tasks_by_project(id)?;
            if json {
                return print_json(&found);
            }
            show_tasks(db, &found, Message::TasksHeader)?;
        }
        TaskCommand::ByUser { id, json } => {
            let found = tasks.get_tasks_by_user(id)?;
            if json {
                return print_json(&found);
            }
            show_tasks(db, &found, Message::TasksHeader)?;
        }
    }

    Ok(())
}

/// Prints a task table with project and assignee names resolved.
pub(crate) fn show_tasks(db: &Db, tasks: &[Task], header: Message) -> Result<()> {
    if tasks.is_empty() {
        msg_info!(Message::TasksNotFound);
        return Ok(());
    }

    let projects: HashMap<ProjectId, String> = ProjectController::new(db)?
        .get_all_projects()?
        .into_iter()
        .filter_map(|project| project.id.map(|id| (id, project.name)))
        .collect();
    let users: HashMap<UserId, String> = UserController::new(db)?
        .get_all_users()?
        .into_iter()
        .filter_map(|user| user.id.map(|id| (id, user.username)))
        .collect();

    msg_print!(header, true);
    View::tasks(tasks, &projects, &users);
    Ok(())
}
