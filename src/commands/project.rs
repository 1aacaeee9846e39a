use super::{confirm, print_json, split_assignment};
use crate::controllers::ProjectController;
use crate::db::db::Db;
use crate::libs::formatter::{self, format_percent, parse_date_input};
use crate::libs::id::ProjectId;
use crate::libs::messages::Message;
use crate::libs::project::{ProjectStatus, ProjectUpdate};
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    /// Create a new project
    Add {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Start date (YYYY-MM-DD), defaults to now
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
    },
    /// List all projects with their progress
    List {
        #[arg(long)]
        json: bool,
    },
    /// Change fields of a project: name, description, start_date, end_date, status
    Update {
        id: ProjectId,
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        set: Vec<String>,
    },
    /// Set the status of a project (active, completed, on_hold)
    Status { id: ProjectId, status: String },
    /// Delete a project
    Delete {
        id: ProjectId,
        #[arg(short, long)]
        yes: bool,
    },
    /// Show how much of the project's time window has elapsed
    Progress { id: ProjectId },
}

pub fn cmd(db: &Db, args: ProjectArgs) -> Result<()> {
    let projects = ProjectController::new(db)?;

    match args.command {
        ProjectCommand::Add {
            name,
            description,
            start,
            end,
        } => {
            let start = match start {
                Some(raw) => parse_date_input("start_date", &raw)?,
                None => formatter::now(),
            };
            let end = parse_date_input("end_date", &end)?;

            match projects.add_project(&name, description.as_deref(), start, end) {
                Some(id) => msg_success!(Message::ProjectCreated(name, id.get())),
                None => anyhow::bail!(Message::ProjectCreateFailed),
            }
        }
        ProjectCommand::List { json } => {
            let all = projects.get_all_projects()?;
            if json {
                return print_json(&all);
            }
            if all.is_empty() {
                msg_info!(Message::ProjectsNotFound);
                return Ok(());
            }
            let rows: Vec<_> = all
                .into_iter()
                .map(|project| {
                    let progress = project.get_progress();
                    (project, progress)
                })
                .collect();
            msg_print!(Message::ProjectsHeader, true);
            View::projects(&rows);
        }
        ProjectCommand::Update { id, set } => {
            let mut update = ProjectUpdate::default();
            for raw in &set {
                let (field, value) = split_assignment(raw)?;
                update.set(field, value)?;
            }
            if !projects.update_project(id, &update) {
                anyhow::bail!(Message::ProjectUpdateFailed(id.get()));
            }
            msg_success!(Message::ProjectUpdated(id.get()));
        }
        ProjectCommand::Status { id, status } => {
            let status: ProjectStatus = status.parse()?;
            if !projects.update_project_status(id, status) {
                anyhow::bail!(Message::ProjectUpdateFailed(id.get()));
            }
            msg_success!(Message::ProjectStatusChanged(id.get(), status.to_string()));
        }
        ProjectCommand::Delete { id, yes } => {
            let Some(project) = projects.get_project(id)? else {
                anyhow::bail!(Message::ProjectNotFound(id.get()));
            };
            if !confirm(yes, Message::ConfirmDeleteProject(project.name))? {
                return Ok(());
            }
            if !projects.delete_project(id) {
                anyhow::bail!(Message::ProjectNotFound(id.get()));
            }
            msg_success!(Message::ProjectDeleted(id.get()));
        }
        ProjectCommand::Progress { id } => {
            let Some(project) = projects.get_project(id)? else {
                anyhow::bail!(Message::ProjectNotFound(id.get()));
            };
            let progress = format_percent(project.get_progress());
            msg_print!(Message::ProjectProgress(project.name, progress));
        }
    }

    Ok(())
}
