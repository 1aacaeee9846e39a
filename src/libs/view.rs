use super::formatter::{format_percent, format_timestamp};
use super::id::{ProjectId, UserId};
use super::project::Project;
use super::task::Task;
use super::user::User;
use prettytable::{row, Table};
use std::collections::HashMap;

/// Terminal tables for the list commands.
pub struct View {}

impl View {
    pub fn users(users: &[User]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "USERNAME", "EMAIL", "ROLE", "REGISTERED"]);
        for user in users {
            table.add_row(row![
                user.id.map(|id| id.to_string()).unwrap_or_default(),
                user.username,
                user.email,
                user.role,
                format_timestamp(&user.registration_date)
            ]);
        }
        table.printstd();
    }

    /// `progress` pairs each project with its elapsed-time percentage.
    pub fn projects(projects: &[(Project, f64)]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "DESCRIPTION", "START", "END", "STATUS", "PROGRESS"]);
        for (project, progress) in projects {
            table.add_row(row![
                project.id.map(|id| id.to_string()).unwrap_or_default(),
                project.name,
                project.description.as_deref().unwrap_or(""),
                format_timestamp(&project.start_date),
                format_timestamp(&project.end_date),
                project.status,
                format_percent(*progress)
            ]);
        }
        table.printstd();
    }

    /// Tasks with their project name and assignee username resolved.
    ///
    /// A reference to a removed project or user is shown as its raw id.
    pub fn tasks(tasks: &[Task], projects: &HashMap<ProjectId, String>, users: &HashMap<UserId, String>) {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "DESCRIPTION", "PRIORITY", "STATUS", "DUE", "PROJECT", "ASSIGNEE"]);
        for task in tasks {
            let project = task
                .project_id
                .map(|id| projects.get(&id).cloned().unwrap_or_else(|| format!("#{id}")))
                .unwrap_or_default();
            let assignee = task
                .assignee_id
                .map(|id| users.get(&id).cloned().unwrap_or_else(|| format!("#{id}")))
                .unwrap_or_default();

            table.add_row(row![
                task.id.map(|id| id.to_string()).unwrap_or_default(),
                task.title,
                task.description.as_deref().unwrap_or(""),
                task.priority,
                task.status,
                format_timestamp(&task.due_date),
                project,
                assignee
            ]);
        }
        table.printstd();
    }
}
