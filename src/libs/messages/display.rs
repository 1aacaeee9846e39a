//! Human-readable text for every [`Message`].
//!
//! All user-facing wording lives in this one `match`, so the command handlers
//! only pick a variant and its parameters.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let s = match self {
            // === USER MESSAGES ===
            Message::UserCreated(name, id) => format!("User '{}' created with ID {}", name, id),
            Message::UserUpdated(id) => format!("User {} updated", id),
            Message::UserDeleted(id) => format!("User {} deleted", id),
            Message::UserNotFound(id) => format!("User with ID {} not found", id),
            Message::UserCreateFailed => "Failed to create user".to_string(),
            Message::UserUpdateFailed(id) => format!("Failed to update user {}", id),
            Message::UsersNotFound => "No users found".to_string(),
            Message::UsersHeader => "Users:".to_string(),
            Message::ConfirmDeleteUser(name) => format!("Delete user '{}'? Assigned tasks will keep the old assignee ID", name),

            // === PROJECT MESSAGES ===
            Message::ProjectCreated(name, id) => format!("Project '{}' created with ID {}", name, id),
            Message::ProjectUpdated(id) => format!("Project {} updated", id),
            Message::ProjectDeleted(id) => format!("Project {} deleted", id),
            Message::ProjectNotFound(id) => format!("Project with ID {} not found", id),
            Message::ProjectCreateFailed => "Failed to create project".to_string(),
            Message::ProjectUpdateFailed(id) => format!("Failed to update project {}", id),
            Message::ProjectStatusChanged(id, status) => format!("Project {} is now {}", id, status),
            Message::ProjectProgress(name, percent) => format!("Project '{}' progress: {}", name, percent),
            Message::ProjectsNotFound => "No projects found".to_string(),
            Message::ProjectsHeader => "Projects:".to_string(),
            Message::ConfirmDeleteProject(name) => format!("Delete project '{}'? Its tasks will keep the old project ID", name),

            // === TASK MESSAGES ===
            Message::TaskCreated(title, id) => format!("Task '{}' created with ID {}", title, id),
            Message::TaskUpdated(id) => format!("Task {} updated", id),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskNotFound(id) => format!("Task with ID {} not found", id),
            Message::TaskCreateFailed => "Failed to create task".to_string(),
            Message::TaskUpdateFailed(id) => format!("Failed to update task {}", id),
            Message::TaskStatusChanged(id, status) => format!("Task {} is now {}", id, status),
            Message::TasksNotFound => "No tasks found".to_string(),
            Message::TasksHeader => "Tasks:".to_string(),
            Message::OverdueTasksHeader => "Overdue tasks:".to_string(),
            Message::NoOverdueTasks => "No overdue tasks".to_string(),
            Message::SearchResultsHeader(query) => format!("Tasks matching '{}':", query),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDbPath(path) => format!("Database: {}", path),

            // === GENERIC MESSAGES ===
            Message::InvalidAssignment(raw) => format!("Expected field=value, got '{}'", raw),
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", s)
    }
}
