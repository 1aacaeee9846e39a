//! Task model.
//!
//! A task always has a non-empty title, a priority of 1, 2 or 3 and a due
//! timestamp. Project and assignee references are optional and are not checked
//! against the other tables: deleting a project or a user leaves them dangling.

use super::error::ValidationError;
use super::formatter;
use super::id::{ProjectId, TaskId, UserId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority, one of 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Priority(u8);

impl Priority {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Priority {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1..=3 => Ok(Self(value as u8)),
            other => Err(ValidationError::InvalidPriority(other.to_string())),
        }
    }
}

impl From<Priority> for i64 {
    fn from(value: Priority) -> Self {
        i64::from(value.0)
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidPriority(s.to_string()))
            .and_then(Priority::try_from)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn check_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        Err(ValidationError::EmptyTitle)
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<TaskId>,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub due_date: NaiveDateTime,
    pub project_id: Option<ProjectId>,
    pub assignee_id: Option<UserId>,
}

impl Task {
    /// Creates an unsaved, pending task.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        priority: i64,
        due_date: NaiveDateTime,
        project_id: Option<ProjectId>,
        assignee_id: Option<UserId>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        check_title(&title)?;
        let priority = Priority::try_from(priority)?;

        Ok(Self {
            id: None,
            title,
            description,
            priority,
            status: TaskStatus::default(),
            due_date: formatter::truncate(due_date),
            project_id,
            assignee_id,
        })
    }

    /// Any status may follow any other.
    pub fn update_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// A completed task is never overdue; otherwise it is once `now` is past the due date.
    pub fn is_overdue_at(&self, now: NaiveDateTime) -> bool {
        self.status != TaskStatus::Completed && now > self.due_date
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(formatter::now())
    }
}

/// Partial update for a stored task.
///
/// Nullable columns use a nested `Option`: `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDateTime>,
    pub project_id: Option<Option<ProjectId>>,
    pub assignee_id: Option<Option<UserId>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.project_id.is_none()
            && self.assignee_id.is_none()
    }

    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        Ok(())
    }

    pub fn set(&mut self, field: &str, value: &str) -> Result<(), ValidationError> {
        match field {
            "title" => {
                check_title(value)?;
                self.title = Some(value.to_string());
            }
            "description" => self.description = Some(Some(value.to_string()).filter(|v| !v.is_empty())),
            "priority" => self.priority = Some(value.parse()?),
            "status" => self.status = Some(value.parse()?),
            "due_date" => self.due_date = Some(formatter::parse_date_input("due_date", value)?),
            "project_id" => self.project_id = Some(parse_reference("project_id", value)?),
            "assignee_id" => self.assignee_id = Some(parse_reference("assignee_id", value)?),
            other => {
                return Err(ValidationError::UnknownField {
                    entity: "task",
                    field: other.to_string(),
                })
            }
        }
        Ok(())
    }

    pub fn apply(&self, task: &mut Task) -> Result<(), ValidationError> {
        self.validate()?;

        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.update_status(status);
        }
        if let Some(due) = self.due_date {
            task.due_date = formatter::truncate(due);
        }
        if let Some(project_id) = self.project_id {
            task.project_id = project_id;
        }
        if let Some(assignee_id) = self.assignee_id {
            task.assignee_id = assignee_id;
        }
        Ok(())
    }
}

/// Empty text or `none` clears a reference.
fn parse_reference<T: FromStr>(field: &'static str, value: &str) -> Result<Option<T>, ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    value.parse::<T>().map(Some).map_err(|_| ValidationError::InvalidValue {
        field,
        value: value.to_string(),
    })
}
