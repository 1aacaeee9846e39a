//! Project model and time-based progress.

use super::error::ValidationError;
use super::formatter;
use super::id::ProjectId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [ProjectStatus::Active, ProjectStatus::Completed, ProjectStatus::OnHold];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on_hold",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProjectStatus::Active),
            "completed" => Ok(ProjectStatus::Completed),
            "on_hold" => Ok(ProjectStatus::OnHold),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<ProjectId>,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub status: ProjectStatus,
}

impl Project {
    /// Creates an unsaved, active project.
    pub fn new(name: impl Into<String>, description: Option<String>, start_date: NaiveDateTime, end_date: NaiveDateTime) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            start_date: formatter::truncate(start_date),
            end_date: formatter::truncate(end_date),
            status: ProjectStatus::default(),
        }
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Any status may follow any other.
    pub fn update_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }

    /// Share of the project window elapsed at `now`, in percent, clamped to `[0, 100]`.
    ///
    /// A window whose end is not after its start counts as already finished.
    pub fn progress_at(&self, now: NaiveDateTime) -> f64 {
        let total = (self.end_date - self.start_date).num_seconds();
        if total <= 0 {
            return 100.0;
        }

        let elapsed = (now - self.start_date).num_seconds();
        (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn get_progress(&self) -> f64 {
        self.progress_at(formatter::now())
    }
}

/// Partial update for a stored project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub status: Option<ProjectStatus>,
}

impl ProjectUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.start_date.is_none() && self.end_date.is_none() && self.status.is_none()
    }

    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn set(&mut self, field: &str, value: &str) -> Result<(), ValidationError> {
        match field {
            "name" => self.name = Some(value.to_string()),
            "description" => self.description = Some(Some(value.to_string()).filter(|v| !v.is_empty())),
            "start_date" => self.start_date = Some(formatter::parse_date_input("start_date", value)?),
            "end_date" => self.end_date = Some(formatter::parse_date_input("end_date", value)?),
            "status" => self.status = Some(value.parse()?),
            other => {
                return Err(ValidationError::UnknownField {
                    entity: "project",
                    field: other.to_string(),
                })
            }
        }
        Ok(())
    }

    pub fn apply(&self, project: &mut Project) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(start) = self.start_date {
            project.start_date = formatter::truncate(start);
        }
        if let Some(end) = self.end_date {
            project.end_date = formatter::truncate(end);
        }
        if let Some(status) = self.status {
            project.update_status(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn progress_is_linear_inside_the_window() {
        let project = Project::new("p", None, at(1), at(11));
        assert_eq!(project.progress_at(at(6)), 50.0);
        assert!(project.progress_at(at(6) + Duration::hours(1)) > 50.0);
    }

    #[test]
    fn progress_is_clamped_outside_the_window() {
        let project = Project::new("p", None, at(10), at(20));
        assert_eq!(project.progress_at(at(1)), 0.0);
        assert_eq!(project.progress_at(at(25)), 100.0);
    }

    #[test]
    fn empty_or_inverted_window_counts_as_done() {
        assert_eq!(Project::new("p", None, at(5), at(5)).progress_at(at(1)), 100.0);
        assert_eq!(Project::new("p", None, at(9), at(3)).progress_at(at(1)), 100.0);
    }

    #[test]
    fn status_parses_only_known_values() {
        assert_eq!("on_hold".parse::<ProjectStatus>().unwrap(), ProjectStatus::OnHold);
        assert_eq!("paused".parse::<ProjectStatus>().unwrap_err().field(), "status");
    }
}
