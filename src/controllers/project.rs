use super::{contain, contain_flag};
use crate::db::db::Db;
use crate::db::projects::Projects;
use crate::libs::error::StoreResult;
use crate::libs::id::ProjectId;
use crate::libs::project::{Project, ProjectStatus, ProjectUpdate};
use chrono::NaiveDateTime;

pub struct ProjectController<'db> {
    projects: Projects<'db>,
}

impl<'db> ProjectController<'db> {
    pub fn new(db: &'db Db) -> StoreResult<Self> {
        db.ensure_schema()?;
        Ok(Self {
            projects: Projects::new(db),
        })
    }

    /// Adds an active project. `None` means the store rejected the insert.
    pub fn add_project(&self, name: &str, description: Option<&str>, start_date: NaiveDateTime, end_date: NaiveDateTime) -> Option<ProjectId> {
        let project = Project::new(name, description.map(str::to_string), start_date, end_date);
        let id = contain("add_project", self.projects.insert(&project));
        if let Some(id) = id {
            tracing::debug!(%id, name, "project added");
        }
        id
    }

    pub fn get_project(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        self.projects.get(id)
    }

    pub fn get_all_projects(&self) -> StoreResult<Vec<Project>> {
        self.projects.get_all()
    }

    pub fn update_project(&self, id: ProjectId, update: &ProjectUpdate) -> bool {
        contain_flag("update_project", self.projects.update(id, update))
    }

    /// Tasks of the project are kept and keep pointing at the removed id.
    pub fn delete_project(&self, id: ProjectId) -> bool {
        contain_flag("delete_project", self.projects.delete(id))
    }

    pub fn update_project_status(&self, id: ProjectId, status: ProjectStatus) -> bool {
        self.update_project(id, &ProjectUpdate::status(status))
    }

    /// Time-based progress of the project in percent, `None` for an unknown id.
    pub fn get_project_progress(&self, id: ProjectId) -> StoreResult<Option<f64>> {
        Ok(self.projects.get(id)?.map(|project| project.get_progress()))
    }
}
