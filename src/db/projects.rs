use super::columns::{self, update_statement, Assignment};
use super::db::Db;
use crate::libs::error::StoreResult;
use crate::libs::formatter;
use crate::libs::id::ProjectId;
use crate::libs::project::{Project, ProjectUpdate};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const TABLE: &str = "projects";
const INSERT_PROJECT: &str = "INSERT INTO projects (name, description, start_date, end_date, status) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_PROJECTS: &str = "SELECT id, name, description, start_date, end_date, status FROM projects";
const DELETE_PROJECT: &str = "DELETE FROM projects WHERE id = ?1";
const EXISTS_PROJECT: &str = "SELECT 1 FROM projects WHERE id = ?1";

/// Row-level access to the `projects` table.
pub struct Projects<'a> {
    conn: &'a Connection,
}

impl<'a> Projects<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { conn: &db.conn }
    }

    pub fn insert(&self, project: &Project) -> StoreResult<ProjectId> {
        self.conn.execute(
            INSERT_PROJECT,
            params![
                project.name,
                project.description,
                formatter::format_timestamp(&project.start_date),
                formatter::format_timestamp(&project.end_date),
                project.status.as_str()
            ],
        )?;

        Ok(ProjectId(self.conn.last_insert_rowid()))
    }

    pub fn get(&self, id: ProjectId) -> StoreResult<Option<Project>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_PROJECTS} WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id])?;

        match rows.next()? {
            Some(row) => Ok(Some(parse_project_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn get_all(&self) -> StoreResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_PROJECTS} ORDER BY id"))?;
        let mut rows = stmt.query([])?;

        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    pub fn update(&self, id: ProjectId, update: &ProjectUpdate) -> StoreResult<bool> {
        let mut assignments = Vec::new();
        if let Some(name) = &update.name {
            assignments.push(Assignment::new("name", name.clone()));
        }
        if let Some(description) = &update.description {
            assignments.push(Assignment::text("description", description.as_deref()));
        }
        if let Some(start) = &update.start_date {
            assignments.push(Assignment::timestamp("start_date", start));
        }
        if let Some(end) = &update.end_date {
            assignments.push(Assignment::timestamp("end_date", end));
        }
        if let Some(status) = update.status {
            assignments.push(Assignment::new("status", status.as_str().to_string()));
        }

        if assignments.is_empty() {
            return self.exists(id);
        }

        let (sql, values) = update_statement(TABLE, assignments, id.get());
        let affected = self.conn.execute(&sql, params_from_iter(values))?;
        Ok(affected > 0)
    }

    pub fn delete(&self, id: ProjectId) -> StoreResult<bool> {
        let affected = self.conn.execute(DELETE_PROJECT, params![id])?;
        Ok(affected > 0)
    }

    pub fn exists(&self, id: ProjectId) -> StoreResult<bool> {
        let found: Option<i64> = self.conn.query_row(EXISTS_PROJECT, params![id], |row| row.get(0)).optional()?;
        Ok(found.is_some())
    }
}

fn parse_project_row(row: &Row<'_>) -> StoreResult<Project> {
    Ok(Project {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        description: row.get("description")?,
        start_date: columns::timestamp(row, TABLE, "start_date")?,
        end_date: columns::timestamp(row, TABLE, "end_date")?,
        status: columns::parsed(row, TABLE, "status")?,
    })
}
