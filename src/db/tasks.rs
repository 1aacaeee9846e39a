use super::columns::{self, update_statement, Assignment};
use super::db::Db;
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::formatter;
use crate::libs::id::{ProjectId, TaskId, UserId};
use crate::libs::task::{Priority, Task, TaskUpdate};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};

const TABLE: &str = "tasks";
const INSERT_TASK: &str = "INSERT INTO tasks (title, description, priority, status, due_date, project_id, assignee_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_TASKS: &str = "SELECT id, title, description, priority, status, due_date, project_id, assignee_id FROM tasks";
const WHERE_ID: &str = "WHERE id = ?1";
const WHERE_PROJECT: &str = "WHERE project_id = ?1";
const WHERE_ASSIGNEE: &str = "WHERE assignee_id = ?1";
const ORDER_BY_ID: &str = "ORDER BY id";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const EXISTS_TASK: &str = "SELECT 1 FROM tasks WHERE id = ?1";

/// Row-level access to the `tasks` table.
pub struct Tasks<'a> {
    conn: &'a Connection,
}

impl<'a> Tasks<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { conn: &db.conn }
    }

    pub fn insert(&self, task: &Task) -> StoreResult<TaskId> {
        self.conn.execute(
            INSERT_TASK,
            params![
                task.title,
                task.description,
                i64::from(task.priority),
                task.status.as_str(),
                formatter::format_timestamp(&task.due_date),
                task.project_id,
                task.assignee_id
            ],
        )?;

        Ok(TaskId(self.conn.last_insert_rowid()))
    }

    pub fn get(&self, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self.fetch(WHERE_ID, &[&id])?.into_iter().next())
    }

    pub fn get_all(&self) -> StoreResult<Vec<Task>> {
        self.fetch("", &[])
    }

    /// Tasks referencing `project_id`, through `idx_tasks_project_id`.
    pub fn get_by_project(&self, project_id: ProjectId) -> StoreResult<Vec<Task>> {
        self.fetch(WHERE_PROJECT, &[&project_id])
    }

    /// Tasks assigned to `user_id`, through `idx_tasks_assignee_id`.
    pub fn get_by_assignee(&self, user_id: UserId) -> StoreResult<Vec<Task>> {
        self.fetch(WHERE_ASSIGNEE, &[&user_id])
    }

    /// Case-insensitive substring match on the title only.
    ///
    /// Folding is done with Unicode lowercase in Rust; SQLite `LIKE` only folds
    /// ASCII letters.
    pub fn search_title(&self, query: &str) -> StoreResult<Vec<Task>> {
        let needle = query.to_lowercase();
        let tasks = self.get_all()?;

        Ok(tasks.into_iter().filter(|task| task.title.to_lowercase().contains(&needle)).collect())
    }

    /// Writes the fields present in `update`. Returns `false` when no row has this id.
    pub fn update(&self, id: TaskId, update: &TaskUpdate) -> StoreResult<bool> {
        update.validate()?;

        let mut assignments = Vec::new();
        if let Some(title) = &update.title {
            assignments.push(Assignment::new("title", title.clone()));
        }
        if let Some(description) = &update.description {
            assignments.push(Assignment::text("description", description.as_deref()));
        }
        if let Some(priority) = update.priority {
            assignments.push(Assignment::new("priority", i64::from(priority)));
        }
        if let Some(status) = update.status {
            assignments.push(Assignment::new("status", status.as_str().to_string()));
        }
        if let Some(due) = &update.due_date {
            assignments.push(Assignment::timestamp("due_date", due));
        }
        if let Some(project_id) = update.project_id {
            assignments.push(Assignment::id("project_id", project_id.map(ProjectId::get)));
        }
        if let Some(assignee_id) = update.assignee_id {
            assignments.push(Assignment::id("assignee_id", assignee_id.map(UserId::get)));
        }

        if assignments.is_empty() {
            return self.exists(id);
        }

        let (sql, values) = update_statement(TABLE, assignments, id.get());
        let affected = self.conn.execute(&sql, params_from_iter(values))?;
        Ok(affected > 0)
    }

    pub fn delete(&self, id: TaskId) -> StoreResult<bool> {
        let affected = self.conn.execute(DELETE_TASK, params![id])?;
        Ok(affected > 0)
    }

    pub fn exists(&self, id: TaskId) -> StoreResult<bool> {
        let found: Option<i64> = self.conn.query_row(EXISTS_TASK, params![id], |row| row.get(0)).optional()?;
        Ok(found.is_some())
    }

    fn fetch(&self, filter: &str, params: &[&dyn ToSql]) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_TASKS} {filter} {ORDER_BY_ID}"))?;
        let mut rows = stmt.query(params)?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let raw_priority: i64 = row.get("priority")?;
    let priority = Priority::try_from(raw_priority).map_err(|err| StoreError::InvalidData {
        table: TABLE,
        column: "priority",
        message: err.to_string(),
    })?;

    Ok(Task {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        description: row.get("description")?,
        priority,
        status: columns::parsed(row, TABLE, "status")?,
        due_date: columns::timestamp(row, TABLE, "due_date")?,
        project_id: row.get("project_id")?,
        assignee_id: row.get("assignee_id")?,
    })
}
