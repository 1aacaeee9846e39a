use super::{contain, contain_flag, ControllerResult};
use crate::db::db::Db;
use crate::db::tasks::Tasks;
use crate::libs::error::StoreResult;
use crate::libs::formatter;
use crate::libs::id::{ProjectId, TaskId, UserId};
use crate::libs::task::{Task, TaskStatus, TaskUpdate};
use chrono::NaiveDateTime;

pub struct TaskController<'db> {
    tasks: Tasks<'db>,
}

impl<'db> TaskController<'db> {
    pub fn new(db: &'db Db) -> StoreResult<Self> {
        db.ensure_schema()?;
        Ok(Self { tasks: Tasks::new(db) })
    }

    /// Adds a pending task and returns it with its id.
    ///
    /// `Ok(None)` means the store rejected the insert.
    pub fn add_task(
        &self,
        title: &str,
        description: Option<&str>,
        priority: i64,
        due_date: NaiveDateTime,
        project_id: Option<ProjectId>,
        assignee_id: Option<UserId>,
    ) -> ControllerResult<Option<Task>> {
        let mut task = Task::new(title, description.map(str::to_string), priority, due_date, project_id, assignee_id)?;

        Ok(contain("add_task", self.tasks.insert(&task)).map(|id| {
            tracing::debug!(%id, title, "task added");
            task.id = Some(id);
            task
        }))
    }

    pub fn get_task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        self.tasks.get(id)
    }

    pub fn get_all_tasks(&self) -> StoreResult<Vec<Task>> {
        self.tasks.get_all()
    }

    pub fn update_task(&self, id: TaskId, update: &TaskUpdate) -> ControllerResult<bool> {
        update.validate()?;
        Ok(contain_flag("update_task", self.tasks.update(id, update)))
    }

    pub fn delete_task(&self, id: TaskId) -> bool {
        contain_flag("delete_task", self.tasks.delete(id))
    }

    /// Case-insensitive substring search over task titles.
    pub fn search_tasks(&self, query: &str) -> StoreResult<Vec<Task>> {
        self.tasks.search_title(query)
    }

    /// Any status may be set regardless of the current one.
    pub fn update_task_status(&self, id: TaskId, status: TaskStatus) -> bool {
        contain_flag("update_task_status", self.tasks.update(id, &TaskUpdate::status(status)))
    }

    pub fn get_overdue_tasks(&self) -> StoreResult<Vec<Task>> {
        let now = formatter::now();
        Ok(self.tasks.get_all()?.into_iter().filter(|task| task.is_overdue_at(now)).collect())
    }

    pub fn get_tasks_by_project(&self, project_id: ProjectId) -> StoreResult<Vec<Task>> {
        self.tasks.get_by_project(project_id)
    }

    pub fn get_tasks_by_user(&self, user_id: UserId) -> StoreResult<Vec<Task>> {
        self.tasks.get_by_assignee(user_id)
    }
}
