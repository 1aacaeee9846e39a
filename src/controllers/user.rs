use super::{contain, contain_flag, ControllerResult};
use crate::db::db::Db;
use crate::db::tasks::Tasks;
use crate::db::users::Users;
use crate::libs::error::StoreResult;
use crate::libs::id::UserId;
use crate::libs::task::Task;
use crate::libs::user::{Role, User, UserUpdate};

pub struct UserController<'db> {
    users: Users<'db>,
    tasks: Tasks<'db>,
}

impl<'db> UserController<'db> {
    pub fn new(db: &'db Db) -> StoreResult<Self> {
        db.ensure_schema()?;
        Ok(Self {
            users: Users::new(db),
            tasks: Tasks::new(db),
        })
    }

    /// Registers a user now. `Ok(None)` means the store rejected the insert.
    pub fn add_user(&self, username: &str, email: &str, role: Role) -> ControllerResult<Option<UserId>> {
        let user = User::new(username, email, role)?;
        let id = contain("add_user", self.users.insert(&user));
        if let Some(id) = id {
            tracing::debug!(%id, username, "user added");
        }
        Ok(id)
    }

    pub fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        self.users.get(id)
    }

    pub fn get_all_users(&self) -> StoreResult<Vec<User>> {
        self.users.get_all()
    }

    /// Returns `Ok(false)` when the user does not exist or the store failed.
    pub fn update_user(&self, id: UserId, update: &UserUpdate) -> ControllerResult<bool> {
        update.validate()?;
        Ok(contain_flag("update_user", self.users.update(id, update)))
    }

    /// Tasks assigned to the user are kept and keep pointing at the removed id.
    pub fn delete_user(&self, id: UserId) -> bool {
        contain_flag("delete_user", self.users.delete(id))
    }

    pub fn get_user_tasks(&self, id: UserId) -> StoreResult<Vec<Task>> {
        self.tasks.get_by_assignee(id)
    }
}
