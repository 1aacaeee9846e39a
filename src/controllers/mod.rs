//! Controllers: the API the front end talks to.
//!
//! One controller per entity, each borrowing the same [`Db`](crate::db::db::Db).
//! Error shaping follows one rule set:
//!
//! - model validation errors are returned to the caller as `Err(ValidationError)`,
//! - storage errors on writes are logged and reported as `None` / `false`,
//! - reads return `Ok(None)` or an empty list when nothing matches and
//!   `Err(StoreError)` when stored data cannot be decoded.
//!
//! ```rust
//! use taskdesk::controllers::{ProjectController, TaskController};
//! use taskdesk::db::db::Db;
//! use chrono::{Duration, Local};
//!
//! let db = Db::open_in_memory()?;
//! let projects = ProjectController::new(&db)?;
//! let tasks = TaskController::new(&db)?;
//!
//! let now = Local::now().naive_local();
//! let project = projects.add_project("Launch", None, now, now + Duration::days(10)).unwrap();
//! tasks.add_task("Write notes", None, 1, now + Duration::days(1), Some(project), None)?;
//! assert_eq!(tasks.get_tasks_by_project(project)?.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod project;
pub mod task;
pub mod user;

pub use project::ProjectController;
pub use task::TaskController;
pub use user::UserController;

use crate::libs::error::{StoreResult, ValidationError};

/// Result of a controller write: validation errors are the only `Err`.
pub type ControllerResult<T> = Result<T, ValidationError>;

/// Turns a storage failure into an absent value, logging it.
fn contain<T>(operation: &'static str, result: StoreResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(operation, error = %err, "storage operation failed");
            None
        }
    }
}

/// Same as [`contain`] for operations whose success is a row-matched flag.
fn contain_flag(operation: &'static str, result: StoreResult<bool>) -> bool {
    contain(operation, result).unwrap_or(false)
}
