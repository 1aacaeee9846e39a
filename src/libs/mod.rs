//! Models and supporting utilities.
//!
//! - **Models**: [`user`], [`project`], [`task`] with construction-time validation
//! - **Identifiers**: typed row ids in [`id`]
//! - **Errors**: the validation/storage taxonomy in [`error`]
//! - **Infrastructure**: configuration, data directory, timestamp formatting
//! - **Presentation**: console messages and tables
//!
//! ## Usage
//!
//! ```rust
//! use taskdesk::libs::task::{Task, TaskStatus};
//! use chrono::{Duration, Local};
//!
//! let due = Local::now().naive_local() - Duration::days(1);
//! let mut task = Task::new("Ship release", None, 1, due, None, None)?;
//! assert!(task.is_overdue());
//! task.update_status(TaskStatus::Completed);
//! assert!(!task.is_overdue());
//! # Ok::<(), taskdesk::libs::error::ValidationError>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod id;
pub mod messages;
pub mod project;
pub mod task;
pub mod user;
pub mod view;
