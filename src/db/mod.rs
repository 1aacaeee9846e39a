//! SQLite persistence.
//!
//! One database file holds three tables, `users`, `projects` and `tasks`. Each
//! has a small repository type borrowing the [`db::Db`] connection and offering
//! insert, get, get-all, partial update and delete.
//!
//! ## Usage
//!
//! ```rust
//! use taskdesk::db::{db::Db, users::Users};
//! use taskdesk::libs::user::{Role, User};
//!
//! let db = Db::open_in_memory()?;
//! db.ensure_schema()?;
//!
//! let users = Users::new(&db);
//! let id = users.insert(&User::new("ann", "ann@example.com", Role::Developer)?)?;
//! assert!(users.get(id)?.is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Storage conventions
//!
//! - Timestamps are text in `YYYY-MM-DD HH:MM:SS` form.
//! - Enumerations are stored by their lowercase name (`in_progress`, `on_hold`).
//! - Task references to projects and users are nullable integers without
//!   foreign-key constraints.

pub(crate) mod columns;

/// Connection ownership and schema bootstrap.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Project rows.
pub mod projects;

/// Task rows, plus lookups by project, by assignee and by title.
pub mod tasks;

/// User rows.
pub mod users;
