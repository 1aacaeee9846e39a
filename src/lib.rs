//! # Taskdesk - users, projects and tasks in one SQLite file
//!
//! A command-line task manager. Users are assigned tasks, tasks optionally
//! belong to projects, and projects report how much of their time window has
//! elapsed.
//!
//! ## Layers
//!
//! - [`libs`]: models with construction-time validation, typed ids, errors,
//!   configuration and console output
//! - [`db`]: the SQLite connection, schema migrations and one repository per table
//! - [`controllers`]: the entity API used by the front end
//! - [`commands`]: the clap front end
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdesk::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod controllers;
pub mod db;
pub mod libs;
