pub mod config;
pub mod project;
pub mod task;
pub mod user;

use crate::db::db::Db;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Manage users")]
    User(user::UserArgs),
    #[command(about = "Manage projects")]
    Project(project::ProjectArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Show or change where the database is stored")]
    Config(config::ConfigArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Database file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        Self::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let Cli { db, command } = self;
        match command {
            Commands::Config(args) => config::cmd(args),
            Commands::User(args) => with_db(db, |db| user::cmd(db, args)),
            Commands::Project(args) => with_db(db, |db| project::cmd(db, args)),
            Commands::Task(args) => with_db(db, |db| task::cmd(db, args)),
        }
    }
}

/// Opens the store for one command and closes it afterwards, even when the command fails.
///
/// A close error is reported only when the command itself succeeded.
fn with_db(path: Option<PathBuf>, f: impl FnOnce(&Db) -> Result<()>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::read()?.db_path()?,
    };
    let db = Db::open_with_schema(&path)?;

    let result = f(&db);
    let closed = db.close();
    result?;
    closed?;
    Ok(())
}

/// Splits a `field=value` argument.
pub(crate) fn split_assignment(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok((field.trim(), value)),
        _ => anyhow::bail!(Message::InvalidAssignment(raw.to_string())),
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    msg_print!(serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Asks before a destructive action unless `--yes` was given.
pub(crate) fn confirm(skip: bool, prompt: Message) -> Result<bool> {
    if skip {
        return Ok(true);
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(false)
        .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
    }
    Ok(confirmed)
}
