//! Shows or changes where the database lives.

use crate::libs::{config::Config, messages::Message};
use crate::{msg_print, msg_success};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Store the database at this path from now on
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,
}

pub fn cmd(args: ConfigArgs) -> Result<()> {
    let mut config = Config::read()?;

    if let Some(path) = args.db {
        config.set_db_path(path);
        config.save()?;
        msg_success!(Message::ConfigSaved);
    }

    msg_print!(Message::ConfigDbPath(config.db_path()?.display().to_string()));
    Ok(())
}
