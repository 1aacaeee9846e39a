use super::{confirm, print_json, split_assignment};
use crate::controllers::UserController;
use crate::db::db::Db;
use crate::libs::id::UserId;
use crate::libs::messages::Message;
use crate::libs::user::{Role, UserUpdate};
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// Register a new user
    Add {
        username: String,
        email: String,
        /// admin, manager or developer
        #[arg(short, long, default_value = "developer")]
        role: String,
    },
    /// List all users
    List {
        #[arg(long)]
        json: bool,
    },
    /// Change fields of a user: username, email, role
    Update {
        id: UserId,
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        set: Vec<String>,
    },
    /// Delete a user
    Delete {
        id: UserId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the tasks assigned to a user
    Tasks {
        id: UserId,
        #[arg(long)]
        json: bool,
    },
}

pub fn cmd(db: &Db, args: UserArgs) -> Result<()> {
    let users = UserController::new(db)?;

    match args.command {
        UserCommand::Add { username, email, role } => {
            let role: Role = role.parse()?;
            match users.add_user(&username, &email, role)? {
                Some(id) => msg_success!(Message::UserCreated(username, id.get())),
                None => anyhow::bail!(Message::UserCreateFailed),
            }
        }
        UserCommand::List { json } => {
            let all = users.get_all_users()?;
            if json {
                return print_json(&all);
            }
            if all.is_empty() {
                msg_info!(Message::UsersNotFound);
                return Ok(());
            }
            msg_print!(Message::UsersHeader, true);
            View::users(&all);
        }
        UserCommand::Update { id, set } => {
            let mut update = UserUpdate::default();
            for raw in &set {
                let (field, value) = split_assignment(raw)?;
                update.set(field, value)?;
            }
            if users.update_user(id, &update)? {
                msg_success!(Message::UserUpdated(id.get()));
            } else {
                anyhow::bail!(Message::UserUpdateFailed(id.get()));
            }
        }
        UserCommand::Delete { id, yes } => {
            let Some(user) = users.get_user(id)? else {
                anyhow::bail!(Message::UserNotFound(id.get()));
            };
            if !confirm(yes, Message::ConfirmDeleteUser(user.username))? {
                return Ok(());
            }
            if !users.delete_user(id) {
                anyhow::bail!(Message::UserNotFound(id.get()));
            }
            msg_success!(Message::UserDeleted(id.get()));
        }
        UserCommand::Tasks { id, json } => {
            if users.get_user(id)?.is_none() {
                anyhow::bail!(Message::UserNotFound(id.get()));
            }
            let tasks = users.get_user_tasks(id)?;
            if json {
                return print_json(&tasks);
            }
            super::task::show_tasks(db, &tasks, Message::TasksHeader)?;
        }
    }

    Ok(())
}
