use super::columns::{self, update_statement, Assignment};
use super::db::Db;
use crate::libs::error::StoreResult;
use crate::libs::formatter;
use crate::libs::id::UserId;
use crate::libs::user::{User, UserUpdate};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const TABLE: &str = "users";
const INSERT_USER: &str = "INSERT INTO users (username, email, role, registration_date) VALUES (?1, ?2, ?3, ?4)";
const SELECT_USERS: &str = "SELECT id, username, email, role, registration_date FROM users";
const DELETE_USER: &str = "DELETE FROM users WHERE id = ?1";
const EXISTS_USER: &str = "SELECT 1 FROM users WHERE id = ?1";

/// Row-level access to the `users` table.
pub struct Users<'a> {
    conn: &'a Connection,
}

impl<'a> Users<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { conn: &db.conn }
    }

    pub fn insert(&self, user: &User) -> StoreResult<UserId> {
        self.conn.execute(
            INSERT_USER,
            params![
                user.username,
                user.email,
                user.role.as_str(),
                formatter::format_timestamp(&user.registration_date)
            ],
        )?;

        Ok(UserId(self.conn.last_insert_rowid()))
    }

    pub fn get(&self, id: UserId) -> StoreResult<Option<User>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_USERS} WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id])?;

        match rows.next()? {
            Some(row) => Ok(Some(parse_user_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn get_all(&self) -> StoreResult<Vec<User>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_USERS} ORDER BY id"))?;
        let mut rows = stmt.query([])?;

        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }
        Ok(users)
    }

    /// Writes the fields present in `update`. Returns `false` when no row has this id.
    pub fn update(&self, id: UserId, update: &UserUpdate) -> StoreResult<bool> {
        update.validate()?;

        let mut assignments = Vec::new();
        if let Some(username) = &update.username {
            assignments.push(Assignment::new("username", username.clone()));
        }
        if let Some(email) = &update.email {
            assignments.push(Assignment::new("email", email.clone()));
        }
        if let Some(role) = update.role {
            assignments.push(Assignment::new("role", role.as_str().to_string()));
        }

        if assignments.is_empty() {
            return self.exists(id);
        }

        let (sql, values) = update_statement(TABLE, assignments, id.get());
        let affected = self.conn.execute(&sql, params_from_iter(values))?;
        Ok(affected > 0)
    }

    /// Returns `false` when no row has this id.
    pub fn delete(&self, id: UserId) -> StoreResult<bool> {
        let affected = self.conn.execute(DELETE_USER, params![id])?;
        Ok(affected > 0)
    }

    pub fn exists(&self, id: UserId) -> StoreResult<bool> {
        let found: Option<i64> = self.conn.query_row(EXISTS_USER, params![id], |row| row.get(0)).optional()?;
        Ok(found.is_some())
    }
}

fn parse_user_row(row: &Row<'_>) -> StoreResult<User> {
    Ok(User {
        id: Some(row.get("id")?),
        username: row.get("username")?,
        email: row.get("email")?,
        role: columns::parsed(row, TABLE, "role")?,
        registration_date: columns::timestamp(row, TABLE, "registration_date")?,
    })
}
