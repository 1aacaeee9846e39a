//! User model.
//!
//! A user has a free-text username, a validated email and one of three roles.
//! The registration timestamp is set once at construction and never changes.

use super::error::ValidationError;
use super::formatter;
use super::id::UserId;
use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[\w.-]+@([\w-]+\.)+[\w-]{2,}$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Returns `true` when `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
        .is_match(email)
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Developer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Developer];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Developer => "developer",
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "developer" => Ok(Role::Developer),
            other => Err(ValidationError::InvalidRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Assigned by the store on insert.
    pub id: Option<UserId>,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub registration_date: NaiveDateTime,
}

impl User {
    /// Creates an unsaved user registered now.
    pub fn new(username: impl Into<String>, email: impl Into<String>, role: Role) -> Result<Self, ValidationError> {
        let email = email.into();
        check_email(&email)?;

        Ok(Self {
            id: None,
            username: username.into(),
            email,
            role,
            registration_date: formatter::now(),
        })
    }

    /// Changes only the given fields. Nothing is modified when validation fails.
    pub fn update_info(&mut self, username: Option<String>, email: Option<String>, role: Option<Role>) -> Result<(), ValidationError> {
        if let Some(email) = &email {
            check_email(email)?;
        }
        if let Some(username) = username {
            self.username = username;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(role) = role {
            self.role = role;
        }
        Ok(())
    }
}

/// Partial update for a stored user. Only the fields set here are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.role.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.email {
            Some(email) => check_email(email),
            None => Ok(()),
        }
    }

    /// Sets a field from its name and raw text, as typed in `field=value` form.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), ValidationError> {
        match field {
            "username" => self.username = Some(value.to_string()),
            "email" => {
                check_email(value)?;
                self.email = Some(value.to_string());
            }
            "role" => self.role = Some(value.parse()?),
            other => {
                return Err(ValidationError::UnknownField {
                    entity: "user",
                    field: other.to_string(),
                })
            }
        }
        Ok(())
    }

    pub fn apply(&self, user: &mut User) -> Result<(), ValidationError> {
        user.update_info(self.username.clone(), self.email.clone(), self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_email_shapes() {
        for email in ["ann@example.com", "a.b-c@mail.example.org", "dev_1@corp.io"] {
            assert!(is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "plain", "no-at.example.com", "a@b", "a@.com", "a@b.c", "a b@example.com"] {
            assert!(!is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn failed_update_leaves_user_untouched() {
        let mut user = User::new("ann", "ann@example.com", Role::Developer).unwrap();
        let err = user
            .update_info(Some("bob".into()), Some("broken".into()), Some(Role::Admin))
            .unwrap_err();

        assert_eq!(err.field(), "email");
        assert_eq!(user.username, "ann");
        assert_eq!(user.role, Role::Developer);
    }

    #[test]
    fn update_set_rejects_unknown_fields() {
        let mut update = UserUpdate::default();
        let err = update.set("registration_date", "2024-01-01").unwrap_err();
        assert!(matches!(err, ValidationError::UnknownField { .. }));
        assert!(update.is_empty());
    }
}
