//! Column decoding shared by the entity repositories.
//!
//! Every value read back is checked: a timestamp that does not match the storage
//! layout or an enum value outside its set is reported as corruption instead of
//! being replaced by a default.

use crate::libs::error::{StoreError, StoreResult};
use crate::libs::formatter;
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::Row;
use std::str::FromStr;

pub(crate) fn timestamp(row: &Row<'_>, table: &'static str, column: &'static str) -> StoreResult<NaiveDateTime> {
    let text: String = row.get(column)?;
    formatter::parse_timestamp(&text).map_err(|_| StoreError::MalformedTimestamp { table, column, value: text })
}

pub(crate) fn parsed<T: FromStr>(row: &Row<'_>, table: &'static str, column: &'static str) -> StoreResult<T> {
    let text: String = row.get(column)?;
    text.parse::<T>().map_err(|_| StoreError::InvalidData {
        table,
        column,
        message: format!("unexpected value `{text}`"),
    })
}

/// One `column = ?` assignment of an UPDATE statement.
///
/// Column names are `'static` so only names written in this crate can reach SQL.
pub(crate) struct Assignment {
    pub column: &'static str,
    pub value: Value,
}

impl Assignment {
    pub fn new(column: &'static str, value: impl Into<Value>) -> Self {
        Self { column, value: value.into() }
    }

    pub fn text(column: &'static str, value: Option<&str>) -> Self {
        Self::new(column, value.map(|v| Value::Text(v.to_string())).unwrap_or(Value::Null))
    }

    pub fn timestamp(column: &'static str, value: &NaiveDateTime) -> Self {
        Self::new(column, formatter::format_timestamp(value))
    }

    pub fn id(column: &'static str, value: Option<i64>) -> Self {
        Self::new(column, value.map(Value::Integer).unwrap_or(Value::Null))
    }
}

/// Builds `UPDATE <table> SET a = ?1, b = ?2 WHERE id = ?N` with its bound values.
pub(crate) fn update_statement(table: &'static str, assignments: Vec<Assignment>, id: i64) -> (String, Vec<Value>) {
    let mut sets = Vec::with_capacity(assignments.len());
    let mut values = Vec::with_capacity(assignments.len() + 1);

    for (index, assignment) in assignments.into_iter().enumerate() {
        sets.push(format!("{} = ?{}", assignment.column, index + 1));
        values.push(assignment.value);
    }
    values.push(Value::Integer(id));

    (format!("UPDATE {table} SET {} WHERE id = ?{}", sets.join(", "), values.len()), values)
}
