//! Shared repository error, paging and row helpers.
//!
//! # Invariants
//! - SQLite constraint failures surface as semantic errors (`Conflict`,
//!   `InvalidReference`) instead of raw transport errors.
//! - List limits default to 100 and clamp to 500.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use rusqlite::types::Value;
use rusqlite::{ffi, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const LIST_DEFAULT_LIMIT: u32 = 100;
const LIST_LIMIT_MAX: u32 = 500;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: i64 },
    /// Unique constraint violation.
    Conflict(String),
    /// Foreign key points at a row that does not exist.
    InvalidReference(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::InvalidReference(message) => write!(f, "invalid reference: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &value {
            let detail = message
                .clone()
                .unwrap_or_else(|| failure.to_string());
            match failure.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return Self::Conflict(detail);
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return Self::InvalidReference(detail),
                _ => {}
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Paging and lab scoping for list queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Restricts rows to one lab when set.
    pub lab_id: Option<i64>,
    /// Maximum rows to return. Defaults to 100 and clamps to 500.
    pub limit: Option<u32>,
    /// Number of rows to skip.
    pub offset: u32,
}

impl ListQuery {
    pub fn for_lab(lab_id: i64) -> Self {
        Self {
            lab_id: Some(lab_id),
            ..Self::default()
        }
    }
}

/// Normalizes list limit according to the paging contract.
pub fn normalize_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => LIST_DEFAULT_LIMIT,
        Some(value) if value > LIST_LIMIT_MAX => LIST_LIMIT_MAX,
        Some(value) => value,
    }
}

/// Runs a `SELECT ... FROM <table>` with optional lab scoping, newest-first
/// ordering and paging, parsing each row with `parse`.
pub(crate) fn list_rows<T>(
    conn: &Connection,
    select_sql: &str,
    order_column: &str,
    query: &ListQuery,
    parse: impl Fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Vec<T>> {
    let mut sql = format!("{select_sql} WHERE 1 = 1");
    let mut bind_values: Vec<Value> = Vec::new();

    if let Some(lab_id) = query.lab_id {
        sql.push_str(" AND lab_id = ?");
        bind_values.push(Value::Integer(lab_id));
    }

    sql.push_str(&format!(" ORDER BY {order_column} DESC, id DESC LIMIT ?"));
    bind_values.push(Value::Integer(i64::from(normalize_limit(query.limit))));
    if query.offset > 0 {
        sql.push_str(" OFFSET ?");
        bind_values.push(Value::Integer(i64::from(query.offset)));
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse(row)?);
    }
    Ok(items)
}

/// Loads at most one row by id.
pub(crate) fn get_row<T>(
    conn: &Connection,
    select_sql: &str,
    id: i64,
    parse: impl Fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Option<T>> {
    let mut stmt = conn.prepare(&format!("{select_sql} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse(row)?)),
        None => Ok(None),
    }
}

/// Deletes one row by id, mapping zero affected rows to `NotFound`.
pub(crate) fn delete_row(
    conn: &Connection,
    table: &'static str,
    entity: &'static str,
    id: i64,
) -> RepoResult<()> {
    let changed = conn.execute(&format!("DELETE FROM {table} WHERE id = ?1;"), [id])?;
    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }
    Ok(())
}

pub(crate) fn ensure_changed(changed: usize, entity: &'static str, id: i64) -> RepoResult<()> {
    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }
    Ok(())
}

/// Decodes an enum stored as TEXT, rejecting unknown spellings.
pub(crate) fn parse_text_enum<T>(
    row: &Row<'_>,
    column: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> RepoResult<T> {
    let text: String = row.get(column)?;
    parse(&text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid value `{text}` in column `{column}`"))
    })
}

#[cfg(test)]
mod tests {
    use super::normalize_limit;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(normalize_limit(None), 100);
        assert_eq!(normalize_limit(Some(0)), 100);
        assert_eq!(normalize_limit(Some(25)), 25);
        assert_eq!(normalize_limit(Some(10_000)), 500);
    }
}
