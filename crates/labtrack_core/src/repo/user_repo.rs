//! User account repository.
//!
//! # Invariants
//! - Username lookups are case-insensitive (`COLLATE NOCASE`).
//! - Password hashes are stored as produced by `auth::hash_password`.

use super::common::{get_row, parse_text_enum, RepoResult};
use crate::model::now_epoch_ms;
use crate::model::status::Role;
use crate::model::user::{User, UserId};
use rusqlite::{params, Connection, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    username,
    email,
    role,
    password_hash,
    created_at
FROM users";

pub trait UserRepository {
    fn create_user(&self, user: &User) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    fn count_users(&self) -> RepoResult<u64>;
}

pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<UserId> {
        user.validate()?;

        self.conn.execute(
            "INSERT INTO users (username, email, role, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                user.username.as_str(),
                user.email.as_str(),
                user.role.as_str(),
                user.password_hash.as_str(),
                now_epoch_ms(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        get_row(self.conn, USER_SELECT_SQL, id, parse_user_row)
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE username = ?1;"))?;
        let mut rows = stmt.query([username])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_user_row(row)?)),
            None => Ok(None),
        }
    }

    fn count_users(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
        role: parse_text_enum(row, "role", Role::parse)?,
        password_hash: row.get("password_hash")?,
        created_at: row.get("created_at")?,
    })
}
