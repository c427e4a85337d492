//! Software repository contract and SQLite implementation.

use super::common::{delete_row, ensure_changed, get_row, list_rows, ListQuery, RepoResult};
use crate::model::now_epoch_ms;
use crate::model::software::{Software, SoftwareId};
use rusqlite::{params, Connection, Row};

const SOFTWARE_SELECT_SQL: &str = "SELECT
    id,
    lab_id,
    name,
    version,
    license_key,
    license_expires_on,
    installed_on,
    updated_at
FROM software";

pub trait SoftwareRepository {
    fn create_software(&self, software: &Software) -> RepoResult<SoftwareId>;
    fn get_software(&self, id: SoftwareId) -> RepoResult<Option<Software>>;
    fn list_software(&self, query: &ListQuery) -> RepoResult<Vec<Software>>;
    fn update_software(&self, software: &Software) -> RepoResult<()>;
    fn delete_software(&self, id: SoftwareId) -> RepoResult<()>;
}

pub struct SqliteSoftwareRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSoftwareRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SoftwareRepository for SqliteSoftwareRepository<'_> {
    fn create_software(&self, software: &Software) -> RepoResult<SoftwareId> {
        software.validate()?;
        let now = now_epoch_ms();
        let installed_on = if software.installed_on > 0 {
            software.installed_on
        } else {
            now
        };

        self.conn.execute(
            "INSERT INTO software (
                lab_id, name, version, license_key, license_expires_on,
                installed_on, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                software.lab_id,
                software.name.as_str(),
                software.version.as_deref(),
                software.license_key.as_deref(),
                software.license_expires_on,
                installed_on,
                now,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_software(&self, id: SoftwareId) -> RepoResult<Option<Software>> {
        get_row(self.conn, SOFTWARE_SELECT_SQL, id, parse_software_row)
    }

    fn list_software(&self, query: &ListQuery) -> RepoResult<Vec<Software>> {
        list_rows(
            self.conn,
            SOFTWARE_SELECT_SQL,
            "updated_at",
            query,
            parse_software_row,
        )
    }

    fn update_software(&self, software: &Software) -> RepoResult<()> {
        software.validate()?;

        let changed = self.conn.execute(
            "UPDATE software
             SET
                lab_id = ?1,
                name = ?2,
                version = ?3,
                license_key = ?4,
                license_expires_on = ?5,
                installed_on = ?6,
                updated_at = ?7
             WHERE id = ?8;",
            params![
                software.lab_id,
                software.name.as_str(),
                software.version.as_deref(),
                software.license_key.as_deref(),
                software.license_expires_on,
                software.installed_on,
                now_epoch_ms(),
                software.id,
            ],
        )?;

        ensure_changed(changed, "software", software.id)
    }

    fn delete_software(&self, id: SoftwareId) -> RepoResult<()> {
        delete_row(self.conn, "software", "software", id)
    }
}

fn parse_software_row(row: &Row<'_>) -> RepoResult<Software> {
    Ok(Software {
        id: row.get("id")?,
        lab_id: row.get("lab_id")?,
        name: row.get("name")?,
        version: row.get("version")?,
        license_key: row.get("license_key")?,
        license_expires_on: row.get("license_expires_on")?,
        installed_on: row.get("installed_on")?,
        updated_at: row.get("updated_at")?,
    })
}
