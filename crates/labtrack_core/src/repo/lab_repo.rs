//! Lab repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `Lab::validate()` before SQL mutations.
//! - Deleting a lab cascades to its PCs, equipment, software and stock.

use super::common::{
    delete_row, ensure_changed, get_row, list_rows, ListQuery, RepoResult,
};
use crate::model::lab::{Lab, LabId};
use crate::model::now_epoch_ms;
use rusqlite::{params, Connection, Row};

const LAB_SELECT_SQL: &str = "SELECT
    id,
    lab_code,
    name,
    location,
    description,
    fans,
    lights,
    created_at,
    updated_at
FROM labs";

pub trait LabRepository {
    fn create_lab(&self, lab: &Lab) -> RepoResult<LabId>;
    fn get_lab(&self, id: LabId) -> RepoResult<Option<Lab>>;
    fn list_labs(&self, query: &ListQuery) -> RepoResult<Vec<Lab>>;
    fn update_lab(&self, lab: &Lab) -> RepoResult<()>;
    fn delete_lab(&self, id: LabId) -> RepoResult<()>;
    fn count_labs(&self) -> RepoResult<u64>;
    fn pc_count(&self, id: LabId) -> RepoResult<u64>;
}

pub struct SqliteLabRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLabRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl LabRepository for SqliteLabRepository<'_> {
    fn create_lab(&self, lab: &Lab) -> RepoResult<LabId> {
        lab.validate()?;
        let now = now_epoch_ms();

        self.conn.execute(
            "INSERT INTO labs (
                lab_code,
                name,
                location,
                description,
                fans,
                lights,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7);",
            params![
                lab.lab_code.as_deref(),
                lab.name.as_str(),
                lab.location.as_deref(),
                lab.description.as_deref(),
                lab.fans,
                lab.lights,
                now,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_lab(&self, id: LabId) -> RepoResult<Option<Lab>> {
        get_row(self.conn, LAB_SELECT_SQL, id, parse_lab_row)
    }

    fn list_labs(&self, query: &ListQuery) -> RepoResult<Vec<Lab>> {
        // Labs are the scope themselves; a lab filter does not apply.
        let query = ListQuery {
            lab_id: None,
            ..query.clone()
        };
        list_rows(self.conn, LAB_SELECT_SQL, "updated_at", &query, parse_lab_row)
    }

    fn update_lab(&self, lab: &Lab) -> RepoResult<()> {
        lab.validate()?;

        let changed = self.conn.execute(
            "UPDATE labs
             SET
                lab_code = ?1,
                name = ?2,
                location = ?3,
                description = ?4,
                fans = ?5,
                lights = ?6,
                updated_at = ?7
             WHERE id = ?8;",
            params![
                lab.lab_code.as_deref(),
                lab.name.as_str(),
                lab.location.as_deref(),
                lab.description.as_deref(),
                lab.fans,
                lab.lights,
                now_epoch_ms(),
                lab.id,
            ],
        )?;

        ensure_changed(changed, "lab", lab.id)
    }

    fn delete_lab(&self, id: LabId) -> RepoResult<()> {
        delete_row(self.conn, "labs", "lab", id)
    }

    fn count_labs(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM labs;", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    fn pc_count(&self, id: LabId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pcs WHERE lab_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }
}

fn parse_lab_row(row: &Row<'_>) -> RepoResult<Lab> {
    Ok(Lab {
        id: row.get("id")?,
        lab_code: row.get("lab_code")?,
        name: row.get("name")?,
        location: row.get("location")?,
        description: row.get("description")?,
        fans: row.get("fans")?,
        lights: row.get("lights")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
