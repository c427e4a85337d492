//! Maintenance log repository contract and SQLite implementation.
//!
//! # Invariants
//! - Logs survive deletion of their lab or equipment (references become NULL).

use super::common::{
    delete_row, ensure_changed, get_row, list_rows, parse_text_enum, ListQuery, RepoResult,
};
use crate::model::maintenance::{MaintenanceLog, MaintenanceLogId};
use crate::model::now_epoch_ms;
use crate::model::status::MaintenanceStatus;
use rusqlite::{params, Connection, Row};

const MAINTENANCE_SELECT_SQL: &str = "SELECT
    id,
    lab_id,
    equipment_id,
    issue_description,
    remarks,
    status,
    reported_on,
    fixed_on,
    updated_at
FROM maintenance_logs";

pub trait MaintenanceRepository {
    fn create_log(&self, log: &MaintenanceLog) -> RepoResult<MaintenanceLogId>;
    fn get_log(&self, id: MaintenanceLogId) -> RepoResult<Option<MaintenanceLog>>;
    fn list_logs(&self, query: &ListQuery) -> RepoResult<Vec<MaintenanceLog>>;
    fn update_log(&self, log: &MaintenanceLog) -> RepoResult<()>;
    fn delete_log(&self, id: MaintenanceLogId) -> RepoResult<()>;
    fn count_with_status(&self, status: MaintenanceStatus) -> RepoResult<u64>;
}

pub struct SqliteMaintenanceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMaintenanceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MaintenanceRepository for SqliteMaintenanceRepository<'_> {
    fn create_log(&self, log: &MaintenanceLog) -> RepoResult<MaintenanceLogId> {
        log.validate()?;

        self.conn.execute(
            "INSERT INTO maintenance_logs (
                lab_id, equipment_id, issue_description, remarks, status,
                reported_on, fixed_on, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                log.lab_id,
                log.equipment_id,
                log.issue_description.as_str(),
                log.remarks.as_deref(),
                log.status.as_str(),
                log.reported_on,
                log.fixed_on,
                now_epoch_ms(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_log(&self, id: MaintenanceLogId) -> RepoResult<Option<MaintenanceLog>> {
        get_row(self.conn, MAINTENANCE_SELECT_SQL, id, parse_maintenance_row)
    }

    fn list_logs(&self, query: &ListQuery) -> RepoResult<Vec<MaintenanceLog>> {
        list_rows(
            self.conn,
            MAINTENANCE_SELECT_SQL,
            "reported_on",
            query,
            parse_maintenance_row,
        )
    }

    fn update_log(&self, log: &MaintenanceLog) -> RepoResult<()> {
        log.validate()?;

        let changed = self.conn.execute(
            "UPDATE maintenance_logs
             SET
                lab_id = ?1,
                equipment_id = ?2,
                issue_description = ?3,
                remarks = ?4,
                status = ?5,
                reported_on = ?6,
                fixed_on = ?7,
                updated_at = ?8
             WHERE id = ?9;",
            params![
                log.lab_id,
                log.equipment_id,
                log.issue_description.as_str(),
                log.remarks.as_deref(),
                log.status.as_str(),
                log.reported_on,
                log.fixed_on,
                now_epoch_ms(),
                log.id,
            ],
        )?;

        ensure_changed(changed, "maintenance log", log.id)
    }

    fn delete_log(&self, id: MaintenanceLogId) -> RepoResult<()> {
        delete_row(self.conn, "maintenance_logs", "maintenance log", id)
    }

    fn count_with_status(&self, status: MaintenanceStatus) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM maintenance_logs WHERE status = ?1;",
            [status.as_str()],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }
}

fn parse_maintenance_row(row: &Row<'_>) -> RepoResult<MaintenanceLog> {
    Ok(MaintenanceLog {
        id: row.get("id")?,
        lab_id: row.get("lab_id")?,
        equipment_id: row.get("equipment_id")?,
        issue_description: row.get("issue_description")?,
        remarks: row.get("remarks")?,
        status: parse_text_enum(row, "status", MaintenanceStatus::parse)?,
        reported_on: row.get("reported_on")?,
        fixed_on: row.get("fixed_on")?,
        updated_at: row.get("updated_at")?,
    })
}
