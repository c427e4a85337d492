//! PC repository contract and SQLite implementation.

use super::common::{
    delete_row, ensure_changed, get_row, list_rows, parse_text_enum, ListQuery, RepoResult,
};
use crate::model::now_epoch_ms;
use crate::model::pc::{Pc, PcId};
use crate::model::status::AssetStatus;
use rusqlite::{params, Connection, Row};

const PC_SELECT_SQL: &str = "SELECT
    id,
    lab_id,
    name,
    brand,
    model,
    serial_number,
    asset_tag,
    ip_address,
    mac_address,
    cpu,
    ram_mb,
    storage_gb,
    os_name,
    status,
    remarks,
    created_at,
    updated_at
FROM pcs";

pub trait PcRepository {
    fn create_pc(&self, pc: &Pc) -> RepoResult<PcId>;
    fn get_pc(&self, id: PcId) -> RepoResult<Option<Pc>>;
    fn list_pcs(&self, query: &ListQuery) -> RepoResult<Vec<Pc>>;
    fn update_pc(&self, pc: &Pc) -> RepoResult<()>;
    fn delete_pc(&self, id: PcId) -> RepoResult<()>;
}

pub struct SqlitePcRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePcRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PcRepository for SqlitePcRepository<'_> {
    fn create_pc(&self, pc: &Pc) -> RepoResult<PcId> {
        pc.validate()?;

        self.conn.execute(
            "INSERT INTO pcs (
                lab_id, name, brand, model, serial_number, asset_tag, ip_address,
                mac_address, cpu, ram_mb, storage_gb, os_name, status, remarks,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?15);",
            params![
                pc.lab_id,
                pc.name.as_str(),
                pc.brand.as_deref(),
                pc.model.as_deref(),
                pc.serial_number.as_deref(),
                pc.asset_tag.as_deref(),
                pc.ip_address.as_deref(),
                pc.mac_address.as_deref(),
                pc.cpu.as_deref(),
                pc.ram_mb,
                pc.storage_gb,
                pc.os_name.as_deref(),
                pc.status.as_str(),
                pc.remarks.as_deref(),
                now_epoch_ms(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_pc(&self, id: PcId) -> RepoResult<Option<Pc>> {
        get_row(self.conn, PC_SELECT_SQL, id, parse_pc_row)
    }

    fn list_pcs(&self, query: &ListQuery) -> RepoResult<Vec<Pc>> {
        list_rows(self.conn, PC_SELECT_SQL, "updated_at", query, parse_pc_row)
    }

    fn update_pc(&self, pc: &Pc) -> RepoResult<()> {
        pc.validate()?;

        let changed = self.conn.execute(
            "UPDATE pcs
             SET
                lab_id = ?1,
                name = ?2,
                brand = ?3,
                model = ?4,
                serial_number = ?5,
                asset_tag = ?6,
                ip_address = ?7,
                mac_address = ?8,
                cpu = ?9,
                ram_mb = ?10,
                storage_gb = ?11,
                os_name = ?12,
                status = ?13,
                remarks = ?14,
                updated_at = ?15
             WHERE id = ?16;",
            params![
                pc.lab_id,
                pc.name.as_str(),
                pc.brand.as_deref(),
                pc.model.as_deref(),
                pc.serial_number.as_deref(),
                pc.asset_tag.as_deref(),
                pc.ip_address.as_deref(),
                pc.mac_address.as_deref(),
                pc.cpu.as_deref(),
                pc.ram_mb,
                pc.storage_gb,
                pc.os_name.as_deref(),
                pc.status.as_str(),
                pc.remarks.as_deref(),
                now_epoch_ms(),
                pc.id,
            ],
        )?;

        ensure_changed(changed, "pc", pc.id)
    }

    fn delete_pc(&self, id: PcId) -> RepoResult<()> {
        delete_row(self.conn, "pcs", "pc", id)
    }
}

fn parse_pc_row(row: &Row<'_>) -> RepoResult<Pc> {
    Ok(Pc {
        id: row.get("id")?,
        lab_id: row.get("lab_id")?,
        name: row.get("name")?,
        brand: row.get("brand")?,
        model: row.get("model")?,
        serial_number: row.get("serial_number")?,
        asset_tag: row.get("asset_tag")?,
        ip_address: row.get("ip_address")?,
        mac_address: row.get("mac_address")?,
        cpu: row.get("cpu")?,
        ram_mb: row.get("ram_mb")?,
        storage_gb: row.get("storage_gb")?,
        os_name: row.get("os_name")?,
        status: parse_text_enum(row, "status", AssetStatus::parse)?,
        remarks: row.get("remarks")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
