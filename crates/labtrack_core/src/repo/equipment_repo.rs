//! Equipment repository contract and SQLite implementation.

use super::common::{
    delete_row, ensure_changed, get_row, list_rows, parse_text_enum, ListQuery, RepoResult,
};
use crate::model::equipment::{Equipment, EquipmentId};
use crate::model::now_epoch_ms;
use crate::model::status::{AssetStatus, EquipmentType};
use rusqlite::{params, Connection, Row};

const EQUIPMENT_SELECT_SQL: &str = "SELECT
    id,
    lab_id,
    equipment_type,
    brand,
    model_name,
    serial_number,
    location_in_lab,
    price,
    status,
    added_on,
    updated_at
FROM equipment";

pub trait EquipmentRepository {
    fn create_equipment(&self, equipment: &Equipment) -> RepoResult<EquipmentId>;
    fn get_equipment(&self, id: EquipmentId) -> RepoResult<Option<Equipment>>;
    fn list_equipment(&self, query: &ListQuery) -> RepoResult<Vec<Equipment>>;
    fn update_equipment(&self, equipment: &Equipment) -> RepoResult<()>;
    fn delete_equipment(&self, id: EquipmentId) -> RepoResult<()>;
}

pub struct SqliteEquipmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEquipmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EquipmentRepository for SqliteEquipmentRepository<'_> {
    fn create_equipment(&self, equipment: &Equipment) -> RepoResult<EquipmentId> {
        equipment.validate()?;

        self.conn.execute(
            "INSERT INTO equipment (
                lab_id, equipment_type, brand, model_name, serial_number,
                location_in_lab, price, status, added_on, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9);",
            params![
                equipment.lab_id,
                equipment.equipment_type.as_str(),
                equipment.brand.as_deref(),
                equipment.model_name.as_deref(),
                equipment.serial_number.as_deref(),
                equipment.location_in_lab.as_deref(),
                equipment.price,
                equipment.status.as_str(),
                now_epoch_ms(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_equipment(&self, id: EquipmentId) -> RepoResult<Option<Equipment>> {
        get_row(self.conn, EQUIPMENT_SELECT_SQL, id, parse_equipment_row)
    }

    fn list_equipment(&self, query: &ListQuery) -> RepoResult<Vec<Equipment>> {
        list_rows(
            self.conn,
            EQUIPMENT_SELECT_SQL,
            "updated_at",
            query,
            parse_equipment_row,
        )
    }

    fn update_equipment(&self, equipment: &Equipment) -> RepoResult<()> {
        equipment.validate()?;

        let changed = self.conn.execute(
            "UPDATE equipment
             SET
                lab_id = ?1,
                equipment_type = ?2,
                brand = ?3,
                model_name = ?4,
                serial_number = ?5,
                location_in_lab = ?6,
                price = ?7,
                status = ?8,
                updated_at = ?9
             WHERE id = ?10;",
            params![
                equipment.lab_id,
                equipment.equipment_type.as_str(),
                equipment.brand.as_deref(),
                equipment.model_name.as_deref(),
                equipment.serial_number.as_deref(),
                equipment.location_in_lab.as_deref(),
                equipment.price,
                equipment.status.as_str(),
                now_epoch_ms(),
                equipment.id,
            ],
        )?;

        ensure_changed(changed, "equipment", equipment.id)
    }

    fn delete_equipment(&self, id: EquipmentId) -> RepoResult<()> {
        delete_row(self.conn, "equipment", "equipment", id)
    }
}

fn parse_equipment_row(row: &Row<'_>) -> RepoResult<Equipment> {
    Ok(Equipment {
        id: row.get("id")?,
        lab_id: row.get("lab_id")?,
        equipment_type: parse_text_enum(row, "equipment_type", EquipmentType::parse)?,
        brand: row.get("brand")?,
        model_name: row.get("model_name")?,
        serial_number: row.get("serial_number")?,
        location_in_lab: row.get("location_in_lab")?,
        price: row.get("price")?,
        status: parse_text_enum(row, "status", AssetStatus::parse)?,
        added_on: row.get("added_on")?,
        updated_at: row.get("updated_at")?,
    })
}
