//! Inventory repository contract and SQLite implementation.
//!
//! # Invariants
//! - Quantity bounds are checked both by `InventoryItem::validate()` and by
//!   table CHECK constraints.

use super::common::{delete_row, ensure_changed, get_row, list_rows, ListQuery, RepoResult};
use crate::model::inventory::{InventoryId, InventoryItem};
use crate::model::now_epoch_ms;
use rusqlite::{params, Connection, Row};

const INVENTORY_SELECT_SQL: &str = "SELECT
    id,
    lab_id,
    item_name,
    category,
    total_quantity,
    working_quantity,
    updated_at
FROM inventory";

/// Summed quantities across every inventory line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryTotals {
    pub total_quantity: i64,
    pub working_quantity: i64,
}

pub trait InventoryRepository {
    fn create_item(&self, item: &InventoryItem) -> RepoResult<InventoryId>;
    fn get_item(&self, id: InventoryId) -> RepoResult<Option<InventoryItem>>;
    fn list_items(&self, query: &ListQuery) -> RepoResult<Vec<InventoryItem>>;
    fn update_item(&self, item: &InventoryItem) -> RepoResult<()>;
    fn delete_item(&self, id: InventoryId) -> RepoResult<()>;
    fn totals(&self) -> RepoResult<InventoryTotals>;
}

pub struct SqliteInventoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteInventoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl InventoryRepository for SqliteInventoryRepository<'_> {
    fn create_item(&self, item: &InventoryItem) -> RepoResult<InventoryId> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO inventory (
                lab_id, item_name, category, total_quantity, working_quantity, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                item.lab_id,
                item.item_name.as_str(),
                item.category.as_deref(),
                item.total_quantity,
                item.working_quantity,
                now_epoch_ms(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_item(&self, id: InventoryId) -> RepoResult<Option<InventoryItem>> {
        get_row(self.conn, INVENTORY_SELECT_SQL, id, parse_inventory_row)
    }

    fn list_items(&self, query: &ListQuery) -> RepoResult<Vec<InventoryItem>> {
        list_rows(
            self.conn,
            INVENTORY_SELECT_SQL,
            "updated_at",
            query,
            parse_inventory_row,
        )
    }

    fn update_item(&self, item: &InventoryItem) -> RepoResult<()> {
        item.validate()?;

        let changed = self.conn.execute(
            "UPDATE inventory
             SET
                lab_id = ?1,
                item_name = ?2,
                category = ?3,
                total_quantity = ?4,
                working_quantity = ?5,
                updated_at = ?6
             WHERE id = ?7;",
            params![
                item.lab_id,
                item.item_name.as_str(),
                item.category.as_deref(),
                item.total_quantity,
                item.working_quantity,
                now_epoch_ms(),
                item.id,
            ],
        )?;

        ensure_changed(changed, "inventory item", item.id)
    }

    fn delete_item(&self, id: InventoryId) -> RepoResult<()> {
        delete_row(self.conn, "inventory", "inventory item", id)
    }

    fn totals(&self) -> RepoResult<InventoryTotals> {
        let totals = self.conn.query_row(
            "SELECT
                COALESCE(SUM(total_quantity), 0),
                COALESCE(SUM(working_quantity), 0)
             FROM inventory;",
            [],
            |row| {
                Ok(InventoryTotals {
                    total_quantity: row.get(0)?,
                    working_quantity: row.get(1)?,
                })
            },
        )?;
        Ok(totals)
    }
}

fn parse_inventory_row(row: &Row<'_>) -> RepoResult<InventoryItem> {
    Ok(InventoryItem {
        id: row.get("id")?,
        lab_id: row.get("lab_id")?,
        item_name: row.get("item_name")?,
        category: row.get("category")?,
        total_quantity: row.get("total_quantity")?,
        working_quantity: row.get("working_quantity")?,
        updated_at: row.get("updated_at")?,
    })
}
