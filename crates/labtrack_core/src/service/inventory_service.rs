//! Inventory stock-line use-case service.

use super::common::{merge_json, Page};
use super::error::{ServiceError, ServiceResult};
use crate::model::inventory::{InventoryId, InventoryItem};
use crate::model::lab::LabId;
use crate::repo::inventory_repo::InventoryRepository;
use serde_json::Value;

pub struct InventoryService<R: InventoryRepository> {
    repo: R,
}

impl<R: InventoryRepository> InventoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_item(&self, body: Value) -> ServiceResult<InventoryItem> {
        let mut item: InventoryItem = merge_json(&InventoryItem::default(), body)?;
        item.normalize();
        let id = self.repo.create_item(&item)?;
        self.get_item(id)
    }

    pub fn get_item(&self, id: InventoryId) -> ServiceResult<InventoryItem> {
        self.repo.get_item(id)?.ok_or(ServiceError::NotFound {
            entity: "inventory item",
            id,
        })
    }

    /// Applies `body`; `working_quantity` must still fit in `total_quantity`
    /// after the merge.
    pub fn update_item(&self, id: InventoryId, body: Value) -> ServiceResult<InventoryItem> {
        let current = self.get_item(id)?;
        let mut item = merge_json(&current, body)?;
        item.normalize();
        self.repo.update_item(&item)?;
        self.get_item(id)
    }

    pub fn delete_item(&self, id: InventoryId) -> ServiceResult<()> {
        Ok(self.repo.delete_item(id)?)
    }

    pub fn list_items(
        &self,
        lab_id: Option<LabId>,
        page: Page,
    ) -> ServiceResult<Vec<InventoryItem>> {
        Ok(self.repo.list_items(&page.to_query(lab_id))?)
    }
}
