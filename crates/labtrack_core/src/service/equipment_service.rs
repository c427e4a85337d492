//! Equipment use-case service.

use super::common::{fetch_all, merge_json, Page};
use super::error::{ServiceError, ServiceResult};
use crate::filter::{EquipmentFilter, RecordFilter};
use crate::model::equipment::{Equipment, EquipmentId};
use crate::repo::equipment_repo::EquipmentRepository;
use log::info;
use serde_json::Value;

pub struct EquipmentService<R: EquipmentRepository> {
    repo: R,
}

impl<R: EquipmentRepository> EquipmentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_equipment(&self, body: Value) -> ServiceResult<Equipment> {
        let mut equipment: Equipment = merge_json(&Equipment::default(), body)?;
        equipment.normalize();
        let id = self.repo.create_equipment(&equipment)?;
        info!(
            "event=equipment_create module=service status=ok equipment_id={id} type={}",
            equipment.equipment_type.as_str()
        );
        self.get_equipment(id)
    }

    pub fn get_equipment(&self, id: EquipmentId) -> ServiceResult<Equipment> {
        self.repo
            .get_equipment(id)?
            .ok_or(ServiceError::NotFound {
                entity: "equipment",
                id,
            })
    }

    pub fn update_equipment(&self, id: EquipmentId, body: Value) -> ServiceResult<Equipment> {
        let current = self.get_equipment(id)?;
        let mut equipment = merge_json(&current, body)?;
        equipment.normalize();
        self.repo.update_equipment(&equipment)?;
        self.get_equipment(id)
    }

    pub fn delete_equipment(&self, id: EquipmentId) -> ServiceResult<()> {
        self.repo.delete_equipment(id)?;
        info!("event=equipment_delete module=service status=ok equipment_id={id}");
        Ok(())
    }

    pub fn list_equipment(
        &self,
        filter: &EquipmentFilter,
        page: Page,
    ) -> ServiceResult<Vec<Equipment>> {
        let items = fetch_all(filter.lab_id, |query| self.repo.list_equipment(query))?;
        Ok(page.apply(filter.apply(items)))
    }
}
