//! Maintenance log use-case service.
//!
//! # Responsibility
//! - Apply create/update bodies and settle the pending/fixed lifecycle.
//! - Derive a log's lab from its equipment when the caller leaves it out.
//!
//! # Invariants
//! - Marking a log fixed without `fixed_on` stamps the current time.
//! - Moving a log back to pending clears `fixed_on`.
//! - A log that names equipment and a lab must name the equipment's lab.
//! - Re-pointing a log at other equipment without naming a lab moves the log
//!   to the new equipment's lab.

use super::common::{fetch_all, merge_json, Page};
use super::error::{ServiceError, ServiceResult};
use crate::filter::{MaintenanceFilter, RecordFilter};
use crate::model::maintenance::{MaintenanceLog, MaintenanceLogId};
use crate::model::now_epoch_ms;
use crate::model::validation::ValidationError;
use crate::repo::equipment_repo::EquipmentRepository;
use crate::repo::maintenance_repo::MaintenanceRepository;
use log::info;
use serde_json::Value;

pub struct MaintenanceService<M: MaintenanceRepository, E: EquipmentRepository> {
    logs: M,
    equipment: E,
}

impl<M: MaintenanceRepository, E: EquipmentRepository> MaintenanceService<M, E> {
    pub fn new(logs: M, equipment: E) -> Self {
        Self { logs, equipment }
    }

    pub fn create_log(&self, body: Value) -> ServiceResult<MaintenanceLog> {
        let mut log: MaintenanceLog = merge_json(&MaintenanceLog::default(), body)?;
        self.prepare(&mut log)?;
        let id = self.logs.create_log(&log)?;
        info!(
            "event=maintenance_create module=service status=ok log_id={id} state={}",
            log.status.as_str()
        );
        self.get_log(id)
    }

    pub fn get_log(&self, id: MaintenanceLogId) -> ServiceResult<MaintenanceLog> {
        self.logs.get_log(id)?.ok_or(ServiceError::NotFound {
            entity: "maintenance log",
            id,
        })
    }

    pub fn update_log(&self, id: MaintenanceLogId, body: Value) -> ServiceResult<MaintenanceLog> {
        let current = self.get_log(id)?;
        let names_lab = body.get("lab").is_some();
        let mut log = merge_json(&current, body)?;
        // A lab stored next to equipment was taken from that equipment.
        let repointed = current.equipment_id.is_some()
            && log.equipment_id.is_some()
            && log.equipment_id != current.equipment_id;
        if repointed && !names_lab {
            log.lab_id = None;
        }
        self.prepare(&mut log)?;
        self.logs.update_log(&log)?;
        if current.status != log.status {
            info!(
                "event=maintenance_transition module=service status=ok log_id={id} from={} to={}",
                current.status.as_str(),
                log.status.as_str()
            );
        }
        self.get_log(id)
    }

    pub fn delete_log(&self, id: MaintenanceLogId) -> ServiceResult<()> {
        Ok(self.logs.delete_log(id)?)
    }

    /// Lists logs newest report first, filtered before paging.
    pub fn list_logs(
        &self,
        filter: &MaintenanceFilter,
        page: Page,
    ) -> ServiceResult<Vec<MaintenanceLog>> {
        let logs = fetch_all(filter.lab_id, |query| self.logs.list_logs(query))?;
        Ok(page.apply(filter.apply(logs)))
    }

    fn prepare(&self, log: &mut MaintenanceLog) -> ServiceResult<()> {
        log.normalize();
        if let Some(equipment_id) = log.equipment_id {
            let equipment = self.equipment.get_equipment(equipment_id)?.ok_or_else(|| {
                ServiceError::InvalidReference(format!("equipment {equipment_id} does not exist"))
            })?;
            match log.lab_id {
                None => log.lab_id = Some(equipment.lab_id),
                Some(lab_id) if lab_id != equipment.lab_id => {
                    return Err(ValidationError::new(
                        "lab",
                        "does not match the lab of the referenced equipment",
                    )
                    .into());
                }
                Some(_) => {}
            }
        }
        log.settle_lifecycle(now_epoch_ms());
        log.validate()?;
        Ok(())
    }
}
