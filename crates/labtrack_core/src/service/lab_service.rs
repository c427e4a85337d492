//! Lab use-case service, including the PCs scoped under a lab.
//!
//! # Invariants
//! - A PC created under a lab always belongs to the path lab, whatever the
//!   body says.
//! - Listing or creating PCs under a missing lab returns `NotFound`.

use super::common::{merge_json, Page};
use super::error::{ServiceError, ServiceResult};
use crate::model::lab::{Lab, LabDetail, LabId};
use crate::model::pc::Pc;
use crate::repo::lab_repo::LabRepository;
use crate::repo::pc_repo::PcRepository;
use log::info;
use serde_json::Value;

pub struct LabService<L: LabRepository, P: PcRepository> {
    labs: L,
    pcs: P,
}

impl<L: LabRepository, P: PcRepository> LabService<L, P> {
    pub fn new(labs: L, pcs: P) -> Self {
        Self { labs, pcs }
    }

    pub fn create_lab(&self, body: Value) -> ServiceResult<Lab> {
        let mut lab: Lab = merge_json(&Lab::default(), body)?;
        lab.normalize();
        let id = self.labs.create_lab(&lab)?;
        info!("event=lab_create module=service status=ok lab_id={id}");
        self.require_lab(id)
    }

    /// Returns the lab with its current PC count.
    pub fn get_lab(&self, id: LabId) -> ServiceResult<LabDetail> {
        let lab = self.require_lab(id)?;
        let pc_count = self.labs.pc_count(id)?;
        Ok(LabDetail { lab, pc_count })
    }

    pub fn list_labs(&self, page: Page) -> ServiceResult<Vec<Lab>> {
        Ok(self.labs.list_labs(&page.to_query(None))?)
    }

    pub fn update_lab(&self, id: LabId, body: Value) -> ServiceResult<Lab> {
        let current = self.require_lab(id)?;
        let mut lab = merge_json(&current, body)?;
        lab.normalize();
        self.labs.update_lab(&lab)?;
        self.require_lab(id)
    }

    /// Removes the lab along with its PCs, equipment, software and stock.
    pub fn delete_lab(&self, id: LabId) -> ServiceResult<()> {
        self.labs.delete_lab(id)?;
        info!("event=lab_delete module=service status=ok lab_id={id}");
        Ok(())
    }

    pub fn list_lab_pcs(&self, lab_id: LabId, page: Page) -> ServiceResult<Vec<Pc>> {
        self.require_lab(lab_id)?;
        Ok(self.pcs.list_pcs(&page.to_query(Some(lab_id)))?)
    }

    pub fn create_lab_pc(&self, lab_id: LabId, body: Value) -> ServiceResult<Pc> {
        self.require_lab(lab_id)?;
        let mut pc: Pc = merge_json(&Pc::default(), body)?;
        pc.lab_id = lab_id;
        pc.normalize();
        let id = self.pcs.create_pc(&pc)?;
        info!("event=pc_create module=service status=ok lab_id={lab_id} pc_id={id}");
        self.pcs
            .get_pc(id)?
            .ok_or(ServiceError::NotFound { entity: "pc", id })
    }

    fn require_lab(&self, id: LabId) -> ServiceResult<Lab> {
        self.labs
            .get_lab(id)?
            .ok_or(ServiceError::NotFound { entity: "lab", id })
    }
}
