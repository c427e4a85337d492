//! PC use-case service: detail CRUD, filtered lists, status summary and the
//! per-lab chart.

use super::common::{fetch_all, merge_json, Page};
use super::error::{ServiceError, ServiceResult};
use crate::filter::{PcFilter, RecordFilter};
use crate::model::lab::LabId;
use crate::model::pc::{Pc, PcId};
use crate::report::chart::render_lab_chart;
use crate::report::stats::PcSummary;
use crate::repo::lab_repo::LabRepository;
use crate::repo::pc_repo::PcRepository;
use log::info;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct PcService<P: PcRepository, L: LabRepository> {
    pcs: P,
    labs: L,
}

impl<P: PcRepository, L: LabRepository> PcService<P, L> {
    pub fn new(pcs: P, labs: L) -> Self {
        Self { pcs, labs }
    }

    pub fn get_pc(&self, id: PcId) -> ServiceResult<Pc> {
        self.pcs
            .get_pc(id)?
            .ok_or(ServiceError::NotFound { entity: "pc", id })
    }

    /// Applies `body` onto the stored PC. Moving a PC to another lab is
    /// allowed through the `lab` key.
    pub fn update_pc(&self, id: PcId, body: Value) -> ServiceResult<Pc> {
        let current = self.get_pc(id)?;
        let mut pc = merge_json(&current, body)?;
        pc.normalize();
        self.pcs.update_pc(&pc)?;
        self.get_pc(id)
    }

    pub fn delete_pc(&self, id: PcId) -> ServiceResult<()> {
        self.pcs.delete_pc(id)?;
        info!("event=pc_delete module=service status=ok pc_id={id}");
        Ok(())
    }

    pub fn list_pcs(&self, filter: &PcFilter, page: Page) -> ServiceResult<Vec<Pc>> {
        Ok(page.apply(self.matching(filter)?))
    }

    pub fn summary(&self, filter: &PcFilter) -> ServiceResult<PcSummary> {
        Ok(PcSummary::from_pcs(&self.matching(filter)?))
    }

    /// Renders the per-lab status chart for the PCs matching `filter`,
    /// labelling groups with lab names.
    pub fn chart_svg(&self, filter: &PcFilter) -> ServiceResult<String> {
        let summary = self.summary(filter)?;
        let mut labels: BTreeMap<LabId, String> = BTreeMap::new();
        for lab_id in summary.by_lab.keys() {
            if let Some(lab) = self.labs.get_lab(*lab_id)? {
                labels.insert(lab.id, lab.name);
            }
        }
        Ok(render_lab_chart(&summary.by_lab, &labels))
    }

    fn matching(&self, filter: &PcFilter) -> ServiceResult<Vec<Pc>> {
        let pcs = fetch_all(filter.lab_id, |query| self.pcs.list_pcs(query))?;
        Ok(filter.apply(pcs))
    }
}
