//! Status tallies and dashboard counters.
//!
//! # Invariants
//! - `total == working + not_working + other` for every tally.
//! - Per-lab tallies are keyed and iterated in ascending lab id order.

use crate::model::lab::LabId;
use crate::model::pc::Pc;
use crate::model::status::AssetStatus;
use serde::Serialize;
use std::collections::BTreeMap;

/// Status aggregate; anything not working/not_working counts as `other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: u64,
    pub working: u64,
    pub not_working: u64,
    pub other: u64,
}

impl Tally {
    pub fn record(&mut self, status: AssetStatus) {
        self.total += 1;
        match status {
            AssetStatus::Working => self.working += 1,
            AssetStatus::NotWorking => self.not_working += 1,
            AssetStatus::UnderRepair => self.other += 1,
        }
    }
}

impl FromIterator<AssetStatus> for Tally {
    fn from_iter<I: IntoIterator<Item = AssetStatus>>(iter: I) -> Self {
        iter.into_iter().fold(Tally::default(), |mut tally, status| {
            tally.record(status);
            tally
        })
    }
}

pub fn tally_pcs(pcs: &[Pc]) -> Tally {
    pcs.iter().map(|pc| pc.status).collect()
}

pub fn tally_by_lab(pcs: &[Pc]) -> BTreeMap<LabId, Tally> {
    let mut by_lab: BTreeMap<LabId, Tally> = BTreeMap::new();
    for pc in pcs {
        by_lab.entry(pc.lab_id).or_default().record(pc.status);
    }
    by_lab
}

/// Overall and per-lab PC tallies for one filtered PC list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PcSummary {
    pub totals: Tally,
    pub by_lab: BTreeMap<LabId, Tally>,
}

impl PcSummary {
    pub fn from_pcs(pcs: &[Pc]) -> Self {
        Self {
            totals: tally_pcs(pcs),
            by_lab: tally_by_lab(pcs),
        }
    }
}

/// Counters shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_labs: u64,
    /// Sum of inventory `total_quantity`.
    pub total_equipment: i64,
    /// Sum of inventory `working_quantity`.
    pub working_equipment: i64,
    pub pending_maintenance: u64,
}
