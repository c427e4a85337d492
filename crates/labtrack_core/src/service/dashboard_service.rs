//! Dashboard counters.

use super::error::ServiceResult;
use crate::model::status::MaintenanceStatus;
use crate::report::stats::DashboardStats;
use crate::repo::inventory_repo::InventoryRepository;
use crate::repo::lab_repo::LabRepository;
use crate::repo::maintenance_repo::MaintenanceRepository;

pub struct DashboardService<L, I, M>
where
    L: LabRepository,
    I: InventoryRepository,
    M: MaintenanceRepository,
{
    labs: L,
    inventory: I,
    maintenance: M,
}

impl<L, I, M> DashboardService<L, I, M>
where
    L: LabRepository,
    I: InventoryRepository,
    M: MaintenanceRepository,
{
    pub fn new(labs: L, inventory: I, maintenance: M) -> Self {
        Self {
            labs,
            inventory,
            maintenance,
        }
    }

    /// Equipment counts come from inventory quantities, not equipment rows.
    pub fn stats(&self) -> ServiceResult<DashboardStats> {
        let totals = self.inventory.totals()?;
        Ok(DashboardStats {
            total_labs: self.labs.count_labs()?,
            total_equipment: totals.total_quantity,
            working_equipment: totals.working_quantity,
            pending_maintenance: self
                .maintenance
                .count_with_status(MaintenanceStatus::Pending)?,
        })
    }
}
