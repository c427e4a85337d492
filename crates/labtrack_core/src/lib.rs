//! Core domain logic for LabTrack.
//! This crate is the single source of truth for inventory and maintenance
//! invariants; the HTTP layer only translates requests into service calls.

pub mod auth;
pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use filter::{
    parse_day, EquipmentFilter, MaintenanceFilter, PcFilter, RecordFilter, SoftwareFilter,
};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::equipment::{Equipment, EquipmentId};
pub use model::inventory::{InventoryId, InventoryItem};
pub use model::lab::{Lab, LabDetail, LabId};
pub use model::maintenance::{MaintenanceLog, MaintenanceLogId};
pub use model::pc::{Pc, PcId};
pub use model::software::{Software, SoftwareId};
pub use model::status::{AssetStatus, EquipmentType, MaintenanceStatus, Role};
pub use model::user::{User, UserId};
pub use model::validation::ValidationError;
pub use report::chart::render_lab_chart;
pub use report::stats::{DashboardStats, PcSummary, Tally};
pub use repo::common::{ListQuery, RepoError, RepoResult};
pub use service::dashboard_service::DashboardService;
pub use service::equipment_service::EquipmentService;
pub use service::inventory_service::InventoryService;
pub use service::lab_service::LabService;
pub use service::maintenance_service::MaintenanceService;
pub use service::pc_service::PcService;
pub use service::software_service::SoftwareService;
pub use service::user_service::{RegisterRequest, UserService};
pub use service::{Page, ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
