//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `Conflict`,
//!   `InvalidReference`) in addition to DB transport errors.

pub mod common;
pub mod equipment_repo;
pub mod inventory_repo;
pub mod lab_repo;
pub mod maintenance_repo;
pub mod pc_repo;
pub mod software_repo;
pub mod user_repo;
