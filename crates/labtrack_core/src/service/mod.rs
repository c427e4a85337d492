//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Apply JSON create/update bodies onto records and enforce cross-entity
//!   rules (lab scoping, maintenance lifecycle, account registration).
//! - Keep the HTTP layer decoupled from storage details.

pub mod common;
pub mod dashboard_service;
pub mod equipment_service;
pub mod error;
pub mod inventory_service;
pub mod lab_service;
pub mod maintenance_service;
pub mod pc_service;
pub mod software_service;
pub mod user_service;

pub use common::Page;
pub use error::{ServiceError, ServiceResult};
