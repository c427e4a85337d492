//! Domain model for labs and the assets tracked inside them.
//!
//! # Responsibility
//! - Define canonical records shared by repositories, services and the API.
//! - Own field normalization and validation rules.
//!
//! # Invariants
//! - Every record is identified by a SQLite integer id (`0` = not persisted).
//! - Timestamps are Unix epoch milliseconds.
//! - Lab references serialize as `lab`, equipment references as `equipment`.

pub mod equipment;
pub mod inventory;
pub mod lab;
pub mod maintenance;
pub mod pc;
pub mod software;
pub mod status;
pub mod user;
pub mod validation;

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
