//! Maintenance log model.
//!
//! # Invariants
//! - A `fixed` log always carries `fixed_on`; a `pending` log never does.
//! - `fixed_on >= reported_on`.
//! - A log references a lab, a piece of equipment, or both.

use super::equipment::EquipmentId;
use super::lab::LabId;
use super::status::MaintenanceStatus;
use super::validation::{
    check_optional_length, normalize_optional, normalize_text, require_text, ValidationError,
    ValidationResult,
};
use serde::{Deserialize, Serialize};

pub type MaintenanceLogId = i64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaintenanceLog {
    pub id: MaintenanceLogId,
    #[serde(rename = "lab")]
    pub lab_id: Option<LabId>,
    #[serde(rename = "equipment")]
    pub equipment_id: Option<EquipmentId>,
    pub issue_description: String,
    pub remarks: Option<String>,
    pub status: MaintenanceStatus,
    /// Unix epoch milliseconds.
    pub reported_on: i64,
    /// Unix epoch milliseconds; set only while `status == fixed`.
    pub fixed_on: Option<i64>,
    pub updated_at: i64,
}

impl MaintenanceLog {
    pub fn new(lab_id: LabId, issue_description: impl Into<String>) -> Self {
        Self {
            lab_id: Some(lab_id),
            issue_description: issue_description.into(),
            ..Self::default()
        }
    }

    pub fn normalize(&mut self) {
        normalize_text(&mut self.issue_description);
        normalize_optional(&mut self.remarks);
    }

    /// Aligns `reported_on`/`fixed_on` with `status` using `now_ms` as the
    /// clock for missing stamps.
    pub fn settle_lifecycle(&mut self, now_ms: i64) {
        if self.reported_on <= 0 {
            self.reported_on = now_ms;
        }
        match self.status {
            MaintenanceStatus::Pending => self.fixed_on = None,
            MaintenanceStatus::Fixed => {
                if self.fixed_on.is_none() {
                    self.fixed_on = Some(now_ms.max(self.reported_on));
                }
            }
        }
    }

    pub fn validate(&self) -> ValidationResult {
        require_text("issue_description", &self.issue_description, 2000)?;
        check_optional_length("remarks", self.remarks.as_deref(), 2000)?;
        if self.lab_id.is_none() && self.equipment_id.is_none() {
            return Err(ValidationError::new(
                "lab",
                "a lab or an equipment reference is required",
            ));
        }
        match (self.status, self.fixed_on) {
            (MaintenanceStatus::Pending, Some(_)) => Err(ValidationError::new(
                "fixed_on",
                "must be empty while the log is pending",
            )),
            (MaintenanceStatus::Fixed, None) => {
                Err(ValidationError::new("fixed_on", "required once fixed"))
            }
            (MaintenanceStatus::Fixed, Some(fixed_on)) if fixed_on < self.reported_on => Err(
                ValidationError::new("fixed_on", "cannot be earlier than reported_on"),
            ),
            _ => Ok(()),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == MaintenanceStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::MaintenanceLog;
    use crate::model::status::MaintenanceStatus;

    #[test]
    fn settle_lifecycle_stamps_and_clears_fixed_on() {
        let mut log = MaintenanceLog::new(1, "PC not starting");
        log.settle_lifecycle(1_000);
        assert_eq!(log.reported_on, 1_000);
        assert_eq!(log.fixed_on, None);

        log.status = MaintenanceStatus::Fixed;
        log.settle_lifecycle(5_000);
        assert_eq!(log.fixed_on, Some(5_000));
        assert!(log.validate().is_ok());

        log.status = MaintenanceStatus::Pending;
        log.settle_lifecycle(9_000);
        assert_eq!(log.fixed_on, None);
    }

    #[test]
    fn validate_rejects_fix_before_report() {
        let mut log = MaintenanceLog::new(1, "Router rebooting");
        log.reported_on = 10_000;
        log.status = MaintenanceStatus::Fixed;
        log.fixed_on = Some(9_000);
        assert_eq!(log.validate().unwrap_err().field, "fixed_on");
    }

    #[test]
    fn validate_requires_some_reference() {
        let mut log = MaintenanceLog::new(1, "Fan noise");
        log.lab_id = None;
        log.settle_lifecycle(1);
        assert_eq!(log.validate().unwrap_err().field, "lab");
    }
}
