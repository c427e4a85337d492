//! Per-lab stock line used by the dashboard equipment totals.
//!
//! # Invariants
//! - `0 <= working_quantity <= total_quantity`.

use super::lab::LabId;
use super::validation::{
    check_optional_length, normalize_optional, normalize_text, require_non_negative,
    require_reference, require_text, ValidationError, ValidationResult,
};
use serde::{Deserialize, Serialize};

pub type InventoryId = i64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InventoryItem {
    pub id: InventoryId,
    #[serde(rename = "lab")]
    pub lab_id: LabId,
    pub item_name: String,
    pub category: Option<String>,
    pub total_quantity: i64,
    pub working_quantity: i64,
    pub updated_at: i64,
}

impl InventoryItem {
    pub fn new(lab_id: LabId, item_name: impl Into<String>, total: i64, working: i64) -> Self {
        Self {
            lab_id,
            item_name: item_name.into(),
            total_quantity: total,
            working_quantity: working,
            ..Self::default()
        }
    }

    pub fn normalize(&mut self) {
        normalize_text(&mut self.item_name);
        normalize_optional(&mut self.category);
    }

    pub fn validate(&self) -> ValidationResult {
        require_reference("lab", self.lab_id)?;
        require_text("item_name", &self.item_name, 200)?;
        check_optional_length("category", self.category.as_deref(), 100)?;
        require_non_negative("total_quantity", self.total_quantity)?;
        require_non_negative("working_quantity", self.working_quantity)?;
        if self.working_quantity > self.total_quantity {
            return Err(ValidationError::new(
                "working_quantity",
                "cannot exceed total_quantity",
            ));
        }
        Ok(())
    }

    /// Units that are present but not working.
    pub fn faulty_quantity(&self) -> i64 {
        self.total_quantity - self.working_quantity
    }
}
