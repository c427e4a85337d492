//! Generic equipment asset model.
//!
//! # Invariants
//! - `price` is finite and non-negative when set.
//! - `serial_number` is unique across equipment when set (storage-enforced).

use super::lab::LabId;
use super::status::{AssetStatus, EquipmentType};
use super::validation::{
    check_optional_length, normalize_optional, require_reference, ValidationError,
    ValidationResult,
};
use serde::{Deserialize, Serialize};

pub type EquipmentId = i64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Equipment {
    pub id: EquipmentId,
    #[serde(rename = "lab")]
    pub lab_id: LabId,
    pub equipment_type: EquipmentType,
    pub brand: Option<String>,
    pub model_name: Option<String>,
    pub serial_number: Option<String>,
    pub location_in_lab: Option<String>,
    pub price: Option<f64>,
    pub status: AssetStatus,
    pub added_on: i64,
    pub updated_at: i64,
}

impl Equipment {
    pub fn new(lab_id: LabId, equipment_type: EquipmentType) -> Self {
        Self {
            lab_id,
            equipment_type,
            ..Self::default()
        }
    }

    pub fn normalize(&mut self) {
        normalize_optional(&mut self.brand);
        normalize_optional(&mut self.model_name);
        normalize_optional(&mut self.serial_number);
        normalize_optional(&mut self.location_in_lab);
    }

    pub fn validate(&self) -> ValidationResult {
        require_reference("lab", self.lab_id)?;
        check_optional_length("brand", self.brand.as_deref(), 100)?;
        check_optional_length("model_name", self.model_name.as_deref(), 100)?;
        check_optional_length("serial_number", self.serial_number.as_deref(), 150)?;
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(ValidationError::new("price", "must be zero or greater"));
            }
        }
        Ok(())
    }
}
