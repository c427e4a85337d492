//! Installed software record.

use super::lab::LabId;
use super::validation::{
    check_optional_length, normalize_optional, normalize_text, require_reference,
    require_text, ValidationResult,
};
use serde::{Deserialize, Serialize};

pub type SoftwareId = i64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Software {
    pub id: SoftwareId,
    #[serde(rename = "lab")]
    pub lab_id: LabId,
    pub name: String,
    pub version: Option<String>,
    pub license_key: Option<String>,
    /// Unix epoch milliseconds.
    pub license_expires_on: Option<i64>,
    pub installed_on: i64,
    pub updated_at: i64,
}

impl Software {
    pub fn new(lab_id: LabId, name: impl Into<String>) -> Self {
        Self {
            lab_id,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn normalize(&mut self) {
        normalize_text(&mut self.name);
        normalize_optional(&mut self.version);
        normalize_optional(&mut self.license_key);
    }

    pub fn validate(&self) -> ValidationResult {
        require_reference("lab", self.lab_id)?;
        require_text("name", &self.name, 200)?;
        check_optional_length("version", self.version.as_deref(), 50)?;
        Ok(())
    }
}
