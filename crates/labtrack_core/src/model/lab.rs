//! Lab domain model.
//!
//! # Invariants
//! - `name` is required and trimmed.
//! - `lab_code` is unique across labs when set (enforced by storage).
//! - `fans` and `lights` counters are never negative.

use super::validation::{
    check_optional_length, normalize_optional, normalize_text, require_non_negative,
    require_text, ValidationResult,
};
use serde::{Deserialize, Serialize};

pub type LabId = i64;

/// Physical room that hosts PCs, equipment, software and stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Lab {
    pub id: LabId,
    pub lab_code: Option<String>,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub fans: i64,
    pub lights: i64,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Lab {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn normalize(&mut self) {
        normalize_text(&mut self.name);
        normalize_optional(&mut self.lab_code);
        normalize_optional(&mut self.location);
        normalize_optional(&mut self.description);
    }

    pub fn validate(&self) -> ValidationResult {
        require_text("name", &self.name, 255)?;
        check_optional_length("lab_code", self.lab_code.as_deref(), 50)?;
        require_non_negative("fans", self.fans)?;
        require_non_negative("lights", self.lights)?;
        Ok(())
    }
}

/// Lab read model with the number of PCs it hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabDetail {
    #[serde(flatten)]
    pub lab: Lab,
    pub pc_count: u64,
}
