//! PC domain model.
//!
//! # Invariants
//! - Every PC belongs to exactly one lab.
//! - `ip_address` parses as IPv4 or IPv6 when set.
//! - `mac_address` is six hex pairs separated by `:` or `-` when set.

use super::lab::LabId;
use super::status::AssetStatus;
use super::validation::{
    check_optional_length, normalize_optional, normalize_text, require_positive,
    require_reference, require_text, ValidationError, ValidationResult,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

static MAC_ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:[0-9A-Fa-f]{2}:){5}|(?:[0-9A-Fa-f]{2}-){5})[0-9A-Fa-f]{2}$")
        .expect("valid mac address regex")
});

pub type PcId = i64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Pc {
    pub id: PcId,
    #[serde(rename = "lab")]
    pub lab_id: LabId,
    /// Hostname shown in lists.
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub asset_tag: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub cpu: Option<String>,
    pub ram_mb: Option<i64>,
    pub storage_gb: Option<i64>,
    pub os_name: Option<String>,
    pub status: AssetStatus,
    pub remarks: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Pc {
    pub fn new(lab_id: LabId, name: impl Into<String>) -> Self {
        Self {
            lab_id,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn normalize(&mut self) {
        normalize_text(&mut self.name);
        for field in [
            &mut self.brand,
            &mut self.model,
            &mut self.serial_number,
            &mut self.asset_tag,
            &mut self.ip_address,
            &mut self.mac_address,
            &mut self.cpu,
            &mut self.os_name,
            &mut self.remarks,
        ] {
            normalize_optional(field);
        }
    }

    pub fn validate(&self) -> ValidationResult {
        require_reference("lab", self.lab_id)?;
        require_text("name", &self.name, 150)?;
        check_optional_length("serial_number", self.serial_number.as_deref(), 150)?;
        check_optional_length("asset_tag", self.asset_tag.as_deref(), 100)?;
        if let Some(ip) = self.ip_address.as_deref() {
            if ip.parse::<IpAddr>().is_err() {
                return Err(ValidationError::new(
                    "ip_address",
                    "enter a valid IPv4 or IPv6 address",
                ));
            }
        }
        if let Some(mac) = self.mac_address.as_deref() {
            if !MAC_ADDRESS_RE.is_match(mac) {
                return Err(ValidationError::new(
                    "mac_address",
                    "expected six hex pairs separated by `:` or `-`",
                ));
            }
        }
        require_positive("ram_mb", self.ram_mb)?;
        require_positive("storage_gb", self.storage_gb)?;
        Ok(())
    }
}
