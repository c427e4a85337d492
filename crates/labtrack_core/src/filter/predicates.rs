use super::RecordFilter;
use crate::model::equipment::Equipment;
use crate::model::lab::LabId;
use crate::model::maintenance::MaintenanceLog;
use crate::model::pc::Pc;
use crate::model::software::Software;
use crate::model::status::{AssetStatus, EquipmentType, MaintenanceStatus};
use crate::model::validation::ValidationError;
use chrono::{DateTime, NaiveDate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentFilter {
    pub lab_id: Option<LabId>,
    pub equipment_type: Option<EquipmentType>,
    pub status: Option<AssetStatus>,
    /// Matched against brand, model name and serial number.
    pub q: Option<String>,
}

impl RecordFilter<Equipment> for EquipmentFilter {
    fn matches(&self, item: &Equipment) -> bool {
        matches_opt(self.lab_id, item.lab_id)
            && matches_opt(self.equipment_type, item.equipment_type)
            && matches_opt(self.status, item.status)
            && text_matches(
                self.q.as_deref(),
                &[
                    item.brand.as_deref(),
                    item.model_name.as_deref(),
                    item.serial_number.as_deref(),
                ],
            )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PcFilter {
    pub lab_id: Option<LabId>,
    pub status: Option<AssetStatus>,
    /// Matched against name, brand and serial number.
    pub q: Option<String>,
}

impl RecordFilter<Pc> for PcFilter {
    fn matches(&self, item: &Pc) -> bool {
        matches_opt(self.lab_id, item.lab_id)
            && matches_opt(self.status, item.status)
            && text_matches(
                self.q.as_deref(),
                &[
                    Some(item.name.as_str()),
                    item.brand.as_deref(),
                    item.serial_number.as_deref(),
                ],
            )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoftwareFilter {
    pub lab_id: Option<LabId>,
    /// Matched against name and version.
    pub q: Option<String>,
}

impl RecordFilter<Software> for SoftwareFilter {
    fn matches(&self, item: &Software) -> bool {
        matches_opt(self.lab_id, item.lab_id)
            && text_matches(
                self.q.as_deref(),
                &[Some(item.name.as_str()), item.version.as_deref()],
            )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceFilter {
    pub lab_id: Option<LabId>,
    pub status: Option<MaintenanceStatus>,
    /// Matched against issue description and remarks.
    pub q: Option<String>,
    /// Inclusive lower bound on the UTC date of `reported_on`.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the UTC date of `reported_on`.
    pub to: Option<NaiveDate>,
}

impl RecordFilter<MaintenanceLog> for MaintenanceFilter {
    fn matches(&self, item: &MaintenanceLog) -> bool {
        let lab_matches = match self.lab_id {
            Some(lab_id) => item.lab_id == Some(lab_id),
            None => true,
        };
        let reported_day = utc_day(item.reported_on);
        let from_matches = match (self.from, reported_day) {
            (Some(from), Some(day)) => day >= from,
            (Some(_), None) => false,
            (None, _) => true,
        };
        let to_matches = match (self.to, reported_day) {
            (Some(to), Some(day)) => day <= to,
            (Some(_), None) => false,
            (None, _) => true,
        };

        lab_matches
            && matches_opt(self.status, item.status)
            && text_matches(
                self.q.as_deref(),
                &[Some(item.issue_description.as_str()), item.remarks.as_deref()],
            )
            && from_matches
            && to_matches
    }
}

/// Parses a `YYYY-MM-DD` bound; blank input means "no bound".
pub fn parse_day(field: &'static str, value: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::new(field, "expected a date formatted as YYYY-MM-DD"))
}

fn matches_opt<V: PartialEq>(wanted: Option<V>, actual: V) -> bool {
    match wanted {
        Some(value) => value == actual,
        None => true,
    }
}

fn text_matches(query: Option<&str>, fields: &[Option<&str>]) -> bool {
    let needle = match query.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_lowercase(),
        _ => return true,
    };
    let haystack = fields
        .iter()
        .map(|field| field.unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    haystack.contains(&needle)
}

fn utc_day(epoch_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(epoch_ms).map(|at| at.date_naive())
}
