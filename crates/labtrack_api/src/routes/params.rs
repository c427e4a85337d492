//! Query-string parsing shared by list endpoints.
//!
//! Every key arrives as text; blank values mean "no filter".

use crate::error::ApiError;
use labtrack_core::{
    parse_day, AssetStatus, EquipmentFilter, EquipmentType, LabId, MaintenanceFilter,
    MaintenanceStatus, Page, PcFilter, SoftwareFilter,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    pub lab: Option<String>,
    pub status: Option<String>,
    pub equipment_type: Option<String>,
    pub q: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> Result<Page, ApiError> {
        Ok(Page {
            limit: parse_number("limit", self.limit.as_deref())?,
            offset: parse_number("offset", self.offset.as_deref())?.unwrap_or(0),
        })
    }

    pub fn lab(&self) -> Result<Option<LabId>, ApiError> {
        parse_number("lab", self.lab.as_deref())
    }

    pub fn q(&self) -> Option<String> {
        non_blank(self.q.as_deref()).map(str::to_owned)
    }

    pub fn pc_filter(&self) -> Result<PcFilter, ApiError> {
        Ok(PcFilter {
            lab_id: self.lab()?,
            status: parse_enum("status", self.status.as_deref(), AssetStatus::parse)?,
            q: self.q(),
        })
    }

    pub fn equipment_filter(&self) -> Result<EquipmentFilter, ApiError> {
        Ok(EquipmentFilter {
            lab_id: self.lab()?,
            equipment_type: parse_enum(
                "equipment_type",
                self.equipment_type.as_deref(),
                EquipmentType::parse,
            )?,
            status: parse_enum("status", self.status.as_deref(), AssetStatus::parse)?,
            q: self.q(),
        })
    }

    pub fn software_filter(&self) -> Result<SoftwareFilter, ApiError> {
        Ok(SoftwareFilter {
            lab_id: self.lab()?,
            q: self.q(),
        })
    }

    pub fn maintenance_filter(&self) -> Result<MaintenanceFilter, ApiError> {
        let day = |field: &'static str, value: Option<&str>| {
            parse_day(field, value.unwrap_or_default())
                .map_err(|err| ApiError::bad_request(err.to_string()))
        };
        Ok(MaintenanceFilter {
            lab_id: self.lab()?,
            status: parse_enum("status", self.status.as_deref(), MaintenanceStatus::parse)?,
            q: self.q(),
            from: day("from", self.from.as_deref())?,
            to: day("to", self.to.as_deref())?,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn parse_number<T: std::str::FromStr>(
    field: &str,
    value: Option<&str>,
) -> Result<Option<T>, ApiError> {
    match non_blank(value) {
        Some(text) => text
            .parse::<T>()
            .map(Some)
            .map_err(|_| ApiError::bad_request(format!("{field}: expected an integer"))),
        None => Ok(None),
    }
}

fn parse_enum<T>(
    field: &str,
    value: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, ApiError> {
    match non_blank(value) {
        Some(text) => parse(text)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request(format!("{field}: unknown value `{text}`"))),
        None => Ok(None),
    }
}
