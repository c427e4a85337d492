//! Enumerations shared by inventory records.
//!
//! Every enum round-trips through the exact string used in JSON and in the
//! SQLite `TEXT` columns, so repositories and the HTTP layer agree on one
//! spelling.

use serde::{Deserialize, Serialize};

/// Operational state of a PC or a piece of equipment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    #[default]
    Working,
    NotWorking,
    UnderRepair,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 3] = [Self::Working, Self::NotWorking, Self::UnderRepair];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Working => "working",
            Self::NotWorking => "not_working",
            Self::UnderRepair => "under_repair",
        }
    }

    /// Parses a status, ignoring ASCII case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
    }
}

/// Category of a generic equipment record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EquipmentType {
    Pc,
    Monitor,
    Keyboard,
    Mouse,
    Router,
    Switch,
    Server,
    Fan,
    Light,
    #[default]
    Other,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 10] = [
        Self::Pc,
        Self::Monitor,
        Self::Keyboard,
        Self::Mouse,
        Self::Router,
        Self::Switch,
        Self::Server,
        Self::Fan,
        Self::Light,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pc => "PC",
            Self::Monitor => "MONITOR",
            Self::Keyboard => "KEYBOARD",
            Self::Mouse => "MOUSE",
            Self::Router => "ROUTER",
            Self::Switch => "SWITCH",
            Self::Server => "SERVER",
            Self::Fan => "FAN",
            Self::Light => "LIGHT",
            Self::Other => "OTHER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == normalized)
    }
}

/// Lifecycle of a maintenance log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    #[default]
    Pending,
    Fixed,
}

impl MaintenanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fixed => "fixed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }
}

/// Account role controlling write permissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    Technician,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Technician => "technician",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "technician" => Some(Self::Technician),
            _ => None,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}
