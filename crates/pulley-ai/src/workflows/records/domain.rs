use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::diagnostics::{Inspection, Prediction};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PulleyId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaintenanceLogId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InspectionId(pub String);

impl fmt::Display for PulleyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for InspectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operator-assigned health flag shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PulleyStatus {
    Healthy,
    Warning,
    Critical,
}

impl PulleyStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// Registered pulley with its latest dashboard readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pulley {
    pub id: PulleyId,
    pub name: String,
    pub status: PulleyStatus,
    pub temperature: f64,
    pub vibration: f64,
    pub last_maintenance: NaiveDate,
    pub next_maintenance: NaiveDate,
    /// Accumulated runtime in hours.
    pub runtime: f64,
}

/// Payload for registering a pulley; the id is assigned on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulleyDraft {
    pub name: String,
    pub status: PulleyStatus,
    pub temperature: f64,
    pub vibration: f64,
    pub last_maintenance: NaiveDate,
    pub next_maintenance: NaiveDate,
    pub runtime: f64,
}

impl Pulley {
    pub fn from_draft(id: PulleyId, draft: PulleyDraft) -> Self {
        let PulleyDraft {
            name,
            status,
            temperature,
            vibration,
            last_maintenance,
            next_maintenance,
            runtime,
        } = draft;

        Self {
            id,
            name,
            status,
            temperature,
            vibration,
            last_maintenance,
            next_maintenance,
            runtime,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceKind {
    Routine,
    Emergency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
    pub id: MaintenanceLogId,
    pub pulley_id: PulleyId,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: MaintenanceKind,
    pub description: String,
    pub technician: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLogDraft {
    pub pulley_id: PulleyId,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: MaintenanceKind,
    pub description: String,
    pub technician: String,
}

impl MaintenanceLog {
    pub fn from_draft(id: MaintenanceLogId, draft: MaintenanceLogDraft) -> Self {
        Self {
            id,
            pulley_id: draft.pulley_id,
            date: draft.date,
            kind: draft.kind,
            description: draft.description,
            technician: draft.technician,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualCondition {
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoiseLevel {
    Normal,
    Concerning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BeltAlignment {
    Aligned,
    SlightDeviation,
    SevereDeviation,
}

/// Manual inspection form as submitted by a field inspector.
///
/// Only `readings` feed the scoring engine; the remaining observations are
/// kept with the record for the maintenance history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualInspection {
    pub pulley_id: PulleyId,
    pub inspection_date: NaiveDate,
    pub inspector: String,
    #[serde(flatten)]
    pub readings: Inspection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_condition: Option<VisualCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_level: Option<NoiseLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belt_alignment: Option<BeltAlignment>,
    #[serde(default)]
    pub notes: String,
}

/// Stored inspection together with the prediction computed at submission time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRecord {
    pub id: InspectionId,
    #[serde(flatten)]
    pub submission: ManualInspection,
    pub prediction: Prediction,
}
