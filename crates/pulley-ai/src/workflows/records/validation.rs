use chrono::NaiveDate;

use super::domain::{MaintenanceLogDraft, ManualInspection, PulleyDraft, PulleyId};
use crate::workflows::diagnostics::InspectionError;

/// Submission problems the record service refuses before touching storage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordViolation {
    #[error("{0} must not be blank")]
    BlankField(&'static str),
    #[error("{field} must be a non-negative finite number")]
    InvalidMeasurement { field: &'static str },
    #[error("next maintenance {next} is scheduled before last maintenance {last}")]
    MaintenanceWindow { last: NaiveDate, next: NaiveDate },
    #[error("unknown pulley '{0}'")]
    UnknownPulley(PulleyId),
    #[error(transparent)]
    Reading(#[from] InspectionError),
}

fn require_text(field: &'static str, value: &str) -> Result<(), RecordViolation> {
    if value.trim().is_empty() {
        Err(RecordViolation::BlankField(field))
    } else {
        Ok(())
    }
}

fn require_measurement(field: &'static str, value: f64) -> Result<(), RecordViolation> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RecordViolation::InvalidMeasurement { field })
    }
}

pub(crate) fn check_pulley(draft: &PulleyDraft) -> Result<(), RecordViolation> {
    require_text("name", &draft.name)?;
    require_measurement("vibration", draft.vibration)?;
    require_measurement("runtime", draft.runtime)?;

    if draft.next_maintenance < draft.last_maintenance {
        return Err(RecordViolation::MaintenanceWindow {
            last: draft.last_maintenance,
            next: draft.next_maintenance,
        });
    }

    Ok(())
}

pub(crate) fn check_maintenance_log(draft: &MaintenanceLogDraft) -> Result<(), RecordViolation> {
    require_text("pulleyId", &draft.pulley_id.0)?;
    require_text("description", &draft.description)?;
    require_text("technician", &draft.technician)
}

pub(crate) fn check_inspection(submission: &ManualInspection) -> Result<(), RecordViolation> {
    require_text("pulleyId", &submission.pulley_id.0)?;
    require_text("inspector", &submission.inspector)?;
    submission.readings.validate()?;

    if let Some(humidity) = submission.humidity {
        require_measurement("humidity", humidity)?;
    }
    if let Some(force) = submission.force {
        require_measurement("force", force)?;
    }

    Ok(())
}
