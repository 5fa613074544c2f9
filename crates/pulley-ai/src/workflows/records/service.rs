use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{
    InspectionId, InspectionRecord, MaintenanceLog, MaintenanceLogDraft, MaintenanceLogId,
    ManualInspection, Pulley, PulleyDraft, PulleyId,
};
use super::repository::{RecordStore, RecordStoreError};
use super::validation::{check_inspection, check_maintenance_log, check_pulley, RecordViolation};
use crate::workflows::diagnostics::{DiagnosticEngine, RiskLevel};

/// Service composing validation, the record store and the diagnostic engine.
pub struct RecordService<S> {
    store: Arc<S>,
    engine: DiagnosticEngine,
}

static PULLEY_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static MAINTENANCE_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static INSPECTION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_pulley_id() -> PulleyId {
    let id = PULLEY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PulleyId(format!("pulley-{id:06}"))
}

fn next_maintenance_id() -> MaintenanceLogId {
    let id = MAINTENANCE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    MaintenanceLogId(format!("maint-{id:06}"))
}

fn next_inspection_id() -> InspectionId {
    let id = INSPECTION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    InspectionId(format!("insp-{id:06}"))
}

impl<S> RecordService<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            engine: DiagnosticEngine::new(),
        }
    }

    pub fn create_pulley(&self, draft: PulleyDraft) -> Result<Pulley, RecordServiceError> {
        check_pulley(&draft)?;
        let pulley = self
            .store
            .insert_pulley(Pulley::from_draft(next_pulley_id(), draft))?;
        info!(pulley_id = %pulley.id, name = %pulley.name, "pulley registered");
        Ok(pulley)
    }

    pub fn list_pulleys(&self) -> Result<Vec<Pulley>, RecordServiceError> {
        Ok(self.store.list_pulleys()?)
    }

    pub fn log_maintenance(
        &self,
        draft: MaintenanceLogDraft,
    ) -> Result<MaintenanceLog, RecordServiceError> {
        check_maintenance_log(&draft)?;
        self.require_pulley(&draft.pulley_id)?;

        let log = self
            .store
            .insert_maintenance_log(MaintenanceLog::from_draft(next_maintenance_id(), draft))?;
        info!(pulley_id = %log.pulley_id, kind = ?log.kind, "maintenance logged");
        Ok(log)
    }

    pub fn maintenance_logs(
        &self,
        pulley_id: Option<&PulleyId>,
    ) -> Result<Vec<MaintenanceLog>, RecordServiceError> {
        Ok(self.store.list_maintenance_logs(pulley_id)?)
    }

    /// Validate, score and store a manual inspection.
    pub fn submit_inspection(
        &self,
        submission: ManualInspection,
    ) -> Result<InspectionRecord, RecordServiceError> {
        if let Err(violation) = check_inspection(&submission) {
            warn!(pulley_id = %submission.pulley_id, %violation, "inspection rejected");
            return Err(violation.into());
        }
        self.require_pulley(&submission.pulley_id)?;

        let prediction = self.engine.evaluate(&submission.readings);
        let record = InspectionRecord {
            id: next_inspection_id(),
            submission,
            prediction,
        };
        let stored = self.store.insert_inspection(record)?;

        let prediction = &stored.prediction;
        if prediction.risk_level >= RiskLevel::High {
            warn!(
                inspection_id = %stored.id,
                pulley_id = %stored.submission.pulley_id,
                risk = prediction.risk_level.label(),
                failure_probability = prediction.failure_probability,
                factors = ?prediction.critical_factors,
                "inspection flagged for maintenance"
            );
        } else {
            info!(
                inspection_id = %stored.id,
                pulley_id = %stored.submission.pulley_id,
                risk = prediction.risk_level.label(),
                failure_probability = prediction.failure_probability,
                "inspection scored"
            );
        }

        Ok(stored)
    }

    pub fn inspection(&self, id: &InspectionId) -> Result<InspectionRecord, RecordServiceError> {
        let record = self
            .store
            .fetch_inspection(id)?
            .ok_or(RecordStoreError::NotFound)?;
        Ok(record)
    }

    pub fn inspections_for(
        &self,
        pulley_id: &PulleyId,
    ) -> Result<Vec<InspectionRecord>, RecordServiceError> {
        self.store
            .fetch_pulley(pulley_id)?
            .ok_or(RecordStoreError::NotFound)?;
        Ok(self.store.inspections_for(pulley_id)?)
    }

    fn require_pulley(&self, pulley_id: &PulleyId) -> Result<Pulley, RecordServiceError> {
        self.store
            .fetch_pulley(pulley_id)?
            .ok_or_else(|| RecordViolation::UnknownPulley(pulley_id.clone()).into())
    }
}

/// Error raised by the record service.
#[derive(Debug, thiserror::Error)]
pub enum RecordServiceError {
    #[error(transparent)]
    Validation(#[from] RecordViolation),
    #[error(transparent)]
    Store(#[from] RecordStoreError),
}
