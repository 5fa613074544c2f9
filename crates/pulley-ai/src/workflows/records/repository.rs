use super::domain::{InspectionId, InspectionRecord, MaintenanceLog, Pulley, PulleyId};

/// Storage abstraction so the record service can be exercised in isolation.
pub trait RecordStore: Send + Sync {
    fn insert_pulley(&self, pulley: Pulley) -> Result<Pulley, RecordStoreError>;
    fn fetch_pulley(&self, id: &PulleyId) -> Result<Option<Pulley>, RecordStoreError>;
    fn list_pulleys(&self) -> Result<Vec<Pulley>, RecordStoreError>;

    fn insert_maintenance_log(
        &self,
        log: MaintenanceLog,
    ) -> Result<MaintenanceLog, RecordStoreError>;
    /// All logs, or only those for `pulley_id` when given.
    fn list_maintenance_logs(
        &self,
        pulley_id: Option<&PulleyId>,
    ) -> Result<Vec<MaintenanceLog>, RecordStoreError>;

    fn insert_inspection(
        &self,
        record: InspectionRecord,
    ) -> Result<InspectionRecord, RecordStoreError>;
    fn fetch_inspection(
        &self,
        id: &InspectionId,
    ) -> Result<Option<InspectionRecord>, RecordStoreError>;
    fn inspections_for(&self, pulley_id: &PulleyId)
        -> Result<Vec<InspectionRecord>, RecordStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
