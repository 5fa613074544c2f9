//! Pulley, maintenance-log and inspection records.
//!
//! Inspections submitted here are scored by the diagnostic engine at intake and
//! stored with their prediction. Storage sits behind [`RecordStore`] so the
//! service and router can run against any backend.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    BeltAlignment, InspectionId, InspectionRecord, MaintenanceKind, MaintenanceLog,
    MaintenanceLogDraft, MaintenanceLogId, ManualInspection, NoiseLevel, Pulley, PulleyDraft,
    PulleyId, PulleyStatus, VisualCondition,
};
pub use repository::{RecordStore, RecordStoreError};
pub use router::records_router;
pub use service::{RecordService, RecordServiceError};
pub use validation::RecordViolation;
