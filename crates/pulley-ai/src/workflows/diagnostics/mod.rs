//! Diagnostic scoring for pulley inspections.
//!
//! An [`Inspection`] is scored against a fixed table of hand-tuned rules. Each rule
//! that fires adds a probability increment and explanation text; the capped total
//! drives the risk tier, maintenance urgency, remaining life and health score of
//! the resulting [`Prediction`]. The engine is deterministic and has no state.

pub mod domain;
pub mod evaluation;
pub mod import;
pub mod router;

pub use domain::{
    BearingCondition, BeltTracking, Inspection, InspectionError, LubricationStatus, SurfaceWear,
};
pub use evaluation::{
    evaluate, ConditionAnalysis, ConditionStatus, DiagnosticEngine, MaintenanceUrgency,
    Prediction, RiskLevel, RuleHit, Signal, Trend,
};
pub use import::{InspectionImportError, InspectionImporter};
pub use router::diagnostics_router;
