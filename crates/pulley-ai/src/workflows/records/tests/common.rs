use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::diagnostics::{
    BearingCondition, BeltTracking, Inspection, LubricationStatus, SurfaceWear,
};
use crate::workflows::records::domain::{
    BeltAlignment, InspectionId, InspectionRecord, MaintenanceKind, MaintenanceLog,
    MaintenanceLogDraft, ManualInspection, NoiseLevel, Pulley, PulleyDraft, PulleyId,
    PulleyStatus, VisualCondition,
};
use crate::workflows::records::repository::{RecordStore, RecordStoreError};
use crate::workflows::records::{records_router, RecordService};

#[derive(Default)]
pub(super) struct MemoryStore {
    pulleys: Mutex<BTreeMap<PulleyId, Pulley>>,
    logs: Mutex<Vec<MaintenanceLog>>,
    inspections: Mutex<BTreeMap<InspectionId, InspectionRecord>>,
}

impl RecordStore for MemoryStore {
    fn insert_pulley(&self, pulley: Pulley) -> Result<Pulley, RecordStoreError> {
        let mut guard = self.pulleys.lock().expect("pulley mutex poisoned");
        if guard.contains_key(&pulley.id) {
            return Err(RecordStoreError::Conflict);
        }
        guard.insert(pulley.id.clone(), pulley.clone());
        Ok(pulley)
    }

    fn fetch_pulley(&self, id: &PulleyId) -> Result<Option<Pulley>, RecordStoreError> {
        let guard = self.pulleys.lock().expect("pulley mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_pulleys(&self) -> Result<Vec<Pulley>, RecordStoreError> {
        let guard = self.pulleys.lock().expect("pulley mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn insert_maintenance_log(
        &self,
        log: MaintenanceLog,
    ) -> Result<MaintenanceLog, RecordStoreError> {
        let mut guard = self.logs.lock().expect("log mutex poisoned");
        guard.push(log.clone());
        Ok(log)
    }

    fn list_maintenance_logs(
        &self,
        pulley_id: Option<&PulleyId>,
    ) -> Result<Vec<MaintenanceLog>, RecordStoreError> {
        let guard = self.logs.lock().expect("log mutex poisoned");
        Ok(guard
            .iter()
            .filter(|log| pulley_id.map_or(true, |id| &log.pulley_id == id))
            .cloned()
            .collect())
    }

    fn insert_inspection(
        &self,
        record: InspectionRecord,
    ) -> Result<InspectionRecord, RecordStoreError> {
        let mut guard = self.inspections.lock().expect("inspection mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RecordStoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch_inspection(
        &self,
        id: &InspectionId,
    ) -> Result<Option<InspectionRecord>, RecordStoreError> {
        let guard = self.inspections.lock().expect("inspection mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn inspections_for(
        &self,
        pulley_id: &PulleyId,
    ) -> Result<Vec<InspectionRecord>, RecordStoreError> {
        let guard = self.inspections.lock().expect("inspection mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.submission.pulley_id == pulley_id)
            .cloned()
            .collect())
    }
}

/// Store whose reads succeed but whose writes are refused.
pub(super) struct UnavailableStore;

impl RecordStore for UnavailableStore {
    fn insert_pulley(&self, _pulley: Pulley) -> Result<Pulley, RecordStoreError> {
        Err(RecordStoreError::Unavailable("maintenance window".to_string()))
    }

    fn fetch_pulley(&self, id: &PulleyId) -> Result<Option<Pulley>, RecordStoreError> {
        Ok(Some(Pulley::from_draft(id.clone(), pulley_draft("Ghost"))))
    }

    fn list_pulleys(&self) -> Result<Vec<Pulley>, RecordStoreError> {
        Err(RecordStoreError::Unavailable("maintenance window".to_string()))
    }

    fn insert_maintenance_log(
        &self,
        _log: MaintenanceLog,
    ) -> Result<MaintenanceLog, RecordStoreError> {
        Err(RecordStoreError::Unavailable("maintenance window".to_string()))
    }

    fn list_maintenance_logs(
        &self,
        _pulley_id: Option<&PulleyId>,
    ) -> Result<Vec<MaintenanceLog>, RecordStoreError> {
        Ok(Vec::new())
    }

    fn insert_inspection(
        &self,
        _record: InspectionRecord,
    ) -> Result<InspectionRecord, RecordStoreError> {
        Err(RecordStoreError::Unavailable("maintenance window".to_string()))
    }

    fn fetch_inspection(
        &self,
        _id: &InspectionId,
    ) -> Result<Option<InspectionRecord>, RecordStoreError> {
        Ok(None)
    }

    fn inspections_for(
        &self,
        _pulley_id: &PulleyId,
    ) -> Result<Vec<InspectionRecord>, RecordStoreError> {
        Ok(Vec::new())
    }
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn pulley_draft(name: &str) -> PulleyDraft {
    PulleyDraft {
        name: name.to_string(),
        status: PulleyStatus::Healthy,
        temperature: 42.5,
        vibration: 2.3,
        last_maintenance: date(2024, 1, 15),
        next_maintenance: date(2024, 4, 15),
        runtime: 2160.0,
    }
}

pub(super) fn maintenance_draft(pulley_id: &PulleyId) -> MaintenanceLogDraft {
    MaintenanceLogDraft {
        pulley_id: pulley_id.clone(),
        date: date(2024, 2, 1),
        kind: MaintenanceKind::Routine,
        description: "Regreased drive-end bearing".to_string(),
        technician: "R. Okafor".to_string(),
    }
}

pub(super) fn healthy_readings() -> Inspection {
    Inspection {
        temperature: Some(25.0),
        bearing_temperature: Some(40.0),
        speed: Some(100.0),
        tension: Some(1000.0),
        surface_wear: Some(SurfaceWear::None),
        belt_tracking: Some(BeltTracking::Centered),
        bearing_condition: Some(BearingCondition::Good),
        lubrication_status: Some(LubricationStatus::Adequate),
    }
}

pub(super) fn failing_readings() -> Inspection {
    Inspection {
        bearing_condition: Some(BearingCondition::Poor),
        lubrication_status: Some(LubricationStatus::Critical),
        ..healthy_readings()
    }
}

pub(super) fn inspection(pulley_id: &PulleyId, readings: Inspection) -> ManualInspection {
    ManualInspection {
        pulley_id: pulley_id.clone(),
        inspection_date: date(2024, 3, 2),
        inspector: "J. Lindqvist".to_string(),
        readings,
        humidity: Some(50.0),
        force: Some(500.0),
        visual_condition: Some(VisualCondition::Good),
        noise_level: Some(NoiseLevel::Normal),
        belt_alignment: Some(BeltAlignment::Aligned),
        notes: String::new(),
    }
}

pub(super) fn build_service() -> (Arc<RecordService<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(RecordService::new(store.clone()));
    (service, store)
}

pub(super) fn registered_pulley(service: &RecordService<MemoryStore>) -> Pulley {
    service
        .create_pulley(pulley_draft("Head pulley P-101"))
        .expect("pulley registers")
}

pub(super) fn router_with_service(service: Arc<RecordService<MemoryStore>>) -> axum::Router {
    records_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
