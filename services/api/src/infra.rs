use chrono::{Duration, NaiveDate};
use metrics_exporter_prometheus::PrometheusHandle;
use pulley_ai::workflows::records::{
    InspectionId, InspectionRecord, MaintenanceKind, MaintenanceLog, MaintenanceLogDraft, Pulley,
    PulleyDraft, PulleyId, PulleyStatus, RecordService, RecordServiceError, RecordStore,
    RecordStoreError,
};
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRecordStore {
    pulleys: Arc<Mutex<BTreeMap<PulleyId, Pulley>>>,
    maintenance: Arc<Mutex<Vec<MaintenanceLog>>>,
    inspections: Arc<Mutex<BTreeMap<InspectionId, InspectionRecord>>>,
}

impl RecordStore for InMemoryRecordStore {
    fn insert_pulley(&self, pulley: Pulley) -> Result<Pulley, RecordStoreError> {
        let mut guard = self.pulleys.lock().expect("pulley store mutex poisoned");
        if guard.contains_key(&pulley.id) {
            return Err(RecordStoreError::Conflict);
        }
        guard.insert(pulley.id.clone(), pulley.clone());
        Ok(pulley)
    }

    fn fetch_pulley(&self, id: &PulleyId) -> Result<Option<Pulley>, RecordStoreError> {
        let guard = self.pulleys.lock().expect("pulley store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_pulleys(&self) -> Result<Vec<Pulley>, RecordStoreError> {
        let guard = self.pulleys.lock().expect("pulley store mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn insert_maintenance_log(
        &self,
        log: MaintenanceLog,
    ) -> Result<MaintenanceLog, RecordStoreError> {
        let mut guard = self
            .maintenance
            .lock()
            .expect("maintenance store mutex poisoned");
        if guard.iter().any(|existing| existing.id == log.id) {
            return Err(RecordStoreError::Conflict);
        }
        guard.push(log.clone());
        Ok(log)
    }

    fn list_maintenance_logs(
        &self,
        pulley_id: Option<&PulleyId>,
    ) -> Result<Vec<MaintenanceLog>, RecordStoreError> {
        let guard = self
            .maintenance
            .lock()
            .expect("maintenance store mutex poisoned");
        let mut logs: Vec<MaintenanceLog> = guard
            .iter()
            .filter(|log| pulley_id.map_or(true, |id| &log.pulley_id == id))
            .cloned()
            .collect();
        logs.sort_by(|left, right| right.date.cmp(&left.date));
        Ok(logs)
    }

    fn insert_inspection(
        &self,
        record: InspectionRecord,
    ) -> Result<InspectionRecord, RecordStoreError> {
        let mut guard = self
            .inspections
            .lock()
            .expect("inspection store mutex poisoned");
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
        let guard = self
            .inspections
            .lock()
            .expect("inspection store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn inspections_for(
        &self,
        pulley_id: &PulleyId,
    ) -> Result<Vec<InspectionRecord>, RecordStoreError> {
        let guard = self
            .inspections
            .lock()
            .expect("inspection store mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.submission.pulley_id == pulley_id)
            .cloned()
            .collect())
    }
}

struct SamplePulley {
    name: &'static str,
    status: PulleyStatus,
    temperature: f64,
    vibration: f64,
    days_since_service: i64,
    service_interval_days: i64,
    runtime: f64,
    last_service: MaintenanceKind,
    service_note: &'static str,
    technician: &'static str,
}

const SAMPLE_PULLEYS: [SamplePulley; 3] = [
    SamplePulley {
        name: "Head pulley P-101",
        status: PulleyStatus::Healthy,
        temperature: 42.5,
        vibration: 2.1,
        days_since_service: 21,
        service_interval_days: 90,
        runtime: 2160.0,
        last_service: MaintenanceKind::Routine,
        service_note: "Regreased drive-end bearing and checked lagging",
        technician: "R. Okafor",
    },
    SamplePulley {
        name: "Tail pulley P-102",
        status: PulleyStatus::Warning,
        temperature: 56.0,
        vibration: 4.8,
        days_since_service: 64,
        service_interval_days: 75,
        runtime: 3890.0,
        last_service: MaintenanceKind::Routine,
        service_note: "Adjusted take-up tension after belt splice",
        technician: "M. Duarte",
    },
    SamplePulley {
        name: "Snub pulley P-103",
        status: PulleyStatus::Critical,
        temperature: 68.0,
        vibration: 7.4,
        days_since_service: 9,
        service_interval_days: 30,
        runtime: 5120.0,
        last_service: MaintenanceKind::Emergency,
        service_note: "Replaced seized non-drive bearing",
        technician: "J. Lindqvist",
    },
];

/// Registers the sample fleet with one maintenance entry per pulley.
pub(crate) fn seed_demo_pulleys<S>(
    service: &RecordService<S>,
    today: NaiveDate,
) -> Result<Vec<Pulley>, RecordServiceError>
where
    S: RecordStore + 'static,
{
    let mut pulleys = Vec::with_capacity(SAMPLE_PULLEYS.len());
    for sample in &SAMPLE_PULLEYS {
        let last_maintenance = today - Duration::days(sample.days_since_service);
        let pulley = service.create_pulley(PulleyDraft {
            name: sample.name.to_string(),
            status: sample.status,
            temperature: sample.temperature,
            vibration: sample.vibration,
            last_maintenance,
            next_maintenance: last_maintenance + Duration::days(sample.service_interval_days),
            runtime: sample.runtime,
        })?;

        service.log_maintenance(MaintenanceLogDraft {
            pulley_id: pulley.id.clone(),
            date: last_maintenance,
            kind: sample.last_service,
            description: sample.service_note.to_string(),
            technician: sample.technician.to_string(),
        })?;

        pulleys.push(pulley);
    }
    Ok(pulleys)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
