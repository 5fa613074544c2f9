use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    InspectionId, InspectionRecord, MaintenanceLog, MaintenanceLogDraft, ManualInspection, Pulley,
    PulleyDraft, PulleyId,
};
use super::repository::{RecordStore, RecordStoreError};
use super::service::{RecordService, RecordServiceError};
use crate::error::AppError;

/// Router exposing pulley, maintenance and inspection records.
pub fn records_router<S>(service: Arc<RecordService<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route(
            "/api/pulleys",
            get(list_pulleys_handler::<S>).post(create_pulley_handler::<S>),
        )
        .route(
            "/api/pulleys/:pulley_id/inspections",
            get(pulley_inspections_handler::<S>),
        )
        .route(
            "/api/maintenance",
            get(list_maintenance_handler::<S>).post(create_maintenance_handler::<S>),
        )
        .route(
            "/api/inspections",
            axum::routing::post(submit_inspection_handler::<S>),
        )
        .route(
            "/api/inspections/:inspection_id",
            get(inspection_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MaintenanceQuery {
    pub(crate) pulley_id: Option<String>,
}

pub(crate) async fn list_pulleys_handler<S>(
    State(service): State<Arc<RecordService<S>>>,
) -> Result<Json<Vec<Pulley>>, AppError>
where
    S: RecordStore + 'static,
{
    Ok(Json(service.list_pulleys()?))
}

pub(crate) async fn create_pulley_handler<S>(
    State(service): State<Arc<RecordService<S>>>,
    Json(draft): Json<PulleyDraft>,
) -> Result<(StatusCode, Json<Pulley>), AppError>
where
    S: RecordStore + 'static,
{
    let pulley = service.create_pulley(draft)?;
    Ok((StatusCode::CREATED, Json(pulley)))
}

pub(crate) async fn list_maintenance_handler<S>(
    State(service): State<Arc<RecordService<S>>>,
    Query(query): Query<MaintenanceQuery>,
) -> Result<Json<Vec<MaintenanceLog>>, AppError>
where
    S: RecordStore + 'static,
{
    let pulley_id = query.pulley_id.map(PulleyId);
    Ok(Json(service.maintenance_logs(pulley_id.as_ref())?))
}

pub(crate) async fn create_maintenance_handler<S>(
    State(service): State<Arc<RecordService<S>>>,
    Json(draft): Json<MaintenanceLogDraft>,
) -> Result<(StatusCode, Json<MaintenanceLog>), AppError>
where
    S: RecordStore + 'static,
{
    let log = service.log_maintenance(draft)?;
    Ok((StatusCode::CREATED, Json(log)))
}

pub(crate) async fn submit_inspection_handler<S>(
    State(service): State<Arc<RecordService<S>>>,
    Json(submission): Json<ManualInspection>,
) -> Result<(StatusCode, Json<InspectionRecord>), AppError>
where
    S: RecordStore + 'static,
{
    let record = service.submit_inspection(submission)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) async fn inspection_handler<S>(
    State(service): State<Arc<RecordService<S>>>,
    Path(inspection_id): Path<String>,
) -> Result<Response, AppError>
where
    S: RecordStore + 'static,
{
    let id = InspectionId(inspection_id);
    match service.inspection(&id) {
        Ok(record) => Ok(Json(record).into_response()),
        Err(RecordServiceError::Store(RecordStoreError::NotFound)) => {
            let payload = json!({
                "inspectionId": id.0,
                "error": "inspection not found",
            });
            Ok((StatusCode::NOT_FOUND, Json(payload)).into_response())
        }
        Err(error) => Err(error.into()),
    }
}

pub(crate) async fn pulley_inspections_handler<S>(
    State(service): State<Arc<RecordService<S>>>,
    Path(pulley_id): Path<String>,
) -> Result<Json<Vec<InspectionRecord>>, AppError>
where
    S: RecordStore + 'static,
{
    Ok(Json(service.inspections_for(&PulleyId(pulley_id))?))
}
