use axum::{routing::post, Json, Router};

use super::domain::Inspection;
use super::evaluation::{DiagnosticEngine, Prediction};
use crate::error::AppError;

/// Stateless scoring endpoint; nothing is stored.
pub fn diagnostics_router() -> Router {
    Router::new().route("/api/v1/predictions", post(prediction_handler))
}

pub(crate) async fn prediction_handler(
    Json(inspection): Json<Inspection>,
) -> Result<Json<Prediction>, AppError> {
    inspection.validate()?;
    Ok(Json(DiagnosticEngine::new().evaluate(&inspection)))
}
