use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::diagnostics::{InspectionError, InspectionImportError};
use crate::workflows::records::{RecordServiceError, RecordStoreError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Inspection(InspectionError),
    Import(InspectionImportError),
    Records(RecordServiceError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Inspection(_) | AppError::Records(RecordServiceError::Validation(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Records(RecordServiceError::Store(RecordStoreError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Records(RecordServiceError::Store(RecordStoreError::Conflict)) => {
                StatusCode::CONFLICT
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Records(RecordServiceError::Store(RecordStoreError::Unavailable(_))) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Inspection(err) => write!(f, "invalid inspection: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Records(err) => write!(f, "record error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Inspection(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Records(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // request errors report the underlying cause without the category prefix
        let message = match &self {
            AppError::Inspection(err) => err.to_string(),
            AppError::Import(err) => err.to_string(),
            AppError::Records(err) => err.to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<InspectionError> for AppError {
    fn from(value: InspectionError) -> Self {
        Self::Inspection(value)
    }
}

impl From<InspectionImportError> for AppError {
    fn from(value: InspectionImportError) -> Self {
        Self::Import(value)
    }
}

impl From<RecordServiceError> for AppError {
    fn from(value: RecordServiceError) -> Self {
        Self::Records(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::records::{PulleyId, RecordViolation};

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    #[test]
    fn status_mapping_covers_request_and_store_errors() {
        let cases = [
            (
                AppError::from(RecordServiceError::Validation(RecordViolation::BlankField(
                    "inspector",
                ))),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::from(InspectionError::NonFiniteReading {
                    field: "speed",
                    value: f64::INFINITY,
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::from(RecordServiceError::Store(RecordStoreError::NotFound)),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(RecordServiceError::Store(RecordStoreError::Conflict)),
                StatusCode::CONFLICT,
            ),
            (
                AppError::from(RecordServiceError::Store(RecordStoreError::Unavailable(
                    "disk full".to_string(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::from(std::io::Error::new(std::io::ErrorKind::Other, "closed")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status(), expected, "{error}");
        }
    }

    #[tokio::test]
    async fn request_errors_report_the_underlying_cause() {
        let err = AppError::from(RecordServiceError::Validation(
            RecordViolation::UnknownPulley(PulleyId("pulley-404".to_string())),
        ));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = body_of(response).await;
        assert_eq!(payload["error"], "unknown pulley 'pulley-404'");
    }

    #[tokio::test]
    async fn internal_errors_keep_their_category() {
        let err = AppError::from(std::io::Error::new(std::io::ErrorKind::Other, "closed"));
        let payload = body_of(err.into_response()).await;
        assert_eq!(payload["error"], "io error: closed");
    }
}
