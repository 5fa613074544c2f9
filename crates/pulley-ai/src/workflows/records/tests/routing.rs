use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::records::router::submit_inspection_handler;
use crate::workflows::records::RecordService;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serializes")))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn create_and_list_pulleys() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/pulleys",
            json!({
                "name": "Head pulley P-101",
                "status": "warning",
                "temperature": 48.0,
                "vibration": 3.1,
                "lastMaintenance": "2024-01-10",
                "nextMaintenance": "2024-03-10",
                "runtime": 1450
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json_body(response).await;
    assert_eq!(created["status"], json!("warning"));
    assert!(created["id"]
        .as_str()
        .expect("id string")
        .starts_with("pulley-"));

    let response = router
        .oneshot(get("/api/pulleys"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let listed = read_json_body(response).await;
    assert_eq!(listed.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn submitting_inspection_returns_prediction() {
    let (service, _) = build_service();
    let pulley = registered_pulley(&service);
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/inspections",
            json!({
                "pulleyId": pulley.id.0,
                "inspectionDate": "2024-03-02",
                "inspector": "J. Lindqvist",
                "temperature": 65,
                "surfaceWear": "severe",
                "noiseLevel": "concerning",
                "notes": "Lagging worn at the centre"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let record = read_json_body(response).await;
    assert_eq!(record["pulleyId"], json!(pulley.id.0));
    assert_eq!(record["surfaceWear"], json!("severe"));
    assert_eq!(
        record["prediction"]["criticalFactors"],
        json!(["High operating temperature", "Severe surface wear"])
    );
    assert_eq!(record["prediction"]["riskLevel"], json!("high"));

    let id = record["id"].as_str().expect("id string").to_string();
    let response = router
        .clone()
        .oneshot(get(&format!("/api/inspections/{id}")))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(get(&format!("/api/pulleys/{}/inspections", pulley.id.0)))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let history = read_json_body(response).await;
    assert_eq!(history.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn inspection_with_invalid_token_is_unprocessable() {
    let (service, _) = build_service();
    let pulley = registered_pulley(&service);
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/inspections",
            json!({
                "pulleyId": pulley.id.0,
                "inspectionDate": "2024-03-02",
                "inspector": "J. Lindqvist",
                "bearingCondition": "terrible"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn inspection_for_unknown_pulley_is_unprocessable() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/inspections",
            json!({
                "pulleyId": "pulley-nowhere",
                "inspectionDate": "2024-03-02",
                "inspector": "J. Lindqvist"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("unknown pulley 'pulley-nowhere'"));
}

#[tokio::test]
async fn missing_inspection_returns_not_found() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(get("/api/inspections/insp-000000"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["inspectionId"], json!("insp-000000"));
    assert!(payload.get("inspection_id").is_none());
}

#[tokio::test]
async fn maintenance_logs_can_be_filtered() {
    let (service, _) = build_service();
    let head = registered_pulley(&service);
    let tail = service
        .create_pulley(pulley_draft("Tail pulley"))
        .expect("tail pulley");
    service
        .log_maintenance(maintenance_draft(&tail.id))
        .expect("tail log");
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/maintenance",
            json!({
                "pulleyId": head.id.0,
                "date": "2024-02-20",
                "type": "emergency",
                "description": "Replaced seized bearing",
                "technician": "M. Duarte"
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json_body(response).await;
    assert_eq!(created["type"], json!("emergency"));

    let response = router
        .oneshot(get(&format!("/api/maintenance?pulley_id={}", head.id.0)))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let logs = read_json_body(response).await;
    let logs = logs.as_array().expect("array");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["technician"], json!("M. Duarte"));
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_store_failure() {
    let service = Arc::new(RecordService::new(Arc::new(UnavailableStore)));
    let pulley_id = crate::workflows::records::PulleyId("pulley-000001".to_string());

    let response = submit_inspection_handler::<UnavailableStore>(
        State(service),
        axum::Json(inspection(&pulley_id, healthy_readings())),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        json!("record store unavailable: maintenance window")
    );
}

#[tokio::test]
async fn store_outage_on_listing_is_an_internal_error() {
    let service = Arc::new(RecordService::new(Arc::new(UnavailableStore)));
    let router = crate::workflows::records::records_router(service);

    let response = router
        .oneshot(get("/api/pulleys"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn invalid_pulley_draft_is_unprocessable_with_cause() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/pulleys",
            json!({
                "name": "  ",
                "status": "healthy",
                "temperature": 40.0,
                "vibration": 2.0,
                "lastMaintenance": "2024-01-10",
                "nextMaintenance": "2024-03-10",
                "runtime": 100
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("name must not be blank"));
}
