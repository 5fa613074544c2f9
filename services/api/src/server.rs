use crate::cli::ServeArgs;
use crate::infra::{seed_demo_pulleys, AppState, InMemoryRecordStore};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use pulley_ai::config::AppConfig;
use pulley_ai::error::AppError;
use pulley_ai::telemetry;
use pulley_ai::workflows::records::RecordService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryRecordStore::default());
    let record_service = Arc::new(RecordService::new(store));

    if config.records.seed_demo_data {
        let seeded = seed_demo_pulleys(&*record_service, Local::now().date_naive())?;
        info!(pulleys = seeded.len(), "seeded demo pulleys");
    }

    let app = with_service_routes(record_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "pulley inspection service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
