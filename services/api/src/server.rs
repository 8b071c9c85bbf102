use crate::cli::ServeArgs;
use crate::infra::{load_catalog, portal_service, staff_directory, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use privilege_portal::config::AppConfig;
use privilege_portal::error::AppError;
use privilege_portal::telemetry;
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

    let mut seed = load_catalog(&config.catalog)?;
    info!(
        privileges = seed.privileges.len(),
        students = seed.students.len(),
        staff = seed.staff.len(),
        "catalog loaded"
    );
    let staff = staff_directory(std::mem::take(&mut seed.staff));
    let service = portal_service(seed);

    let app = with_service_routes(service, staff)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "privilege portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}
