use crate::infra::{AppState, PortalService, StaffService};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use privilege_portal::catalog::{portal_router, staff_router};
use serde_json::json;
use std::sync::Arc;

/// Portal and staff APIs plus the operational endpoints. Expects an `AppState` extension layer.
pub(crate) fn with_service_routes(
    service: Arc<PortalService>,
    staff: Arc<StaffService>,
) -> axum::Router {
    portal_router(service)
        .merge(staff_router(staff))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{portal_service, staff_directory};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use privilege_portal::catalog::SeedData;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, Arc<AtomicBool>) {
        let readiness = Arc::new(AtomicBool::new(ready));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let mut seed = SeedData::standard();
        let staff = staff_directory(std::mem::take(&mut seed.staff));
        let router = with_service_routes(portal_service(seed), staff).layer(Extension(state));
        (router, readiness)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds")
    }

    #[tokio::test]
    async fn readiness_follows_flag() {
        let (router, readiness) = app(false);

        let response = router
            .clone()
            .oneshot(get("/ready"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        readiness.store(true, Ordering::Release);
        let response = router.oneshot(get("/ready")).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_and_metrics_are_served() {
        let (router, _) = app(true);

        let health = router
            .clone()
            .oneshot(get("/health"))
            .await
            .expect("router responds");
        assert_eq!(health.status(), StatusCode::OK);

        let metrics = router
            .oneshot(get("/metrics"))
            .await
            .expect("router responds");
        assert_eq!(metrics.status(), StatusCode::OK);
        assert_eq!(
            metrics.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn portal_routes_are_mounted() {
        let (router, _) = app(true);

        let response = router
            .oneshot(get("/api/students/66010001/dashboard"))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
            .await
            .expect("read body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(payload["achieved"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn staff_routes_are_mounted() {
        let (router, _) = app(true);

        let response = router
            .oneshot(get("/api/staff/staff001"))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
