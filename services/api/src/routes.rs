use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use claim_rating::rating::{assessment_router, ClaimRatingService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_assessment_routes(service: Arc<ClaimRatingService>) -> axum::Router {
    assessment_router(service)
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
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        }
    }

    fn app(state: AppState) -> axum::Router {
        with_assessment_routes(Arc::new(ClaimRatingService::default())).layer(Extension(state))
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let state = state(false);
        let flag = state.readiness.clone();
        let router = app(state);

        let response = router
            .clone()
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        flag.store(true, Ordering::Release);
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn engine_routes_are_mounted_alongside_probes() {
        let router = app(state(true));

        let health = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(health.status(), StatusCode::OK);

        let catalog = router
            .oneshot(
                Request::get("/api/v1/catalog/conditions")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(catalog.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_endpoint_renders_text() {
        let response = metrics_endpoint(Extension(state(true))).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }
}
