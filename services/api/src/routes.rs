use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use card_requests::workflows::card_requests::{
    card_request_router, CardRequestLifecycle, CardRequestStore, ScoreSource,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_card_request_routes<S, C>(
    lifecycle: Arc<CardRequestLifecycle<S, C>>,
) -> axum::Router
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    card_request_router(lifecycle)
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
    use crate::infra::InMemoryCardRequestStore;
    use axum::body::Body;
    use axum::http::Request;
    use card_requests::workflows::card_requests::{FixedScoreSource, LifecycleConfig};
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let lifecycle = CardRequestLifecycle::new(
            Arc::new(InMemoryCardRequestStore::new("cards")),
            Arc::new(FixedScoreSource(500)),
            LifecycleConfig {
                container: "cards".to_string(),
                currency_symbol: "R$".to_string(),
            },
        );
        with_card_request_routes(Arc::new(lifecycle))
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = router()
            .oneshot(
                Request::get("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn card_request_routes_are_mounted() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/card-requests")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
