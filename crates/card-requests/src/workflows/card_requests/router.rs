use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::debug;

use super::evaluation::ScoreSource;
use super::events::{InboundEvent, StoreEvent};
use super::handlers::{
    delete_request_handler, fetch_request_handler, list_requests_handler,
    process_store_event_handler, submit_request_handler, HandlerResponse,
};
use super::service::CardRequestLifecycle;
use super::store::CardRequestStore;

/// Router builder exposing the request handlers and the store-notification hook over HTTP.
pub fn card_request_router<S, C>(lifecycle: Arc<CardRequestLifecycle<S, C>>) -> Router
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    Router::new()
        .route(
            "/api/v1/card-requests",
            post(submit_handler::<S, C>).get(list_handler::<S, C>),
        )
        .route(
            "/api/v1/card-requests/:id",
            get(fetch_handler::<S, C>).delete(delete_handler::<S, C>),
        )
        .route("/api/v1/store-events", post(store_event_handler::<S, C>))
        .with_state(lifecycle)
}

fn respond(response: HandlerResponse) -> Response {
    (response.status_code(), Json(response)).into_response()
}

pub(crate) async fn submit_handler<S, C>(
    State(lifecycle): State<Arc<CardRequestLifecycle<S, C>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    // An unreadable body is handed over as absent and answered like any invalid submission.
    let event = match body {
        Ok(Json(body)) => InboundEvent::with_body(body),
        Err(rejection) => {
            debug!(error = %rejection, "submit body is not valid json");
            InboundEvent::default()
        }
    };
    respond(submit_request_handler(&lifecycle, &event))
}

pub(crate) async fn list_handler<S, C>(
    State(lifecycle): State<Arc<CardRequestLifecycle<S, C>>>,
) -> Response
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    respond(list_requests_handler(&lifecycle))
}

pub(crate) async fn fetch_handler<S, C>(
    State(lifecycle): State<Arc<CardRequestLifecycle<S, C>>>,
    Path(id): Path<String>,
) -> Response
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    respond(fetch_request_handler(&lifecycle, &InboundEvent::with_path_id(id)))
}

pub(crate) async fn delete_handler<S, C>(
    State(lifecycle): State<Arc<CardRequestLifecycle<S, C>>>,
    Path(id): Path<String>,
) -> Response
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    respond(delete_request_handler(&lifecycle, &InboundEvent::with_path_id(id)))
}

pub(crate) async fn store_event_handler<S, C>(
    State(lifecycle): State<Arc<CardRequestLifecycle<S, C>>>,
    Json(event): Json<StoreEvent>,
) -> Response
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    let report = process_store_event_handler(&lifecycle, &event);
    (StatusCode::ACCEPTED, Json(report)).into_response()
}
