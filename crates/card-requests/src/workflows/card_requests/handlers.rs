//! Event-shaped entry points: each handler takes a platform event and returns the JSON
//! result the platform hands back to the caller, with the status code embedded.

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use super::domain::CardRequest;
use super::evaluation::ScoreSource;
use super::events::{InboundEvent, StoreEvent};
use super::service::{CardRequestLifecycle, LifecycleError, NotFoundKind, ScoreReport};
use super::store::CardRequestStore;

pub const SUBMITTED_MESSAGE: &str = "request submitted for approval";
pub const DELETED_MESSAGE: &str = "request deleted";
pub const REQUEST_NOT_FOUND_MESSAGE: &str = "request not found";
pub const LIST_NOT_FOUND_MESSAGE: &str = "request list not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error while processing the request";

/// Handler result: `status` plus either a message, the request list, or a single request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerResponse {
    pub status: u16,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Message { msg: String },
    RequestList { requests_list: Vec<CardRequest> },
    Request(CardRequest),
}

impl HandlerResponse {
    fn new(status: StatusCode, payload: ResponsePayload) -> Self {
        Self {
            status: status.as_u16(),
            payload,
        }
    }

    fn message(status: StatusCode, msg: impl Into<String>) -> Self {
        Self::new(status, ResponsePayload::Message { msg: msg.into() })
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn message_text(&self) -> Option<&str> {
        match &self.payload {
            ResponsePayload::Message { msg } => Some(msg.as_str()),
            _ => None,
        }
    }
}

impl From<LifecycleError> for HandlerResponse {
    fn from(err: LifecycleError) -> Self {
        match err {
            // Intake refusals are reported as 500 with the field message.
            LifecycleError::Validation(reason) => {
                Self::message(StatusCode::INTERNAL_SERVER_ERROR, reason.to_string())
            }
            LifecycleError::NotFound(NotFoundKind::RequestList) => {
                Self::message(StatusCode::NOT_FOUND, LIST_NOT_FOUND_MESSAGE)
            }
            LifecycleError::NotFound(NotFoundKind::Request(_)) => {
                Self::message(StatusCode::NOT_FOUND, REQUEST_NOT_FOUND_MESSAGE)
            }
            LifecycleError::Scoring(cause) => {
                error!(error = %cause, "card request scoring failure");
                Self::message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
            LifecycleError::Internal(cause) => {
                error!(error = %cause, "card request store failure");
                Self::message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

pub fn submit_request_handler<S, C>(
    lifecycle: &CardRequestLifecycle<S, C>,
    event: &InboundEvent,
) -> HandlerResponse
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    let body = event.body.as_ref().unwrap_or(&Value::Null);
    match lifecycle.submit(body) {
        Ok(_) => HandlerResponse::message(StatusCode::OK, SUBMITTED_MESSAGE),
        Err(err) => err.into(),
    }
}

pub fn list_requests_handler<S, C>(lifecycle: &CardRequestLifecycle<S, C>) -> HandlerResponse
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    match lifecycle.list() {
        Ok(requests_list) => HandlerResponse::new(
            StatusCode::OK,
            ResponsePayload::RequestList { requests_list },
        ),
        Err(err) => err.into(),
    }
}

pub fn fetch_request_handler<S, C>(
    lifecycle: &CardRequestLifecycle<S, C>,
    event: &InboundEvent,
) -> HandlerResponse
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    let Some(key) = event.path_key() else {
        return HandlerResponse::message(StatusCode::NOT_FOUND, REQUEST_NOT_FOUND_MESSAGE);
    };

    match lifecycle.fetch_one(&key) {
        Ok(request) => HandlerResponse::new(StatusCode::OK, ResponsePayload::Request(request)),
        Err(err) => err.into(),
    }
}

pub fn delete_request_handler<S, C>(
    lifecycle: &CardRequestLifecycle<S, C>,
    event: &InboundEvent,
) -> HandlerResponse
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    let Some(key) = event.path_key() else {
        return HandlerResponse::message(StatusCode::NOT_FOUND, REQUEST_NOT_FOUND_MESSAGE);
    };

    match lifecycle.delete(&key) {
        Ok(()) => HandlerResponse::message(StatusCode::OK, DELETED_MESSAGE),
        Err(err) => err.into(),
    }
}

/// Store-notification handler. Nothing is returned to the platform; failures are only logged.
pub fn process_store_event_handler<S, C>(
    lifecycle: &CardRequestLifecycle<S, C>,
    event: &StoreEvent,
) -> ScoreReport
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    lifecycle.score(event)
}
