//! Credit card request intake, asynchronous scoring, and lookup.
//!
//! Requests are persisted through a [`CardRequestStore`] keyed by the applicant's cpf. A
//! submission is stored as pending; the store's creation notification drives
//! [`CardRequestLifecycle::score`], which writes the rendered credit decision back in place.

pub mod domain;
pub mod evaluation;
pub mod events;
pub mod handlers;
pub mod router;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{CardRequest, CardRequestStatus, CardRequestSubmission, RequestId, RequestKey};
pub use evaluation::{
    decide, CreditDecision, CurrencyFormatter, FixedScoreSource, PolicyError, RandomScoreSource,
    ScoreOutcome, ScoreSource, SequenceScoreSource,
};
pub use events::{InboundEvent, StoreEvent, StoreEventRecord};
pub use handlers::{HandlerResponse, ResponsePayload};
pub use router::card_request_router;
pub use service::{CardRequestLifecycle, LifecycleConfig, LifecycleError, NotFoundKind, ScoreReport};
pub use store::{CardRequestStore, DeleteAck, StoreError};
pub use validation::{RequestValidator, ValidationError, REQUIRED_FIELDS};
