use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use super::domain::{CardRequest, RequestId, RequestKey};
use super::evaluation::{
    CurrencyFormatter, PolicyError, ScoreOutcome, ScoreSource, ScoringEngine,
};
use super::events::{StoreEvent, StoreEventRecord};
use super::store::{CardRequestStore, DeleteAck, StoreError};
use super::validation::{RequestValidator, ValidationError};

/// Settings fixed for the lifetime of a lifecycle instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Container the store handle is bound to; notifications from other containers are ignored.
    pub container: String,
    pub currency_symbol: String,
}

/// Service composing validation, the store, the score source, and the tier policy.
pub struct CardRequestLifecycle<S, C> {
    store: Arc<S>,
    scores: Arc<C>,
    engine: ScoringEngine,
    container: String,
}

impl<S, C> CardRequestLifecycle<S, C>
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    pub fn new(store: Arc<S>, scores: Arc<C>, config: LifecycleConfig) -> Self {
        let LifecycleConfig {
            container,
            currency_symbol,
        } = config;

        Self {
            store,
            scores,
            engine: ScoringEngine::new(CurrencyFormatter::new(currency_symbol)),
            container,
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Validate a payload and persist it as a pending request keyed by its cpf.
    ///
    /// Any request already stored under the same cpf is overwritten. Scoring happens later,
    /// when the store reports the new object.
    pub fn submit(&self, payload: &Value) -> Result<CardRequest, LifecycleError> {
        let submission = RequestValidator::parse(payload)?;
        let request = submission.into_request(RequestId::generate());
        let key = request.key();

        self.store.put(&key, &request).map_err(|err| {
            error!(%key, error = %err, "failed to persist card request");
            err
        })?;

        info!(
            %key,
            id = %request.id,
            status = request.status().label(),
            "card request submitted"
        );
        Ok(request)
    }

    /// Every stored request, in store enumeration order.
    pub fn list(&self) -> Result<Vec<CardRequest>, LifecycleError> {
        let keys = self.store.list_keys()?;
        let mut requests = Vec::with_capacity(keys.len());
        for key in keys {
            // Keys deleted between enumeration and fetch are skipped.
            if let Some(request) = self.store.get(&key)? {
                requests.push(request);
            }
        }

        if requests.is_empty() {
            return Err(LifecycleError::NotFound(NotFoundKind::RequestList));
        }
        Ok(requests)
    }

    /// Look up a request by store key (the cpf supplied in the `id` path slot).
    pub fn fetch_one(&self, key: &RequestKey) -> Result<CardRequest, LifecycleError> {
        self.store
            .get(key)?
            .ok_or_else(|| LifecycleError::NotFound(NotFoundKind::Request(key.clone())))
    }

    /// Remove a request by store key. Only a confirmed acknowledgment counts as success.
    pub fn delete(&self, key: &RequestKey) -> Result<(), LifecycleError> {
        match self.store.delete(key)? {
            DeleteAck::Confirmed => {
                info!(%key, "card request deleted");
                Ok(())
            }
            DeleteAck::Unconfirmed => {
                warn!(%key, "delete was not confirmed by the store");
                Err(LifecycleError::NotFound(NotFoundKind::Request(key.clone())))
            }
        }
    }

    /// Score every object named by a store notification and write the credit back.
    ///
    /// Failures are logged per record and never propagated; the report only summarises them.
    pub fn score(&self, event: &StoreEvent) -> ScoreReport {
        let mut report = ScoreReport::default();

        for record in &event.records {
            if record.container() != self.container {
                warn!(
                    container = record.container(),
                    expected = %self.container,
                    object = record.object_key(),
                    "skipping notification for another container"
                );
                report.skipped += 1;
                continue;
            }

            match self.score_record(record) {
                Ok(outcome) => report.scored.push(outcome),
                Err(err) => {
                    error!(object = record.object_key(), error = %err, "failed to score card request");
                    report.failed += 1;
                }
            }
        }

        report
    }

    fn score_record(&self, record: &StoreEventRecord) -> Result<ScoreOutcome, LifecycleError> {
        let key = RequestKey::from_object_key(record.object_key());
        let mut request = self
            .store
            .get(&key)?
            .ok_or_else(|| LifecycleError::NotFound(NotFoundKind::Request(key.clone())))?;

        let outcome = self.engine.score(&request, self.scores.draw())?;
        request.credit = Some(outcome.credit.clone());
        self.store.put(&request.key(), &request)?;

        info!(
            key = %outcome.key,
            score = outcome.score,
            credit = %outcome.credit,
            rejected = outcome.decision.is_rejected(),
            status = request.status().label(),
            event_time = ?record.event_time,
            "card request scored"
        );
        Ok(outcome)
    }
}

/// Summary of one notification batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub scored: Vec<ScoreOutcome>,
    pub skipped: usize,
    pub failed: usize,
}

/// What a not-found outcome refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundKind {
    Request(RequestKey),
    RequestList,
}

impl fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundKind::Request(key) => write!(f, "card request {key}"),
            NotFoundKind::RequestList => f.write_str("card request list"),
        }
    }
}

/// Error raised by the lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0} not found")]
    NotFound(NotFoundKind),
    #[error(transparent)]
    Scoring(#[from] PolicyError),
    #[error(transparent)]
    Internal(#[from] StoreError),
}
