use card_requests::workflows::card_requests::{
    CardRequest, CardRequestLifecycle, CardRequestStore, DeleteAck, RequestKey, ScoreSource,
    StoreError, StoreEvent,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Object-store stand-in holding JSON-encoded requests for one container.
///
/// Writing a key with a request id it did not hold before publishes a creation
/// notification; score write-backs keep the id and stay silent.
#[derive(Clone)]
pub(crate) struct InMemoryCardRequestStore {
    container: String,
    objects: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
    notifications: Option<UnboundedSender<StoreEvent>>,
}

impl InMemoryCardRequestStore {
    pub(crate) fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            objects: Arc::default(),
            notifications: None,
        }
    }

    pub(crate) fn with_notifications(
        container: impl Into<String>,
    ) -> (Self, UnboundedReceiver<StoreEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut store = Self::new(container);
        store.notifications = Some(sender);
        (store, receiver)
    }

    fn objects(&self) -> Result<MutexGuard<'_, BTreeMap<String, Vec<u8>>>, StoreError> {
        self.objects
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }

    fn object_name(key: &RequestKey) -> String {
        format!("{key}.json")
    }

    fn decode(key: &RequestKey, bytes: &[u8]) -> Result<CardRequest, StoreError> {
        serde_json::from_slice(bytes).map_err(|err| StoreError::Corrupt {
            key: key.clone(),
            reason: err.to_string(),
        })
    }
}

impl CardRequestStore for InMemoryCardRequestStore {
    fn get(&self, key: &RequestKey) -> Result<Option<CardRequest>, StoreError> {
        let objects = self.objects()?;
        objects
            .get(&Self::object_name(key))
            .map(|bytes| Self::decode(key, bytes))
            .transpose()
    }

    fn put(&self, key: &RequestKey, request: &CardRequest) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(request).map_err(|err| StoreError::Corrupt {
            key: key.clone(),
            reason: err.to_string(),
        })?;
        let name = Self::object_name(key);

        let created = {
            let mut objects = self.objects()?;
            let previous_id = objects
                .get(&name)
                .and_then(|bytes| Self::decode(key, bytes).ok())
                .map(|previous| previous.id);
            objects.insert(name.clone(), bytes);
            previous_id.as_ref() != Some(&request.id)
        };

        if created {
            if let Some(sender) = &self.notifications {
                if sender
                    .send(StoreEvent::object_created(&self.container, name))
                    .is_err()
                {
                    warn!(%key, "no scoring worker is listening for store notifications");
                }
            }
        }
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<RequestKey>, StoreError> {
        let objects = self.objects()?;
        Ok(objects
            .keys()
            .map(|name| RequestKey::from_object_key(name))
            .collect())
    }

    fn delete(&self, key: &RequestKey) -> Result<DeleteAck, StoreError> {
        let mut objects = self.objects()?;
        Ok(match objects.remove(&Self::object_name(key)) {
            Some(_) => DeleteAck::Confirmed,
            None => DeleteAck::Unconfirmed,
        })
    }
}

/// Drain store notifications and score each one, the way the platform would invoke the
/// scoring handler.
pub(crate) fn spawn_scoring_worker<S, C>(
    lifecycle: Arc<CardRequestLifecycle<S, C>>,
    mut notifications: UnboundedReceiver<StoreEvent>,
) -> JoinHandle<()>
where
    S: CardRequestStore + 'static,
    C: ScoreSource + 'static,
{
    tokio::spawn(async move {
        while let Some(event) = notifications.recv().await {
            let report = lifecycle.score(&event);
            debug!(
                scored = report.scored.len(),
                skipped = report.skipped,
                failed = report.failed,
                "store notification processed"
            );
        }
        info!("scoring worker stopped");
    })
}
