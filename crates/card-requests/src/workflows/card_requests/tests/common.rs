use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::card_requests::domain::{CardRequest, RequestKey};
use crate::workflows::card_requests::evaluation::{FixedScoreSource, SequenceScoreSource};
use crate::workflows::card_requests::events::StoreEvent;
use crate::workflows::card_requests::store::{CardRequestStore, DeleteAck, StoreError};
use crate::workflows::card_requests::{card_request_router, CardRequestLifecycle, LifecycleConfig};

pub(super) const CONTAINER: &str = "cards-requests";

pub(super) fn lifecycle_config() -> LifecycleConfig {
    LifecycleConfig {
        container: CONTAINER.to_string(),
        currency_symbol: "R$".to_string(),
    }
}

pub(super) fn payload(cpf: &str) -> Value {
    json!({
        "name": "Maria Souza",
        "phone": "11999999999",
        "age": 26,
        "cpf": cpf,
        "income": 3000
    })
}

pub(super) fn build_lifecycle(
    score: u16,
) -> (
    CardRequestLifecycle<MemoryStore, FixedScoreSource>,
    Arc<MemoryStore>,
) {
    let store = Arc::new(MemoryStore::default());
    let lifecycle = CardRequestLifecycle::new(
        store.clone(),
        Arc::new(FixedScoreSource(score)),
        lifecycle_config(),
    );
    (lifecycle, store)
}

pub(super) fn sequence_lifecycle(
    scores: Vec<u16>,
) -> (
    CardRequestLifecycle<MemoryStore, SequenceScoreSource>,
    Arc<MemoryStore>,
) {
    let store = Arc::new(MemoryStore::default());
    let lifecycle = CardRequestLifecycle::new(
        store.clone(),
        Arc::new(SequenceScoreSource::new(scores)),
        lifecycle_config(),
    );
    (lifecycle, store)
}

pub(super) fn created(key: &str) -> StoreEvent {
    StoreEvent::object_created(CONTAINER, format!("{key}.json"))
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) objects: Arc<Mutex<BTreeMap<RequestKey, CardRequest>>>,
    pub(super) writes: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.objects.lock().expect("store mutex poisoned").len()
    }

    pub(super) fn object(&self, key: &str) -> Option<CardRequest> {
        self.objects
            .lock()
            .expect("store mutex poisoned")
            .get(&RequestKey(key.to_string()))
            .cloned()
    }

    pub(super) fn write_count(&self) -> usize {
        *self.writes.lock().expect("write mutex poisoned")
    }
}

impl CardRequestStore for MemoryStore {
    fn get(&self, key: &RequestKey) -> Result<Option<CardRequest>, StoreError> {
        let guard = self.objects.lock().expect("store mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn put(&self, key: &RequestKey, request: &CardRequest) -> Result<(), StoreError> {
        let mut guard = self.objects.lock().expect("store mutex poisoned");
        guard.insert(key.clone(), request.clone());
        *self.writes.lock().expect("write mutex poisoned") += 1;
        Ok(())
    }

    fn list_keys(&self) -> Result<Vec<RequestKey>, StoreError> {
        let guard = self.objects.lock().expect("store mutex poisoned");
        Ok(guard.keys().cloned().collect())
    }

    fn delete(&self, key: &RequestKey) -> Result<DeleteAck, StoreError> {
        let mut guard = self.objects.lock().expect("store mutex poisoned");
        Ok(match guard.remove(key) {
            Some(_) => DeleteAck::Confirmed,
            None => DeleteAck::Unconfirmed,
        })
    }
}

pub(super) struct UnavailableStore;

impl CardRequestStore for UnavailableStore {
    fn get(&self, _key: &RequestKey) -> Result<Option<CardRequest>, StoreError> {
        Err(StoreError::Unavailable("bucket offline".to_string()))
    }

    fn put(&self, _key: &RequestKey, _request: &CardRequest) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("bucket offline".to_string()))
    }

    fn list_keys(&self) -> Result<Vec<RequestKey>, StoreError> {
        Err(StoreError::Unavailable("bucket offline".to_string()))
    }

    fn delete(&self, _key: &RequestKey) -> Result<DeleteAck, StoreError> {
        Err(StoreError::Unavailable("bucket offline".to_string()))
    }
}

/// Removes objects but never confirms the deletion.
#[derive(Default)]
pub(super) struct UnconfirmedDeleteStore {
    pub(super) inner: MemoryStore,
}

impl CardRequestStore for UnconfirmedDeleteStore {
    fn get(&self, key: &RequestKey) -> Result<Option<CardRequest>, StoreError> {
        self.inner.get(key)
    }

    fn put(&self, key: &RequestKey, request: &CardRequest) -> Result<(), StoreError> {
        self.inner.put(key, request)
    }

    fn list_keys(&self) -> Result<Vec<RequestKey>, StoreError> {
        self.inner.list_keys()
    }

    fn delete(&self, key: &RequestKey) -> Result<DeleteAck, StoreError> {
        self.inner.delete(key)?;
        Ok(DeleteAck::Unconfirmed)
    }
}

pub(super) fn unavailable_lifecycle() -> CardRequestLifecycle<UnavailableStore, FixedScoreSource> {
    CardRequestLifecycle::new(
        Arc::new(UnavailableStore),
        Arc::new(FixedScoreSource(500)),
        lifecycle_config(),
    )
}

pub(super) fn router_with_lifecycle(
    lifecycle: CardRequestLifecycle<MemoryStore, FixedScoreSource>,
) -> axum::Router {
    card_request_router(Arc::new(lifecycle))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
