use serde::{Deserialize, Serialize};

use super::domain::{CardRequest, RequestKey};

/// Object-store abstraction bound to a single container.
///
/// Implementations own key/object layout and transport; the lifecycle only relies on
/// last-write-wins `put` and on `delete` reporting whether removal was confirmed.
pub trait CardRequestStore: Send + Sync {
    fn get(&self, key: &RequestKey) -> Result<Option<CardRequest>, StoreError>;
    fn put(&self, key: &RequestKey, request: &CardRequest) -> Result<(), StoreError>;
    fn list_keys(&self) -> Result<Vec<RequestKey>, StoreError>;
    fn delete(&self, key: &RequestKey) -> Result<DeleteAck, StoreError>;
}

/// Acknowledgment returned by the store for a delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteAck {
    Confirmed,
    Unconfirmed,
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("object {key} could not be decoded: {reason}")]
    Corrupt { key: RequestKey, reason: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
