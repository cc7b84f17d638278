use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Server-assigned identifier of a card request. Never used as a store key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key addressing a card request inside the object store.
///
/// The key is the applicant's `cpf`. HTTP callers pass it in the `id` path slot, so
/// fetch and delete treat that path value as a `RequestKey`, not as a [`RequestId`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestKey(pub String);

impl RequestKey {
    const OBJECT_EXTENSION: &'static str = ".json";

    /// Derive the key from an object name reported by a store notification.
    pub fn from_object_key(object_key: &str) -> Self {
        let trimmed = object_key
            .strip_suffix(Self::OBJECT_EXTENSION)
            .unwrap_or(object_key);
        Self(trimmed.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Applicant fields accepted by intake once the payload passed validation.
///
/// `name`, `phone` and `age` are only checked for presence and keep the JSON value they
/// arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRequestSubmission {
    pub name: Value,
    pub phone: Value,
    pub age: Value,
    pub cpf: String,
    pub income: Decimal,
}

impl CardRequestSubmission {
    pub fn into_request(self, id: RequestId) -> CardRequest {
        CardRequest {
            id,
            name: self.name,
            phone: self.phone,
            age: self.age,
            cpf: self.cpf,
            income: self.income,
            credit: None,
        }
    }
}

/// The persisted card request object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRequest {
    pub id: RequestId,
    pub name: Value,
    pub phone: Value,
    pub age: Value,
    pub cpf: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
}

impl CardRequest {
    pub fn key(&self) -> RequestKey {
        RequestKey(self.cpf.clone())
    }

    pub fn status(&self) -> CardRequestStatus {
        if self.credit.is_some() {
            CardRequestStatus::Scored
        } else {
            CardRequestStatus::Pending
        }
    }
}

/// Informal lifecycle state derived from the presence of `credit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardRequestStatus {
    Pending,
    Scored,
}

impl CardRequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CardRequestStatus::Pending => "pending",
            CardRequestStatus::Scored => "scored",
        }
    }
}
