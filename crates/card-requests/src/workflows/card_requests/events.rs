use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::RequestKey;

const PATH_ID: &str = "id";

/// HTTP-trigger envelope handed to the request handlers. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub path: BTreeMap<String, String>,
}

impl InboundEvent {
    pub fn with_body(body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn with_path_id(id: impl Into<String>) -> Self {
        let mut path = BTreeMap::new();
        path.insert(PATH_ID.to_string(), id.into());
        Self { body: None, path }
    }

    /// The `id` path value, interpreted as the store key (the applicant's cpf).
    pub fn path_key(&self) -> Option<RequestKey> {
        self.path
            .get(PATH_ID)
            .filter(|value| !value.is_empty())
            .map(|value| RequestKey(value.clone()))
    }
}

/// Object-store notification listing newly written objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<StoreEventRecord>,
}

impl StoreEvent {
    pub fn object_created(container: impl Into<String>, object_key: impl Into<String>) -> Self {
        Self {
            records: vec![StoreEventRecord {
                event_name: Some("ObjectCreated:Put".to_string()),
                event_time: Some(Utc::now()),
                s3: StoreEntity {
                    bucket: ContainerRef {
                        name: container.into(),
                    },
                    object: ObjectRef {
                        key: object_key.into(),
                        size: None,
                    },
                },
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreEventRecord {
    #[serde(rename = "eventName", default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(rename = "eventTime", default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<DateTime<Utc>>,
    pub s3: StoreEntity,
}

impl StoreEventRecord {
    pub fn container(&self) -> &str {
        &self.s3.bucket.name
    }

    pub fn object_key(&self) -> &str {
        &self.s3.object.key
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreEntity {
    pub bucket: ContainerRef,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}
