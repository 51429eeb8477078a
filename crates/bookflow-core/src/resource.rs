//! Remote resource snapshots
//!
//! A [`RemoteResource`] is the state of one resource as last observed from
//! the remote system. It is owned by a single reconcile invocation and
//! discarded when the invocation completes; nothing is cached across runs.

use crate::kind::ResourceKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Active/inactive status of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    Active,
    Inactive,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Active => "active",
            ResourceStatus::Inactive => "inactive",
        }
    }

    /// Parse a remote `status` field value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(ResourceStatus::Active),
            "inactive" => Some(ResourceStatus::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of a remote resource
#[derive(Debug, Clone, Serialize)]
pub struct RemoteResource {
    /// Opaque identity handle assigned by the remote system
    pub resource_id: String,

    /// Full field set as last observed
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RemoteResource {
    /// Build a snapshot from a response payload object.
    ///
    /// Returns `None` when the payload is not an object or has no id field;
    /// numeric ids are normalized to their string form.
    pub fn from_payload(kind: ResourceKind, payload: Value) -> Option<Self> {
        let Value::Object(fields) = payload else {
            return None;
        };
        let resource_id = match fields.get(kind.id_field()) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return None,
        };
        Some(Self {
            resource_id,
            fields,
        })
    }

    /// Look up an observed field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Look up an observed field as a string
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Observed status, for kinds that report one
    pub fn status(&self) -> Option<ResourceStatus> {
        self.str_field("status").and_then(ResourceStatus::parse)
    }

    /// The whole snapshot as a JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_payload_string_id() {
        let resource = RemoteResource::from_payload(
            ResourceKind::Item,
            json!({"item_id": "123", "name": "Widget", "status": "active"}),
        )
        .unwrap();
        assert_eq!(resource.resource_id, "123");
        assert_eq!(resource.str_field("name"), Some("Widget"));
        assert_eq!(resource.status(), Some(ResourceStatus::Active));
    }

    #[test]
    fn test_from_payload_numeric_id() {
        let resource = RemoteResource::from_payload(
            ResourceKind::Account,
            json!({"account_id": 456, "account_name": "Ops"}),
        )
        .unwrap();
        assert_eq!(resource.resource_id, "456");
    }

    #[test]
    fn test_from_payload_missing_id() {
        assert!(RemoteResource::from_payload(ResourceKind::Item, json!({"name": "x"})).is_none());
        assert!(RemoteResource::from_payload(ResourceKind::Item, json!("not an object")).is_none());
    }

    #[test]
    fn test_unknown_status_is_none() {
        let resource = RemoteResource::from_payload(
            ResourceKind::Vendor,
            json!({"contact_id": "1", "status": "gone"}),
        )
        .unwrap();
        assert_eq!(resource.status(), None);
    }
}
