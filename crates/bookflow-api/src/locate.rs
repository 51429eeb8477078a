//! Resolving a single remote resource
//!
//! Lookup by opaque resource id is a direct get; the remote's "not found"
//! application code (1004) is recovered as `None` there, while every other
//! failure propagates. Lookups by identity value or secondary key enumerate
//! the collection and scan for exact equality.
//!
//! Tie-break: if several remote resources share the same identity value
//! (which the remote system does not rule out), the first one in page order
//! wins. This is a documented convention, not a uniqueness guarantee.

use crate::client::BooksClient;
use crate::error::{ApiError, Result};
use crate::fetch;
use bookflow_core::{RemoteResource, ResourceKind};

/// How to identify the resource being looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Opaque remote id — direct get
    ResourceId(String),
    /// The kind's identity field (account name, item name, contact name)
    Identity(String),
    /// A secondary unique field, e.g. `sku` for items
    SecondaryKey { field: String, value: String },
}

/// Resolve at most one resource matching the selector
pub async fn find(
    client: &BooksClient,
    kind: ResourceKind,
    selector: &Selector,
) -> Result<Option<RemoteResource>> {
    match selector {
        Selector::ResourceId(id) => find_by_id(client, kind, id).await,
        Selector::Identity(value) => find_by_identity(client, kind, value).await,
        Selector::SecondaryKey { field, value } => {
            find_by_secondary(client, kind, field, value).await
        }
    }
}

/// Direct get by resource id; code 1004 yields `None` rather than an error
pub async fn find_by_id(
    client: &BooksClient,
    kind: ResourceKind,
    resource_id: &str,
) -> Result<Option<RemoteResource>> {
    let envelope = client.get(&kind.resource_path(resource_id), &[]).await?;
    if envelope.is_not_found() {
        tracing::debug!(%kind, resource_id, "resource not found");
        return Ok(None);
    }
    let mut envelope = envelope.ensure_ok()?;

    let payload = envelope.take(kind.payload_key()).ok_or_else(|| {
        ApiError::UnexpectedPayload(format!(
            "response is missing the '{}' payload",
            kind.payload_key()
        ))
    })?;
    let resource = RemoteResource::from_payload(kind, payload).ok_or_else(|| {
        ApiError::UnexpectedPayload(format!("payload without a '{}' field", kind.id_field()))
    })?;

    // The contacts endpoint serves customers too; an id that resolves to a
    // non-vendor contact counts as absent.
    if kind == ResourceKind::Vendor && resource.str_field("contact_type") != Some("vendor") {
        return Ok(None);
    }

    Ok(Some(resource))
}

/// Scan the collection for an exact match on the kind's identity field
pub async fn find_by_identity(
    client: &BooksClient,
    kind: ResourceKind,
    identity: &str,
) -> Result<Option<RemoteResource>> {
    scan(client, kind, kind.identity_field(), identity).await
}

/// Scan the collection for an exact match on a declared secondary key
pub async fn find_by_secondary(
    client: &BooksClient,
    kind: ResourceKind,
    field: &str,
    value: &str,
) -> Result<Option<RemoteResource>> {
    if !kind.secondary_keys().contains(&field) {
        return Err(ApiError::UnsupportedKey {
            kind,
            field: field.to_string(),
        });
    }
    scan(client, kind, field, value).await
}

async fn scan(
    client: &BooksClient,
    kind: ResourceKind,
    field: &str,
    value: &str,
) -> Result<Option<RemoteResource>> {
    let resources = fetch::fetch_all(client, kind, None).await?;
    Ok(resources
        .into_iter()
        .find(|r| r.str_field(field) == Some(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_find_by_id_not_found_is_absent() {
        let transport = MockTransport::new();
        transport.push_response(200, json!({"code": 1004, "message": "Item does not exist."}));
        let client = BooksClient::with_transport(Arc::new(transport));

        let found = find_by_id(&client, ResourceKind::Item, "404").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_other_codes_are_errors() {
        let transport = MockTransport::new();
        transport.push_response(200, json!({"code": 14, "message": "Invalid value"}));
        let client = BooksClient::with_transport(Arc::new(transport));

        assert!(matches!(
            find_by_id(&client, ResourceKind::Item, "42").await,
            Err(ApiError::Remote { code: 14, .. })
        ));
    }

    #[tokio::test]
    async fn test_find_by_id_success() {
        let transport = MockTransport::new();
        transport.push_response(
            200,
            json!({"code": 0, "account": {"account_id": "9", "account_name": "Ops"}}),
        );
        let client = BooksClient::with_transport(Arc::new(transport));

        let found = find_by_id(&client, ResourceKind::Account, "9")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.resource_id, "9");
        assert_eq!(found.str_field("account_name"), Some("Ops"));
    }

    #[tokio::test]
    async fn test_find_by_id_rejects_non_vendor_contact() {
        let transport = MockTransport::new();
        transport.push_response(
            200,
            json!({"code": 0, "contact": {"contact_id": "5", "contact_type": "customer"}}),
        );
        let client = BooksClient::with_transport(Arc::new(transport));

        let found = find_by_id(&client, ResourceKind::Vendor, "5").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_by_identity_first_match_in_page_order_wins() {
        let transport = MockTransport::new();
        transport.push_response(
            200,
            json!({
                "code": 0,
                "items": [
                    {"item_id": "1", "name": "Other"},
                    {"item_id": "2", "name": "Widget", "rate": 10.0},
                    {"item_id": "3", "name": "Widget", "rate": 99.0},
                ]
            }),
        );
        let client = BooksClient::with_transport(Arc::new(transport));

        let found = find_by_identity(&client, ResourceKind::Item, "Widget")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.resource_id, "2");
    }

    #[tokio::test]
    async fn test_find_by_sku() {
        let transport = MockTransport::new();
        transport.push_response(
            200,
            json!({
                "code": 0,
                "items": [
                    {"item_id": "1", "name": "Widget", "sku": "WGT-1"},
                    {"item_id": "2", "name": "Gadget", "sku": "GDT-1"},
                ]
            }),
        );
        let client = BooksClient::with_transport(Arc::new(transport));

        let selector = Selector::SecondaryKey {
            field: "sku".to_string(),
            value: "GDT-1".to_string(),
        };
        let found = find(&client, ResourceKind::Item, &selector)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.resource_id, "2");
    }

    #[tokio::test]
    async fn test_secondary_key_must_be_declared() {
        let client = BooksClient::with_transport(Arc::new(MockTransport::new()));

        let result = find_by_secondary(&client, ResourceKind::Account, "sku", "X").await;
        assert!(matches!(result, Err(ApiError::UnsupportedKey { .. })));
    }

    #[tokio::test]
    async fn test_find_by_identity_absent() {
        let transport = MockTransport::new();
        transport.push_response(200, json!({"code": 0, "items": []}));
        let client = BooksClient::with_transport(Arc::new(transport));

        let found = find_by_identity(&client, ResourceKind::Item, "Nothing")
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
