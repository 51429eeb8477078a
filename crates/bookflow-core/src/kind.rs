//! Resource kind capability records
//!
//! Each kind of Zoho Books resource differs in its collection endpoint, the
//! key its payloads are wrapped in, its identity field and whether it carries
//! an active/inactive status sub-resource. Everything kind-specific the
//! locator, differ and reconciler need is answered here, so those components
//! are written once and parameterized by `ResourceKind`.

use crate::resource::ResourceStatus;
use serde::{Deserialize, Serialize};

/// Kind of remote resource managed by Bookflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Chart-of-accounts entry
    Account,
    /// Catalog item
    Item,
    /// Vendor contact
    Vendor,
}

impl ResourceKind {
    /// Collection endpoint path, relative to the API base
    pub fn collection_path(&self) -> &'static str {
        match self {
            ResourceKind::Account => "chartofaccounts",
            ResourceKind::Item => "items",
            ResourceKind::Vendor => "contacts",
        }
    }

    /// Query parameters that scope collection requests for this kind
    pub fn collection_query(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ResourceKind::Vendor => &[("contact_type", "vendor")],
            _ => &[],
        }
    }

    /// Path of a single resource
    pub fn resource_path(&self, resource_id: &str) -> String {
        format!("{}/{}", self.collection_path(), resource_id)
    }

    /// Path of the status sub-resource, if the kind has one
    pub fn status_path(&self, resource_id: &str, target: ResourceStatus) -> Option<String> {
        if !self.supports_status() {
            return None;
        }
        Some(format!(
            "{}/{}/{}",
            self.collection_path(),
            resource_id,
            target
        ))
    }

    /// Key wrapping a single resource in a response body
    pub fn payload_key(&self) -> &'static str {
        match self {
            ResourceKind::Account => "account",
            ResourceKind::Item => "item",
            ResourceKind::Vendor => "contact",
        }
    }

    /// Key wrapping the resource list in a listing response body
    pub fn list_key(&self) -> &'static str {
        match self {
            ResourceKind::Account => "chartofaccounts",
            ResourceKind::Item => "items",
            ResourceKind::Vendor => "contacts",
        }
    }

    /// Field holding the opaque resource id in a payload
    pub fn id_field(&self) -> &'static str {
        match self {
            ResourceKind::Account => "account_id",
            ResourceKind::Item => "item_id",
            ResourceKind::Vendor => "contact_id",
        }
    }

    /// Field holding the caller-facing identity value
    pub fn identity_field(&self) -> &'static str {
        match self {
            ResourceKind::Account => "account_name",
            ResourceKind::Item => "name",
            ResourceKind::Vendor => "contact_name",
        }
    }

    /// Secondary unique lookup fields (e.g. SKU for items)
    pub fn secondary_keys(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Item => &["sku"],
            _ => &[],
        }
    }

    /// Whether the kind exposes `{id}/active` / `{id}/inactive` endpoints
    pub fn supports_status(&self) -> bool {
        matches!(self, ResourceKind::Item | ResourceKind::Vendor)
    }

    /// Human-readable noun for messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::Account => "Account",
            ResourceKind::Item => "Item",
            ResourceKind::Vendor => "Vendor",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_map() {
        assert_eq!(ResourceKind::Account.collection_path(), "chartofaccounts");
        assert_eq!(ResourceKind::Item.resource_path("42"), "items/42");
        assert_eq!(
            ResourceKind::Vendor.collection_query(),
            &[("contact_type", "vendor")]
        );
        assert_eq!(ResourceKind::Account.list_key(), "chartofaccounts");
        assert_eq!(ResourceKind::Vendor.payload_key(), "contact");
    }

    #[test]
    fn test_status_paths() {
        assert_eq!(
            ResourceKind::Item.status_path("7", ResourceStatus::Active),
            Some("items/7/active".to_string())
        );
        assert_eq!(
            ResourceKind::Vendor.status_path("7", ResourceStatus::Inactive),
            Some("contacts/7/inactive".to_string())
        );
        assert_eq!(
            ResourceKind::Account.status_path("7", ResourceStatus::Active),
            None
        );
    }

    #[test]
    fn test_secondary_keys() {
        assert_eq!(ResourceKind::Item.secondary_keys(), &["sku"]);
        assert!(ResourceKind::Account.secondary_keys().is_empty());
    }
}
