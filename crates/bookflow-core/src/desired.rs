//! Desired state declarations
//!
//! One struct per resource kind, with every optional field an explicit
//! `Option` slot. A `None` field was not supplied by the caller and never
//! participates in comparison or request bodies; this is distinct from an
//! explicitly-supplied empty value, which does. Field sets mirror the Zoho
//! Books v3 write APIs.

use crate::error::CoreError;
use crate::kind::ResourceKind;
use crate::resource::ResourceStatus;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// What the caller wants to be true of the resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Resource exists with the declared fields
    Present,
    /// Resource does not exist
    Absent,
    /// Resource exists and its status is active
    Active,
    /// Resource exists and its status is inactive
    Inactive,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Present => "present",
            Intent::Absent => "absent",
            Intent::Active => "active",
            Intent::Inactive => "inactive",
        }
    }

    /// The status this intent transitions to, for Active/Inactive
    pub fn target_status(&self) -> Option<ResourceStatus> {
        match self {
            Intent::Active => Some(ResourceStatus::Active),
            Intent::Inactive => Some(ResourceStatus::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Intent::Present),
            "absent" => Ok(Intent::Absent),
            "active" => Ok(Intent::Active),
            "inactive" => Ok(Intent::Inactive),
            other => Err(CoreError::InvalidChoice {
                field: "state",
                value: other.to_string(),
                expected: "present, absent, active, inactive",
            }),
        }
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal, $expected:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(CoreError::InvalidChoice {
                        field: $field,
                        value: other.to_string(),
                        expected: $expected,
                    }),
                }
            }
        }
    };
}

choice_enum! {
    /// Ledger account classification
    AccountType, "account_type",
    "other_asset, other_current_asset, cash, bank, fixed_asset, \
     other_current_liability, credit_card, long_term_liability, \
     other_liability, equity, income, other_income, expense, \
     cost_of_goods_sold, other_expense" {
        OtherAsset => "other_asset",
        OtherCurrentAsset => "other_current_asset",
        Cash => "cash",
        Bank => "bank",
        FixedAsset => "fixed_asset",
        OtherCurrentLiability => "other_current_liability",
        CreditCard => "credit_card",
        LongTermLiability => "long_term_liability",
        OtherLiability => "other_liability",
        Equity => "equity",
        Income => "income",
        OtherIncome => "other_income",
        Expense => "expense",
        CostOfGoodsSold => "cost_of_goods_sold",
        OtherExpense => "other_expense",
    }
}

choice_enum! {
    /// What kind of product an item represents
    ProductType, "product_type", "goods, service, digital_service" {
        Goods => "goods",
        Service => "service",
        DigitalService => "digital_service",
    }
}

choice_enum! {
    /// Inventory tracking classification of an item
    ItemType, "item_type", "inventory, non_inventory" {
        Inventory => "inventory",
        NonInventory => "non_inventory",
    }
}

choice_enum! {
    /// Legal form of a vendor
    VendorSubType, "vendor_sub_type", "individual, business" {
        Individual => "individual",
        Business => "business",
    }
}

/// Postal address attached to a vendor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attention: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Desired state of a chart-of-accounts entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesiredAccount {
    pub account_name: String,
    pub account_type: Option<AccountType>,
    pub description: Option<String>,
    pub account_code: Option<String>,
    pub parent_account_id: Option<String>,
}

/// Desired state of a catalog item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesiredItem {
    pub name: String,
    pub rate: Option<f64>,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub product_type: Option<ProductType>,
    pub unit: Option<String>,
    pub tax_id: Option<String>,
    pub tax_percentage: Option<f64>,
    pub purchase_rate: Option<f64>,
    pub purchase_account_id: Option<String>,
    pub account_id: Option<String>,
    pub inventory_account_id: Option<String>,
    /// Create-only: cannot be changed on an existing item
    pub item_type: Option<ItemType>,
    /// Create-only
    pub track_inventory: Option<bool>,
    /// Create-only
    pub initial_stock: Option<f64>,
    /// Create-only
    pub initial_stock_rate: Option<f64>,
    pub reorder_level: Option<f64>,
}

/// Desired state of a vendor contact
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesiredVendor {
    pub contact_name: String,
    pub company_name: Option<String>,
    pub vendor_sub_type: Option<VendorSubType>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub website: Option<String>,
    pub currency_code: Option<String>,
    pub payment_terms: Option<i64>,
    pub payment_terms_label: Option<String>,
    pub billing_address: Option<BillingAddress>,
    pub tax_id: Option<String>,
    pub notes: Option<String>,
    /// Custom fields as label -> value; serialized to the API's
    /// `[{label, value}]` list form
    pub custom_fields: Option<BTreeMap<String, String>>,
}

/// A desired resource of any kind, plus the requested intent
#[derive(Debug, Clone)]
pub struct DesiredState {
    pub intent: Intent,
    pub resource: DesiredResource,
}

impl DesiredState {
    pub fn new(intent: Intent, resource: impl Into<DesiredResource>) -> Self {
        Self {
            intent,
            resource: resource.into(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.resource.kind()
    }

    pub fn identity(&self) -> &str {
        self.resource.identity()
    }
}

/// Per-kind desired field sets
#[derive(Debug, Clone)]
pub enum DesiredResource {
    Account(DesiredAccount),
    Item(DesiredItem),
    Vendor(DesiredVendor),
}

impl From<DesiredAccount> for DesiredResource {
    fn from(value: DesiredAccount) -> Self {
        DesiredResource::Account(value)
    }
}

impl From<DesiredItem> for DesiredResource {
    fn from(value: DesiredItem) -> Self {
        DesiredResource::Item(value)
    }
}

impl From<DesiredVendor> for DesiredResource {
    fn from(value: DesiredVendor) -> Self {
        DesiredResource::Vendor(value)
    }
}

fn insert_opt<T: Serialize>(body: &mut Map<String, Value>, key: &str, value: &Option<T>) {
    if let Some(value) = value {
        body.insert(key.to_string(), json!(value));
    }
}

fn custom_fields_value(fields: &BTreeMap<String, String>) -> Value {
    Value::Array(
        fields
            .iter()
            .map(|(label, value)| json!({"label": label, "value": value}))
            .collect(),
    )
}

impl DesiredResource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            DesiredResource::Account(_) => ResourceKind::Account,
            DesiredResource::Item(_) => ResourceKind::Item,
            DesiredResource::Vendor(_) => ResourceKind::Vendor,
        }
    }

    /// The caller-facing identity value
    pub fn identity(&self) -> &str {
        match self {
            DesiredResource::Account(a) => &a.account_name,
            DesiredResource::Item(i) => &i.name,
            DesiredResource::Vendor(v) => &v.contact_name,
        }
    }

    /// Request body for a create, containing every explicitly-supplied field
    pub fn create_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        match self {
            DesiredResource::Account(a) => {
                body.insert("account_name".to_string(), json!(a.account_name));
                insert_opt(&mut body, "account_type", &a.account_type);
                insert_opt(&mut body, "description", &a.description);
                insert_opt(&mut body, "account_code", &a.account_code);
                insert_opt(&mut body, "parent_account_id", &a.parent_account_id);
            }
            DesiredResource::Item(i) => {
                body.insert("name".to_string(), json!(i.name));
                insert_opt(&mut body, "rate", &i.rate);
                insert_opt(&mut body, "description", &i.description);
                insert_opt(&mut body, "sku", &i.sku);
                insert_opt(&mut body, "product_type", &i.product_type);
                insert_opt(&mut body, "unit", &i.unit);
                insert_opt(&mut body, "tax_id", &i.tax_id);
                insert_opt(&mut body, "tax_percentage", &i.tax_percentage);
                insert_opt(&mut body, "purchase_rate", &i.purchase_rate);
                insert_opt(&mut body, "purchase_account_id", &i.purchase_account_id);
                insert_opt(&mut body, "account_id", &i.account_id);
                insert_opt(&mut body, "inventory_account_id", &i.inventory_account_id);
                insert_opt(&mut body, "item_type", &i.item_type);
                insert_opt(&mut body, "track_inventory", &i.track_inventory);
                insert_opt(&mut body, "initial_stock", &i.initial_stock);
                insert_opt(&mut body, "initial_stock_rate", &i.initial_stock_rate);
                insert_opt(&mut body, "reorder_level", &i.reorder_level);
            }
            DesiredResource::Vendor(v) => {
                body.insert("contact_name".to_string(), json!(v.contact_name));
                body.insert("contact_type".to_string(), json!("vendor"));
                vendor_shared_fields(v, &mut body);
                if let Some(fields) = &v.custom_fields {
                    body.insert("custom_fields".to_string(), custom_fields_value(fields));
                }
            }
        }
        body
    }

    /// Request body for an update: the explicitly-supplied updatable fields.
    ///
    /// Create-only fields (item type, inventory bootstrap values) and fields
    /// the remote API rejects on update are left out.
    pub fn update_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        match self {
            DesiredResource::Account(a) => {
                body.insert("account_name".to_string(), json!(a.account_name));
                insert_opt(&mut body, "description", &a.description);
                insert_opt(&mut body, "account_code", &a.account_code);
            }
            DesiredResource::Item(i) => {
                body.insert("name".to_string(), json!(i.name));
                insert_opt(&mut body, "rate", &i.rate);
                insert_opt(&mut body, "description", &i.description);
                insert_opt(&mut body, "sku", &i.sku);
                insert_opt(&mut body, "product_type", &i.product_type);
                insert_opt(&mut body, "unit", &i.unit);
                insert_opt(&mut body, "tax_id", &i.tax_id);
                insert_opt(&mut body, "tax_percentage", &i.tax_percentage);
                insert_opt(&mut body, "purchase_rate", &i.purchase_rate);
                insert_opt(&mut body, "purchase_account_id", &i.purchase_account_id);
                insert_opt(&mut body, "account_id", &i.account_id);
                insert_opt(&mut body, "inventory_account_id", &i.inventory_account_id);
                insert_opt(&mut body, "reorder_level", &i.reorder_level);
            }
            DesiredResource::Vendor(v) => {
                body.insert("contact_name".to_string(), json!(v.contact_name));
                vendor_shared_fields(v, &mut body);
                if let Some(fields) = &v.custom_fields {
                    body.insert("custom_fields".to_string(), custom_fields_value(fields));
                }
            }
        }
        body
    }

    /// Fields that participate in the update decision, as (name, desired
    /// value) pairs. Only explicitly-supplied fields appear.
    pub fn diff_fields(&self) -> Vec<(&'static str, Value)> {
        let mut fields = Vec::new();
        match self {
            DesiredResource::Account(a) => {
                push_opt(&mut fields, "description", &a.description);
                push_opt(&mut fields, "account_code", &a.account_code);
            }
            DesiredResource::Item(i) => {
                push_opt(&mut fields, "rate", &i.rate);
                push_opt(&mut fields, "description", &i.description);
                push_opt(&mut fields, "sku", &i.sku);
                push_opt(&mut fields, "product_type", &i.product_type);
                push_opt(&mut fields, "unit", &i.unit);
                push_opt(&mut fields, "tax_percentage", &i.tax_percentage);
                push_opt(&mut fields, "purchase_rate", &i.purchase_rate);
                push_opt(&mut fields, "reorder_level", &i.reorder_level);
            }
            DesiredResource::Vendor(v) => {
                push_opt(&mut fields, "company_name", &v.company_name);
                push_opt(&mut fields, "vendor_sub_type", &v.vendor_sub_type);
                push_opt(&mut fields, "email", &v.email);
                push_opt(&mut fields, "phone", &v.phone);
                push_opt(&mut fields, "mobile", &v.mobile);
                push_opt(&mut fields, "website", &v.website);
                push_opt(&mut fields, "currency_code", &v.currency_code);
                push_opt(&mut fields, "payment_terms", &v.payment_terms);
                push_opt(&mut fields, "payment_terms_label", &v.payment_terms_label);
                push_opt(&mut fields, "billing_address", &v.billing_address);
                push_opt(&mut fields, "tax_id", &v.tax_id);
                push_opt(&mut fields, "notes", &v.notes);
            }
        }
        fields
    }

}

fn vendor_shared_fields(v: &DesiredVendor, body: &mut Map<String, Value>) {
    insert_opt(body, "company_name", &v.company_name);
    insert_opt(body, "vendor_sub_type", &v.vendor_sub_type);
    insert_opt(body, "email", &v.email);
    insert_opt(body, "phone", &v.phone);
    insert_opt(body, "mobile", &v.mobile);
    insert_opt(body, "website", &v.website);
    insert_opt(body, "currency_code", &v.currency_code);
    insert_opt(body, "payment_terms", &v.payment_terms);
    insert_opt(body, "payment_terms_label", &v.payment_terms_label);
    insert_opt(body, "billing_address", &v.billing_address);
    insert_opt(body, "tax_id", &v.tax_id);
    insert_opt(body, "notes", &v.notes);
}

fn push_opt<T: Serialize>(
    fields: &mut Vec<(&'static str, Value)>,
    key: &'static str,
    value: &Option<T>,
) {
    if let Some(value) = value {
        fields.push((key, json!(value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_omits_unset_fields() {
        let item = DesiredResource::Item(DesiredItem {
            name: "Widget".to_string(),
            rate: Some(120.0),
            ..Default::default()
        });
        let body = item.create_body();
        assert_eq!(body.get("name"), Some(&json!("Widget")));
        assert_eq!(body.get("rate"), Some(&json!(120.0)));
        assert!(!body.contains_key("description"));
        assert!(!body.contains_key("sku"));
    }

    #[test]
    fn test_vendor_create_body_injects_contact_type() {
        let vendor = DesiredResource::Vendor(DesiredVendor {
            contact_name: "Acme Supplies".to_string(),
            ..Default::default()
        });
        let body = vendor.create_body();
        assert_eq!(body.get("contact_type"), Some(&json!("vendor")));
        // but never on update: the contact's type is fixed after creation
        assert!(!vendor.update_body().contains_key("contact_type"));
    }

    #[test]
    fn test_update_body_excludes_create_only_fields() {
        let item = DesiredResource::Item(DesiredItem {
            name: "Widget".to_string(),
            item_type: Some(ItemType::Inventory),
            track_inventory: Some(true),
            initial_stock: Some(100.0),
            initial_stock_rate: Some(20.0),
            reorder_level: Some(25.0),
            ..Default::default()
        });
        let create = item.create_body();
        assert_eq!(create.get("item_type"), Some(&json!("inventory")));
        assert_eq!(create.get("initial_stock"), Some(&json!(100.0)));

        let update = item.update_body();
        assert!(!update.contains_key("item_type"));
        assert!(!update.contains_key("track_inventory"));
        assert!(!update.contains_key("initial_stock"));
        assert!(!update.contains_key("initial_stock_rate"));
        assert_eq!(update.get("reorder_level"), Some(&json!(25.0)));
    }

    #[test]
    fn test_empty_string_is_distinct_from_unset() {
        let account = DesiredResource::Account(DesiredAccount {
            account_name: "Ops".to_string(),
            description: Some(String::new()),
            ..Default::default()
        });
        let fields = account.diff_fields();
        assert_eq!(fields, vec![("description", json!(""))]);
    }

    #[test]
    fn test_custom_fields_wire_form() {
        let mut custom = BTreeMap::new();
        custom.insert("Region".to_string(), "EMEA".to_string());
        let vendor = DesiredResource::Vendor(DesiredVendor {
            contact_name: "Acme".to_string(),
            custom_fields: Some(custom),
            ..Default::default()
        });
        let body = vendor.create_body();
        assert_eq!(
            body.get("custom_fields"),
            Some(&json!([{"label": "Region", "value": "EMEA"}]))
        );
        // custom fields are written but never drive the update decision
        assert!(vendor.diff_fields().is_empty());
    }

    #[test]
    fn test_choice_parsing() {
        use std::str::FromStr;
        assert_eq!(AccountType::from_str("bank").unwrap(), AccountType::Bank);
        assert_eq!(
            ProductType::from_str("digital_service").unwrap(),
            ProductType::DigitalService
        );
        assert!(matches!(
            AccountType::from_str("piggy_bank"),
            Err(CoreError::InvalidChoice { field: "account_type", .. })
        ));
        assert_eq!(Intent::from_str("absent").unwrap(), Intent::Absent);
    }
}
