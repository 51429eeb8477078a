//! Bookflow core model
//!
//! This crate holds the domain model shared by the Bookflow client and CLI:
//! resource kinds and their per-kind capability records, typed desired-state
//! declarations, remote resource snapshots, the diff engine, and the
//! plan/outcome types the reconciler produces.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                bookflow CLI                  │
//! │        (account/item/vendor apply)           │
//! └──────────────────┬──────────────────────────┘
//!                    │
//! ┌──────────────────▼──────────────────────────┐
//! │               bookflow-api                   │
//! │   Transport ── fetch ── locate ── reconcile  │
//! └──────────────────┬──────────────────────────┘
//!                    │
//! ┌──────────────────▼──────────────────────────┐
//! │               bookflow-core                  │
//! │   kinds · desired state · diff · plans       │
//! └─────────────────────────────────────────────┘
//! ```

pub mod desired;
pub mod diff;
pub mod error;
pub mod kind;
pub mod plan;
pub mod resource;

// Re-exports
pub use desired::{
    AccountType, BillingAddress, DesiredAccount, DesiredItem, DesiredResource, DesiredState,
    DesiredVendor, Intent, ItemType, ProductType, VendorSubType,
};
pub use diff::{differing_fields, needs_update, values_equal};
pub use error::{CoreError, Result};
pub use kind::ResourceKind;
pub use plan::{Outcome, Plan, PlanAction};
pub use resource::{RemoteResource, ResourceStatus};
