//! Plans and outcomes
//!
//! A [`Plan`] is the single decision a reconcile invocation arrives at:
//! exactly one is computed per invocation and at most one mutating request is
//! issued for it. The [`Outcome`] reports what happened (or, under dry-run,
//! what would happen).

use crate::resource::RemoteResource;
use serde::Serialize;
use serde_json::{Map, Value};

/// The single action a reconcile invocation decided on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    /// Remote state already matches the desired state
    NoOp,
    /// Create a new resource
    Create,
    /// Update an existing resource
    Update,
    /// Delete a resource
    Delete,
    /// Mark a resource active
    Activate,
    /// Mark a resource inactive
    Deactivate,
}

impl std::fmt::Display for PlanAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanAction::NoOp => write!(f, "no-op"),
            PlanAction::Create => write!(f, "create"),
            PlanAction::Update => write!(f, "update"),
            PlanAction::Delete => write!(f, "delete"),
            PlanAction::Activate => write!(f, "activate"),
            PlanAction::Deactivate => write!(f, "deactivate"),
        }
    }
}

/// A computed decision plus the snapshot it was computed against
#[derive(Debug, Clone)]
pub struct Plan {
    pub action: PlanAction,

    /// The resource as observed before any action (absent for Create)
    pub observed: Option<RemoteResource>,

    /// Update request body; present only for Update
    pub patch: Option<Map<String, Value>>,

    /// Names of the fields that drove an Update decision
    pub differing: Vec<String>,
}

impl Plan {
    pub fn no_op(observed: Option<RemoteResource>) -> Self {
        Self {
            action: PlanAction::NoOp,
            observed,
            patch: None,
            differing: Vec::new(),
        }
    }

    pub fn create() -> Self {
        Self {
            action: PlanAction::Create,
            observed: None,
            patch: None,
            differing: Vec::new(),
        }
    }

    pub fn update(
        observed: RemoteResource,
        patch: Map<String, Value>,
        differing: Vec<String>,
    ) -> Self {
        Self {
            action: PlanAction::Update,
            observed: Some(observed),
            patch: Some(patch),
            differing,
        }
    }

    pub fn delete(observed: RemoteResource) -> Self {
        Self {
            action: PlanAction::Delete,
            observed: Some(observed),
            patch: None,
            differing: Vec::new(),
        }
    }

    pub fn activate(observed: RemoteResource) -> Self {
        Self {
            action: PlanAction::Activate,
            observed: Some(observed),
            patch: None,
            differing: Vec::new(),
        }
    }

    pub fn deactivate(observed: RemoteResource) -> Self {
        Self {
            action: PlanAction::Deactivate,
            observed: Some(observed),
            patch: None,
            differing: Vec::new(),
        }
    }

    /// Whether executing this plan mutates remote state
    pub fn changes(&self) -> bool {
        self.action != PlanAction::NoOp
    }
}

/// Final result of one reconcile invocation
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// Whether a change occurred (or would occur, under dry-run)
    pub changed: bool,

    /// Resulting resource snapshot, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<RemoteResource>,

    /// Human-readable summary of the operation
    pub message: String,
}
