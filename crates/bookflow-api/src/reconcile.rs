//! The reconciliation state machine
//!
//! Given a desired state and the located remote resource, decide the single
//! action to take and execute it. Exactly one [`Plan`] is computed per
//! invocation and at most one mutating request is issued for it. Dry-run
//! shares the decision path bit for bit and branches only at the execution
//! boundary, so dry-run and real-run always agree on `changed`.
//!
//! No optimistic-concurrency check is performed between the locating read
//! and the mutating write; the remote system is the sole source of truth
//! and a concurrent external mutation is an accepted race.

use crate::client::BooksClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::locate;
use crate::report;
use bookflow_core::{
    CoreError, DesiredState, Intent, Outcome, Plan, PlanAction, RemoteResource, ResourceKind,
    ResourceStatus, diff,
};
use serde_json::Value;

/// Reconciles one desired resource per invocation
pub struct Reconciler {
    client: BooksClient,
    dry_run: bool,
}

impl Reconciler {
    pub fn new(client: BooksClient) -> Self {
        Self {
            client,
            dry_run: false,
        }
    }

    /// Compute plans and report outcomes without issuing mutating requests
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Converge the remote resource to the desired state.
    ///
    /// Locates the target by its identity value, computes the plan, executes
    /// it (unless dry-run) and packages the outcome.
    pub async fn reconcile(&self, desired: &DesiredState) -> Result<Outcome> {
        let kind = desired.kind();

        // A status intent against a kind with no status sub-resource can
        // never succeed; fail before issuing any request.
        if desired.intent.target_status().is_some() && !kind.supports_status() {
            return Err(CoreError::StatusUnsupported { kind }.into());
        }

        let observed =
            locate::find_by_identity(&self.client, kind, desired.identity()).await?;

        let plan = plan(desired, observed)?;
        tracing::debug!(%kind, identity = desired.identity(), action = %plan.action, "planned");

        let executed = if self.dry_run {
            None
        } else {
            self.execute(desired, &plan).await?
        };

        Ok(report::outcome(
            kind,
            desired.intent,
            &plan,
            executed,
            self.dry_run,
        ))
    }

    /// Issue the plan's single mutating request, returning the
    /// server-echoed resource when the response carries one
    async fn execute(
        &self,
        desired: &DesiredState,
        plan: &Plan,
    ) -> Result<Option<RemoteResource>> {
        let kind = desired.kind();
        match plan.action {
            PlanAction::NoOp => Ok(None),
            PlanAction::Create => {
                tracing::info!(%kind, identity = desired.identity(), "creating");
                let body = Value::Object(desired.resource.create_body());
                let mut envelope = self
                    .client
                    .post(kind.collection_path(), Some(&body))
                    .await?
                    .ensure_ok()?;
                Ok(take_resource(&mut envelope, kind))
            }
            PlanAction::Update => {
                let observed = expect_observed(plan, desired)?;
                tracing::info!(
                    %kind,
                    identity = desired.identity(),
                    fields = ?plan.differing,
                    "updating"
                );
                let body = Value::Object(plan.patch.clone().unwrap_or_default());
                let mut envelope = self
                    .client
                    .put(&kind.resource_path(&observed.resource_id), &body)
                    .await?
                    .ensure_ok()?;
                Ok(take_resource(&mut envelope, kind))
            }
            PlanAction::Delete => {
                let observed = expect_observed(plan, desired)?;
                tracing::info!(%kind, identity = desired.identity(), "deleting");
                self.client
                    .delete(&kind.resource_path(&observed.resource_id))
                    .await?
                    .ensure_ok()?;
                Ok(None)
            }
            PlanAction::Activate => {
                self.transition(desired, plan, ResourceStatus::Active).await
            }
            PlanAction::Deactivate => {
                self.transition(desired, plan, ResourceStatus::Inactive).await
            }
        }
    }

    async fn transition(
        &self,
        desired: &DesiredState,
        plan: &Plan,
        target: ResourceStatus,
    ) -> Result<Option<RemoteResource>> {
        let kind = desired.kind();
        let observed = expect_observed(plan, desired)?;
        let path = kind
            .status_path(&observed.resource_id, target)
            .ok_or(CoreError::StatusUnsupported { kind })?;
        tracing::info!(%kind, identity = desired.identity(), %target, "transitioning status");
        let mut envelope = self.client.post(&path, None).await?.ensure_ok()?;
        Ok(take_resource(&mut envelope, kind))
    }
}

/// Decide the single action for a desired state against the located
/// resource. Pure: both dry-run and real-run go through here unchanged.
pub fn plan(desired: &DesiredState, observed: Option<RemoteResource>) -> Result<Plan> {
    match desired.intent {
        Intent::Present => match observed {
            None => Ok(Plan::create()),
            Some(existing) => {
                let differing = diff::differing_fields(&existing, &desired.resource);
                if differing.is_empty() {
                    Ok(Plan::no_op(Some(existing)))
                } else {
                    let patch = desired.resource.update_body();
                    Ok(Plan::update(existing, patch, differing))
                }
            }
        },
        Intent::Absent => match observed {
            None => Ok(Plan::no_op(None)),
            Some(existing) => Ok(Plan::delete(existing)),
        },
        Intent::Active => plan_transition(desired, observed, ResourceStatus::Active),
        Intent::Inactive => plan_transition(desired, observed, ResourceStatus::Inactive),
    }
}

fn plan_transition(
    desired: &DesiredState,
    observed: Option<RemoteResource>,
    target: ResourceStatus,
) -> Result<Plan> {
    let kind = desired.kind();
    if !kind.supports_status() {
        return Err(CoreError::StatusUnsupported { kind }.into());
    }
    match observed {
        // Fatal before any request: a status transition needs an existing
        // resource.
        None => Err(CoreError::InvalidTransition {
            kind,
            name: desired.identity().to_string(),
            target,
        }
        .into()),
        Some(existing) => {
            if existing.status() == Some(target) {
                Ok(Plan::no_op(Some(existing)))
            } else if target == ResourceStatus::Active {
                Ok(Plan::activate(existing))
            } else {
                Ok(Plan::deactivate(existing))
            }
        }
    }
}

fn take_resource(envelope: &mut Envelope, kind: ResourceKind) -> Option<RemoteResource> {
    envelope
        .take(kind.payload_key())
        .and_then(|payload| RemoteResource::from_payload(kind, payload))
}

fn expect_observed<'a>(plan: &'a Plan, desired: &DesiredState) -> Result<&'a RemoteResource> {
    plan.observed.as_ref().ok_or_else(|| {
        crate::error::ApiError::UnexpectedPayload(format!(
            "plan for '{}' lost its observed resource",
            desired.identity()
        ))
    })
}
