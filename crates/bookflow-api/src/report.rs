//! Outcome assembly
//!
//! Pure function from a computed plan (plus whatever the execution step
//! returned) to the final [`Outcome`]. No side effects and no network
//! access, so dry-run and real-run reports agree by construction on
//! everything but tense.

use bookflow_core::{Intent, Outcome, Plan, PlanAction, RemoteResource, ResourceKind};

/// Assemble the outcome of one reconcile invocation.
///
/// `executed` is the server-echoed resource from the mutating request, when
/// one was issued and returned a payload. Under dry-run no mutation happened
/// and the message is phrased as a future-tense intent.
pub fn outcome(
    kind: ResourceKind,
    intent: Intent,
    plan: &Plan,
    executed: Option<RemoteResource>,
    dry_run: bool,
) -> Outcome {
    let noun = kind.display_name();
    let message = match (plan.action, dry_run) {
        (PlanAction::NoOp, _) => match intent {
            Intent::Present => format!("{noun} already exists with correct parameters"),
            Intent::Absent => format!("{noun} does not exist"),
            Intent::Active => format!("{noun} is already active"),
            Intent::Inactive => format!("{noun} is already inactive"),
        },
        (PlanAction::Create, false) => format!("{noun} created successfully"),
        (PlanAction::Create, true) => format!("{noun} would be created"),
        (PlanAction::Update, false) => format!("{noun} updated successfully"),
        (PlanAction::Update, true) => format!("{noun} would be updated"),
        (PlanAction::Delete, false) => format!("{noun} deleted successfully"),
        (PlanAction::Delete, true) => format!("{noun} would be deleted"),
        (PlanAction::Activate, false) => format!("{noun} marked as active"),
        (PlanAction::Activate, true) => format!("{noun} would be marked as active"),
        (PlanAction::Deactivate, false) => format!("{noun} marked as inactive"),
        (PlanAction::Deactivate, true) => format!("{noun} would be marked as inactive"),
    };

    let resource = match plan.action {
        PlanAction::NoOp => plan.observed.clone(),
        // A simulated mutation has no resulting snapshot to report
        _ if dry_run => None,
        PlanAction::Delete => None,
        // Status endpoints may answer without echoing the resource; fall
        // back to the pre-action snapshot.
        _ => executed.or_else(|| plan.observed.clone()),
    };

    Outcome {
        changed: plan.changes(),
        resource,
        message,
    }
}
