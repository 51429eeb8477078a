pub mod account;
pub mod item;
pub mod vendor;

use bookflow_api::{BooksClient, Reconciler};
use bookflow_core::{DesiredState, Outcome, RemoteResource, ResourceKind};
use colored::Colorize;

/// Run one reconcile invocation and print its outcome.
pub async fn run_reconcile(
    client: BooksClient,
    desired: DesiredState,
    check: bool,
    json: bool,
) -> anyhow::Result<()> {
    let reconciler = Reconciler::new(client).dry_run(check);
    let outcome = reconciler.reconcile(&desired).await?;
    print_outcome(&outcome, check, json)
}

pub fn print_outcome(outcome: &Outcome, check: bool, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }
    if outcome.changed {
        if check {
            println!("{} {}", "~".yellow().bold(), outcome.message.yellow());
        } else {
            println!("{} {}", "✓".green().bold(), outcome.message.green());
        }
    } else {
        println!("  {}", outcome.message);
    }
    Ok(())
}

pub fn print_resources(
    kind: ResourceKind,
    resources: &[RemoteResource],
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let values: Vec<_> = resources.iter().map(RemoteResource::to_json).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }
    if resources.is_empty() {
        println!("No {}s found", kind.display_name().to_lowercase());
        return Ok(());
    }
    for resource in resources {
        let name = resource.str_field(kind.identity_field()).unwrap_or("-");
        println!("{}  {}", resource.resource_id.cyan(), name);
    }
    println!("\n{} total", resources.len());
    Ok(())
}

// A single resource reads best as its full field set either way
pub fn print_resource(resource: &RemoteResource) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&resource.to_json())?);
    Ok(())
}
