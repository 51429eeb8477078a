use super::{print_resource, print_resources, run_reconcile};
use bookflow_api::{BooksClient, Selector, fetch_all, find};
use bookflow_core::{AccountType, DesiredAccount, DesiredState, Intent, ResourceKind};
use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Converge an account to the declared state
    Apply(ApplyArgs),
    /// List every account in the chart of accounts
    List,
    /// Show a single account
    Get(GetArgs),
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Account name; identifies the account across invocations
    #[arg(long)]
    name: String,

    /// Ledger classification (required unless state is absent)
    #[arg(long = "type")]
    account_type: Option<AccountType>,

    #[arg(long)]
    description: Option<String>,

    /// Ledger code shown alongside the account
    #[arg(long)]
    account_code: Option<String>,

    /// Id of the parent account for sub-accounts
    #[arg(long)]
    parent_account_id: Option<String>,

    /// Desired state: present or absent (accounts have no status toggle)
    #[arg(long, default_value = "present")]
    state: Intent,
}

#[derive(Args)]
pub struct GetArgs {
    /// Look up by opaque account id
    #[arg(long, conflicts_with = "name")]
    id: Option<String>,

    /// Look up by account name
    #[arg(long)]
    name: Option<String>,
}

pub async fn handle(
    cmd: &AccountCommands,
    client: BooksClient,
    check: bool,
    json: bool,
) -> anyhow::Result<()> {
    match cmd {
        AccountCommands::Apply(args) => {
            if args.state == Intent::Present && args.account_type.is_none() {
                anyhow::bail!("--type is required when state is 'present'");
            }
            let desired = DesiredState::new(
                args.state,
                DesiredAccount {
                    account_name: args.name.clone(),
                    account_type: args.account_type,
                    description: args.description.clone(),
                    account_code: args.account_code.clone(),
                    parent_account_id: args.parent_account_id.clone(),
                },
            );
            run_reconcile(client, desired, check, json).await
        }
        AccountCommands::List => {
            let accounts = fetch_all(&client, ResourceKind::Account, None).await?;
            print_resources(ResourceKind::Account, &accounts, json)
        }
        AccountCommands::Get(args) => {
            let selector = match (&args.id, &args.name) {
                (Some(id), _) => Selector::ResourceId(id.clone()),
                (None, Some(name)) => Selector::Identity(name.clone()),
                (None, None) => anyhow::bail!("one of --id or --name is required"),
            };
            match find(&client, ResourceKind::Account, &selector).await? {
                Some(account) => print_resource(&account),
                None => anyhow::bail!("account not found"),
            }
        }
    }
}
