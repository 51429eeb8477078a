use super::{print_resource, print_resources, run_reconcile};
use bookflow_api::{BooksClient, Selector, fetch_all, find};
use bookflow_core::{DesiredItem, DesiredState, Intent, ItemType, ProductType, ResourceKind};
use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Converge an item to the declared state
    Apply(ApplyArgs),
    /// List items
    List(ListArgs),
    /// Show a single item
    Get(GetArgs),
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Item name; identifies the item across invocations
    #[arg(long)]
    name: String,

    /// Selling price
    #[arg(long)]
    rate: Option<f64>,

    #[arg(long)]
    description: Option<String>,

    /// Stock keeping unit
    #[arg(long)]
    sku: Option<String>,

    /// goods, service or digital_service
    #[arg(long)]
    product_type: Option<ProductType>,

    /// Unit of measure, e.g. "pcs" or "kg"
    #[arg(long)]
    unit: Option<String>,

    #[arg(long)]
    tax_id: Option<String>,

    #[arg(long)]
    tax_percentage: Option<f64>,

    /// Cost price
    #[arg(long)]
    purchase_rate: Option<f64>,

    #[arg(long)]
    purchase_account_id: Option<String>,

    /// Sales account id
    #[arg(long)]
    account_id: Option<String>,

    #[arg(long)]
    inventory_account_id: Option<String>,

    /// inventory or non_inventory; fixed at creation
    #[arg(long)]
    item_type: Option<ItemType>,

    /// Whether stock levels are tracked; fixed at creation
    #[arg(long)]
    track_inventory: Option<bool>,

    /// Opening stock quantity; fixed at creation
    #[arg(long)]
    initial_stock: Option<f64>,

    /// Per-unit value of the opening stock; fixed at creation
    #[arg(long)]
    initial_stock_rate: Option<f64>,

    #[arg(long)]
    reorder_level: Option<f64>,

    /// Desired state: present, absent, active or inactive
    #[arg(long, default_value = "present")]
    state: Intent,
}

#[derive(Args)]
pub struct ListArgs {
    /// Remote-side listing filter, e.g. Status.Active
    #[arg(long)]
    filter_by: Option<String>,
}

#[derive(Args)]
pub struct GetArgs {
    /// Look up by opaque item id
    #[arg(long, conflicts_with_all = ["name", "sku"])]
    id: Option<String>,

    /// Look up by item name
    #[arg(long, conflicts_with = "sku")]
    name: Option<String>,

    /// Look up by SKU
    #[arg(long)]
    sku: Option<String>,
}

pub async fn handle(
    cmd: &ItemCommands,
    client: BooksClient,
    check: bool,
    json: bool,
) -> anyhow::Result<()> {
    match cmd {
        ItemCommands::Apply(args) => {
            let desired = DesiredState::new(
                args.state,
                DesiredItem {
                    name: args.name.clone(),
                    rate: args.rate,
                    description: args.description.clone(),
                    sku: args.sku.clone(),
                    product_type: args.product_type,
                    unit: args.unit.clone(),
                    tax_id: args.tax_id.clone(),
                    tax_percentage: args.tax_percentage,
                    purchase_rate: args.purchase_rate,
                    purchase_account_id: args.purchase_account_id.clone(),
                    account_id: args.account_id.clone(),
                    inventory_account_id: args.inventory_account_id.clone(),
                    item_type: args.item_type,
                    track_inventory: args.track_inventory,
                    initial_stock: args.initial_stock,
                    initial_stock_rate: args.initial_stock_rate,
                    reorder_level: args.reorder_level,
                },
            );
            run_reconcile(client, desired, check, json).await
        }
        ItemCommands::List(args) => {
            let items = fetch_all(&client, ResourceKind::Item, args.filter_by.as_deref()).await?;
            print_resources(ResourceKind::Item, &items, json)
        }
        ItemCommands::Get(args) => {
            let selector = match (&args.id, &args.name, &args.sku) {
                (Some(id), _, _) => Selector::ResourceId(id.clone()),
                (None, Some(name), _) => Selector::Identity(name.clone()),
                (None, None, Some(sku)) => Selector::SecondaryKey {
                    field: "sku".to_string(),
                    value: sku.clone(),
                },
                (None, None, None) => anyhow::bail!("one of --id, --name or --sku is required"),
            };
            match find(&client, ResourceKind::Item, &selector).await? {
                Some(item) => print_resource(&item),
                None => anyhow::bail!("item not found"),
            }
        }
    }
}
