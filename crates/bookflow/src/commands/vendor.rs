use super::{print_resource, print_resources, run_reconcile};
use bookflow_api::{BooksClient, Selector, fetch_all, find};
use bookflow_core::{
    BillingAddress, DesiredState, DesiredVendor, Intent, ResourceKind, VendorSubType,
};
use clap::{Args, Subcommand};
use std::collections::BTreeMap;

#[derive(Subcommand)]
pub enum VendorCommands {
    /// Converge a vendor contact to the declared state
    Apply(ApplyArgs),
    /// List vendor contacts
    List(ListArgs),
    /// Show a single vendor contact
    Get(GetArgs),
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Contact name; identifies the vendor across invocations
    #[arg(long)]
    name: String,

    #[arg(long)]
    company_name: Option<String>,

    /// individual or business
    #[arg(long)]
    vendor_sub_type: Option<VendorSubType>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    mobile: Option<String>,

    #[arg(long)]
    website: Option<String>,

    /// ISO currency code, e.g. EUR
    #[arg(long)]
    currency_code: Option<String>,

    /// Net payment terms in days
    #[arg(long)]
    payment_terms: Option<i64>,

    #[arg(long)]
    payment_terms_label: Option<String>,

    /// Billing address as a JSON object, e.g.
    /// '{"address": "1 Main St", "city": "Berlin", "country": "DE"}'
    #[arg(long, value_parser = parse_billing_address)]
    billing_address: Option<BillingAddress>,

    #[arg(long)]
    tax_id: Option<String>,

    #[arg(long)]
    notes: Option<String>,

    /// Custom field as label=value; repeatable
    #[arg(long = "custom-field", value_parser = parse_custom_field)]
    custom_fields: Vec<(String, String)>,

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
    /// Look up by opaque contact id
    #[arg(long, conflicts_with = "name")]
    id: Option<String>,

    /// Look up by contact name
    #[arg(long)]
    name: Option<String>,
}

fn parse_billing_address(raw: &str) -> Result<BillingAddress, String> {
    serde_json::from_str(raw).map_err(|err| format!("invalid billing address JSON: {err}"))
}

fn parse_custom_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(label, value)| (label.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected label=value, got '{raw}'"))
}

pub async fn handle(
    cmd: &VendorCommands,
    client: BooksClient,
    check: bool,
    json: bool,
) -> anyhow::Result<()> {
    match cmd {
        VendorCommands::Apply(args) => {
            let custom_fields = if args.custom_fields.is_empty() {
                None
            } else {
                Some(args.custom_fields.iter().cloned().collect::<BTreeMap<_, _>>())
            };
            let desired = DesiredState::new(
                args.state,
                DesiredVendor {
                    contact_name: args.name.clone(),
                    company_name: args.company_name.clone(),
                    vendor_sub_type: args.vendor_sub_type,
                    email: args.email.clone(),
                    phone: args.phone.clone(),
                    mobile: args.mobile.clone(),
                    website: args.website.clone(),
                    currency_code: args.currency_code.clone(),
                    payment_terms: args.payment_terms,
                    payment_terms_label: args.payment_terms_label.clone(),
                    billing_address: args.billing_address.clone(),
                    tax_id: args.tax_id.clone(),
                    notes: args.notes.clone(),
                    custom_fields,
                },
            );
            run_reconcile(client, desired, check, json).await
        }
        VendorCommands::List(args) => {
            let vendors = fetch_all(&client, ResourceKind::Vendor, args.filter_by.as_deref()).await?;
            print_resources(ResourceKind::Vendor, &vendors, json)
        }
        VendorCommands::Get(args) => {
            let selector = match (&args.id, &args.name) {
                (Some(id), _) => Selector::ResourceId(id.clone()),
                (None, Some(name)) => Selector::Identity(name.clone()),
                (None, None) => anyhow::bail!("one of --id or --name is required"),
            };
            match find(&client, ResourceKind::Vendor, &selector).await? {
                Some(vendor) => print_resource(&vendor),
                None => anyhow::bail!("vendor not found"),
            }
        }
    }
}
