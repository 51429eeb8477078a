mod commands;

use bookflow_api::BooksClient;
use bookflow_config::BooksContext;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bookflow")]
#[command(version)]
#[command(about = "Declare accounting resources in Zoho Books and converge remote state to match", long_about = None)]
struct Cli {
    /// Zoho Books organization ID (falls back to ZOHO_ORGANIZATION_ID)
    #[arg(long, global = true)]
    organization_id: Option<String>,

    /// API access token (falls back to ZOHO_ACCESS_TOKEN)
    #[arg(long, global = true)]
    access_token: Option<String>,

    /// API domain (falls back to ZOHO_API_DOMAIN, then https://books.zoho.com)
    #[arg(long, global = true)]
    api_domain: Option<String>,

    /// Report what would change without issuing the mutating request
    #[arg(long, global = true)]
    check: bool,

    /// Emit results as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage chart-of-accounts entries
    #[command(subcommand)]
    Account(commands::account::AccountCommands),

    /// Manage catalog items
    #[command(subcommand)]
    Item(commands::item::ItemCommands),

    /// Manage vendor contacts
    #[command(subcommand)]
    Vendor(commands::vendor::VendorCommands),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let context = BooksContext::resolve(
        cli.organization_id.clone(),
        cli.access_token.clone(),
        cli.api_domain.clone(),
    )?;
    let client = BooksClient::new(context);

    match &cli.command {
        Commands::Account(cmd) => commands::account::handle(cmd, client, cli.check, cli.json).await,
        Commands::Item(cmd) => commands::item::handle(cmd, client, cli.check, cli.json).await,
        Commands::Vendor(cmd) => commands::vendor::handle(cmd, client, cli.check, cli.json).await,
    }
}
