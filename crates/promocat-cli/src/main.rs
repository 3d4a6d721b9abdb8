mod browse;
mod catalog;

use clap::{Parser, Subcommand};
use promocat_gateway::{GatewayClient, GatewayConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "promocat-cli")]
#[command(about = "Browse the promotional-products catalog from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog items (in-stock only unless --availability says otherwise)
    Catalog {
        /// Case-insensitive text matched against name and description
        #[arg(long)]
        search: Option<String>,
        /// Exact category name
        #[arg(long)]
        category: Option<String>,
        /// available | soldOut | any (Spanish aliases accepted)
        #[arg(long)]
        availability: Option<String>,
        /// Number of items to show; rounded up to whole pages
        #[arg(long)]
        visible: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one product with its colors and related items
    Product {
        /// Parent SKU
        id: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the catalog's categories
    Categories,
    /// Interactive session over stdin
    Browse,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("promocat-cli: no command given; see --help");
        return Ok(());
    };

    let config = promocat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = GatewayClient::new(GatewayConfig::from_app_config(&config))?;

    match command {
        Commands::Catalog {
            search,
            category,
            availability,
            visible,
            json,
        } => {
            let filters = catalog::CatalogFilters {
                search,
                category,
                availability,
                visible,
            };
            catalog::run_catalog(&client, config.page_size, &filters, json).await?;
        }
        Commands::Product { id, json } => catalog::run_product(&client, &id, json).await?,
        Commands::Categories => catalog::run_categories(&client).await?,
        Commands::Browse => browse::run_browse(client, config.page_size).await?,
    }

    Ok(())
}
