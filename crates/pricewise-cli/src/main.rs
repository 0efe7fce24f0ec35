mod render;
mod search;
mod shell;

use clap::{Parser, Subcommand};
use pricewise_client::{SearchClient, SearchController};
use pricewise_core::{CategoryFilter, FilterState, SortKey, SourceFilter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricewise")]
#[command(about = "Compare product prices across Flipkart, Amazon, Vijay Sales, and JioMart")]
struct Cli {
    /// Backend base URL (overrides PRICEWISE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one search and print the results
    Search {
        /// Product to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Only show products from this source, or "all"
        #[arg(long, default_value = "all")]
        source: SourceFilter,

        /// Only show products in this category, or "all"
        #[arg(long, default_value = "all")]
        category: CategoryFilter,

        /// price-asc or price-desc
        #[arg(long, default_value = "price-asc")]
        sort: SortKey,

        /// Print the shaped results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that the backend is up
    Health,
    /// Interactive search with live filtering (the default)
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = pricewise_core::load_app_config_with_api_url(cli.api_url.as_deref())?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "configuration loaded");

    let client = SearchClient::new(&config)?;

    match cli.command {
        Some(Commands::Search {
            query,
            source,
            category,
            sort,
            json,
        }) => {
            let controller = SearchController::new(client);
            let filter = FilterState {
                source,
                category,
                sort,
            };
            search::run_search(&controller, &query.join(" "), filter, json).await?;
        }
        Some(Commands::Health) => search::run_health(&client).await?,
        Some(Commands::Shell) | None => {
            let controller = SearchController::new(client);
            shell::run_shell(&controller).await?;
        }
    }

    Ok(())
}
