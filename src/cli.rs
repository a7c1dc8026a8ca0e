//! Command-line interface.

use clap::{Parser, Subcommand};

use crate::acquire::build_fetcher;
use crate::config::Settings;
use crate::retailers::RetailerRegistry;
use crate::search::SearchService;
use crate::server;

#[derive(Parser)]
#[command(name = "smartshopper", about = "Multi-retailer product search and price comparison")]
struct Cli {
    /// Verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one query and print the normalized results as JSON.
    Search {
        /// Product query, e.g. "coffee maker".
        query: String,

        /// Retailer identifiers to query; defaults to all known
        /// retailers.
        #[arg(long, value_delimiter = ',')]
        sources: Vec<String>,
    },
    /// Start the HTTP API server.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

/// Check for --verbose before clap runs, so logging can be initialized
/// first.
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    tracing::debug!(?settings, "loaded settings");

    match cli.command {
        Command::Search { query, sources } => {
            let fetcher = build_fetcher(&settings)?;
            let service = SearchService::new(RetailerRegistry::with_known_retailers(), fetcher)
                .with_retailer_budget(settings.request_timeout);

            let sources = if sources.is_empty() {
                service.known_sources()
            } else {
                sources
            };

            let products = service.search(&query, &sources).await?;
            println!("{}", serde_json::to_string_pretty(&products)?);
            Ok(())
        }
        Command::Serve { host, port } => server::serve(&settings, &host, port).await,
    }
}
