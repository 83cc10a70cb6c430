//! News Explorer CLI application
//!
//! Command-line interface for searching recent news articles by keyword or
//! category, with paging and a four-hour in-memory result cache.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

// Import CLI modules through the library
use news_explorer::cli::{
    handle_auth, handle_browse, handle_categories, handle_category, handle_search, Cli, Commands,
    CommandContext,
};
use news_explorer::config::AppConfig;
use news_explorer::errors::Result;

#[tokio::main]
async fn main() {
    // Initialize program
    let result = run().await;

    // Handle any errors that occurred
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok(); // Ignore errors if file doesn't exist

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Configuration decides the default log level, so it is loaded first
    let config = AppConfig::load(cli.global.config.clone()).await?;

    // Initialize logging based on verbosity
    init_logging(&cli, &config);

    info!("News Explorer v{} starting", env!("CARGO_PKG_VERSION"));

    let ctx = CommandContext::new(config, cli.global.api_key.clone(), cli.global.quiet)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Search(args) => {
            info!("Executing search command");
            handle_search(&ctx, args).await
        }
        Commands::Category(args) => {
            info!("Executing category command");
            handle_category(&ctx, args).await
        }
        Commands::Categories => handle_categories(&ctx),
        Commands::Browse(args) => {
            info!("Executing browse command");
            handle_browse(&ctx, args).await
        }
        Commands::Auth(args) => {
            info!("Executing auth command");
            handle_auth(&ctx, args).await
        }
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli, config: &AppConfig) {
    let log_level = cli
        .log_level()
        .map(|level| level.to_string().to_lowercase())
        .unwrap_or_else(|| config.logging.level.clone());

    // Create environment filter; RUST_LOG directives still apply
    let mut filter = EnvFilter::from_default_env();
    match format!("news_explorer={}", log_level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring invalid log level '{}': {}", log_level, e),
    }

    // Initialize subscriber
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose) // Show levels only in very verbose mode
        .with_writer(std::io::stderr)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
