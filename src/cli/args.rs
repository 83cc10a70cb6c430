//! Command-line argument parsing for News Explorer
//!
//! This module defines the CLI structure using clap derive macros: one-shot
//! searches, an interactive browsing session and API key management.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::constants::{env, newsapi};

/// News Explorer - search recent news from the terminal
#[derive(Parser, Debug)]
#[command(
    name = "news_explorer",
    version,
    about = "Search recent news articles by keyword or category",
    long_about = "Search the NewsAPI index by free text or by one of the preset categories.
Results are sorted newest first, shown a page at a time and kept in memory for four hours."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// API key for this run (not saved)
    #[arg(long, global = true, value_name = "KEY", env = env::API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search articles by free text
    Search(SearchArgs),

    /// Show articles for a preset category
    Category(CategoryArgs),

    /// List the preset categories
    Categories,

    /// Interactive session: search, switch categories and page through results
    Browse(BrowseArgs),

    /// Manage the stored API key
    Auth(AuthArgs),
}

/// Options shared by the one-shot result commands
#[derive(Args, Debug, Clone, Default)]
pub struct ResultArgs {
    /// Earliest publication date (YYYY-MM-DD), default a few days ago
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Page of results to show
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Articles per page (default from configuration)
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,
}

/// Arguments for the search command
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    #[command(flatten)]
    pub results: ResultArgs,
}

impl SearchArgs {
    /// The words of the query joined back into one string
    pub fn query(&self) -> String {
        self.text.join(" ")
    }
}

/// Arguments for the category command
#[derive(Args, Debug, Clone)]
pub struct CategoryArgs {
    /// Category name (default from configuration)
    pub name: Option<String>,

    #[command(flatten)]
    pub results: ResultArgs,
}

/// Arguments for the interactive session
#[derive(Args, Debug, Clone)]
pub struct BrowseArgs {
    /// Initial search text instead of the default category
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Initial category
    #[arg(long, value_name = "NAME", conflicts_with = "search")]
    pub category: Option<String>,

    /// Initial start date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub from: Option<NaiveDate>,
}

/// Arguments for authentication management
#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub action: AuthAction,
}

/// Authentication actions
#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Store an API key (prompts when --token is not given)
    Setup {
        /// Key to store
        #[arg(long, value_name = "KEY")]
        token: Option<String>,
    },

    /// Show where the API key comes from
    Status,

    /// Remove the stored API key
    Clear,
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), newsapi::DATE_FORMAT)
        .map_err(|e| format!("expected a date like 2024-03-06 ({})", e))
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level from the verbosity flags, if any was given
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

impl ResultArgs {
    /// Check the paging options
    pub fn validate(&self) -> Result<(), String> {
        if self.page == 0 {
            return Err("Page numbers start at 1".to_string());
        }
        if self.page_size == Some(0) {
            return Err("Page size must be greater than 0".to_string());
        }
        Ok(())
    }
}
