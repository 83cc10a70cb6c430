//! Command handlers for News Explorer CLI
//!
//! This module implements the command handlers that connect CLI arguments to
//! the search pipeline.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::app::{FilterState, NewsClient, NewsSession, ResultCache, ViewState};
use crate::auth::{prompt_token, resolve_credential, ApiToken, AuthStatus, CredentialStore};
use crate::cli::args::{parse_date, AuthAction, AuthArgs, BrowseArgs, CategoryArgs, ResultArgs, SearchArgs};
use crate::cli::render::{error_notice, filter_summary, render_categories, render_view};
use crate::config::AppConfig;
use crate::errors::{AppError, PipelineError, Result};

/// Everything a command needs besides its own arguments
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Loaded configuration
    pub config: AppConfig,
    /// Where the API key is stored
    pub store: CredentialStore,
    /// Key given via --api-key / NEWS_API_KEY for this run only
    pub api_key: Option<String>,
    /// Suppress spinners and decorations
    pub quiet: bool,
}

impl CommandContext {
    /// Build the context from configuration and global flags
    pub fn new(config: AppConfig, api_key: Option<String>, quiet: bool) -> Result<Self> {
        let store = config.auth.credential_store()?;
        Ok(Self {
            config,
            store,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            quiet,
        })
    }

    /// A session over the real news client, using the resolved credential
    fn session(&self) -> Result<NewsSession<NewsClient>> {
        let client = NewsClient::with_config(self.config.client.to_runtime_config())?;
        let endpoint = client.endpoint().clone();
        let cache = Arc::new(ResultCache::new(self.config.cache.clone()));
        let credential = resolve_credential(&self.store, self.api_key.as_deref())?;
        debug!("Credential present: {}", credential.is_present());

        let display = &self.config.display;
        Ok(NewsSession::new(client, cache, endpoint)
            .with_filter(FilterState::with_defaults(
                &display.default_category,
                display.lookback_days,
            ))
            .with_credential(credential)
            .with_store(self.store.clone())
            .with_page_size(display.page_size))
    }

    fn spinner(&self, message: String) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◐", "◓", "◑", "◒", "●"]);
        spinner.set_style(style);
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    /// Fetch (or recall) results for the session's filter with a spinner
    async fn refresh(&self, session: &mut NewsSession<NewsClient>) {
        let spinner = self.spinner(format!("Fetching {}...", filter_summary(session.filter())));
        session.refresh().await;
        spinner.finish_and_clear();
    }
}

/// Handle the search command
pub async fn handle_search(ctx: &CommandContext, args: SearchArgs) -> Result<()> {
    let query = args.query();
    info!("Searching for {:?}", query);
    run_once(ctx, &args.results, |session| session.search(&query)).await
}

/// Handle the category command
pub async fn handle_category(ctx: &CommandContext, args: CategoryArgs) -> Result<()> {
    let category = args
        .name
        .clone()
        .unwrap_or_else(|| ctx.config.display.default_category.clone());
    info!("Showing category {}", category);
    run_once(ctx, &args.results, |session| session.select_category(&category)).await
}

/// Handle the categories command
pub fn handle_categories(ctx: &CommandContext) -> Result<()> {
    print!("{}", render_categories(&ctx.config.display.default_category));
    Ok(())
}

async fn run_once<F>(ctx: &CommandContext, args: &ResultArgs, apply: F) -> Result<()>
where
    F: FnOnce(&mut NewsSession<NewsClient>) -> bool,
{
    args.validate().map_err(AppError::generic)?;

    let mut session = ctx.session()?;
    if let Some(page_size) = args.page_size {
        session = session.with_page_size(page_size);
    }
    apply(&mut session);
    if let Some(from) = args.from {
        session.set_date(from);
    }
    ctx.refresh(&mut session).await;

    if let ViewState::Failed(error) = session.state() {
        return Err(search_failure(error));
    }

    session.jump_to_page(args.page);
    print!("{}", render_view(session.filter(), session.state(), session.page()));
    Ok(())
}

/// Exit error for a failed search
///
/// The user sees one notice. Server and transport details only go to the log.
fn search_failure(error: &PipelineError) -> AppError {
    if !error.is_local() && !error.is_unavailable() {
        warn!("Search failed: {}", error);
    }
    AppError::SearchFailed {
        message: error_notice(error),
    }
}

/// A line typed into the interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Category(String),
    From(NaiveDate),
    Page(usize),
    Next,
    Previous,
    Key(String),
    Categories,
    Stats,
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "search" | "s" if !rest.is_empty() => Ok(BrowseCommand::Search(rest.to_string())),
            "search" | "s" => Err("Usage: search <text>".to_string()),
            "category" | "c" => Ok(BrowseCommand::Category(rest.to_string())),
            "from" | "f" => parse_date(rest).map(BrowseCommand::From),
            "page" | "p" => rest
                .parse::<usize>()
                .map(BrowseCommand::Page)
                .map_err(|_| "Usage: page <number>".to_string()),
            "next" | "n" => Ok(BrowseCommand::Next),
            "prev" | "previous" => Ok(BrowseCommand::Previous),
            "key" if !rest.is_empty() => Ok(BrowseCommand::Key(rest.to_string())),
            "key" => Err("Usage: key <api-key>".to_string()),
            "categories" => Ok(BrowseCommand::Categories),
            "stats" => Ok(BrowseCommand::Stats),
            "help" | "?" => Ok(BrowseCommand::Help),
            "quit" | "exit" | "q" => Ok(BrowseCommand::Quit),
            "" => Err(String::new()),
            other => Err(format!("Unknown command '{}'. Type 'help' for a list", other)),
        }
    }
}

const BROWSE_HELP: &str = "\
Commands:
  search <text>      search by free text (clears the category)
  category [name]    pick a category (clears the search text; empty clears both)
  categories         list the preset categories
  from <YYYY-MM-DD>  change the start date
  page <n>           jump to a page
  next | prev        move between pages
  key <api-key>      store an API key and use it
  stats              show cache statistics
  help               show this help
  quit               leave";

/// Handle the browse command: a line-oriented interactive session
///
/// Errors inside the session are shown and the session continues.
pub async fn handle_browse(ctx: &CommandContext, args: BrowseArgs) -> Result<()> {
    let mut session = ctx.session()?;
    if let Some(text) = &args.search {
        session.search(text);
    } else if let Some(category) = &args.category {
        session.select_category(category);
    }
    if let Some(from) = args.from {
        session.set_date(from);
    }

    println!("News Explorer - type 'help' for commands");
    ctx.refresh(&mut session).await;
    print!("{}", render_view(session.filter(), session.state(), session.page()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match line.parse::<BrowseCommand>() {
            Ok(command) => command,
            Err(message) => {
                if !message.is_empty() {
                    println!("{}", message);
                }
                continue;
            }
        };
        debug!("Browse command: {:?}", command);

        let needs_fetch = match command {
            BrowseCommand::Search(text) => session.search(&text),
            BrowseCommand::Category(category) => session.select_category(&category),
            BrowseCommand::From(date) => session.set_date(date),
            BrowseCommand::Page(page) => {
                session.jump_to_page(page);
                false
            }
            BrowseCommand::Next => {
                session.step_page(1);
                false
            }
            BrowseCommand::Previous => {
                session.step_page(-1);
                false
            }
            BrowseCommand::Key(key) => match ApiToken::new(key) {
                Ok(token) => match session.save_credential(token) {
                    Ok(()) => {
                        println!("API key saved to {}", ctx.store.path().display());
                        true
                    }
                    Err(e) => {
                        warn!("Could not save API key: {}", e);
                        println!("Could not save API key: {}", e);
                        continue;
                    }
                },
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            },
            BrowseCommand::Categories => {
                print!("{}", render_categories(session.filter().category()));
                continue;
            }
            BrowseCommand::Stats => {
                let purged = session.cache().purge_expired().await;
                println!("Cache: {}", session.cache().stats().await);
                if purged > 0 {
                    println!("Dropped {} expired entries", purged);
                }
                continue;
            }
            BrowseCommand::Help => {
                println!("{}", BROWSE_HELP);
                continue;
            }
            BrowseCommand::Quit => break,
        };

        // Anything that is not loaded yet (new filter, failed key) gets fetched
        if needs_fetch || !matches!(session.state(), ViewState::Loaded(_)) {
            ctx.refresh(&mut session).await;
        }
        print!("{}", render_view(session.filter(), session.state(), session.page()));
    }

    info!("Browse session ended: {}", session.cache().stats().await);
    Ok(())
}

/// Handle authentication commands
pub async fn handle_auth(ctx: &CommandContext, args: AuthArgs) -> Result<()> {
    match args.action {
        AuthAction::Setup { token } => {
            let token = match token {
                Some(token) => ApiToken::new(token)?,
                None => prompt_token()?,
            };
            ctx.store.save(&token)?;
            println!("✅ API key {} saved to {}", token.preview(), ctx.store.path().display());
        }
        AuthAction::Status => {
            let status = AuthStatus {
                stored: ctx.store.load()?.is_present(),
                override_set: ctx.api_key.is_some(),
                path: ctx.store.path().to_path_buf(),
            };
            println!("{}", status.status_message());
            if !status.has_credentials() {
                return Err(AppError::generic("No API key available"));
            }
        }
        AuthAction::Clear => {
            if ctx.store.clear()? {
                println!("🗑️  Removed stored API key from {}", ctx.store.path().display());
            } else {
                println!("No stored API key to remove");
            }
            if ctx.api_key.is_some() {
                println!("💡 A key is still supplied via --api-key / NEWS_API_KEY");
            }
        }
    }

    Ok(())
}
