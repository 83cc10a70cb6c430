//! Command-line interface components
//!
//! This module contains CLI-specific code for the News Explorer application,
//! including argument parsing, command handlers and text rendering.

pub mod args;
pub mod commands;
pub mod render;

pub use args::{
    AuthAction, AuthArgs, BrowseArgs, CategoryArgs, Cli, Commands, GlobalArgs, ResultArgs,
    SearchArgs,
};
pub use commands::{
    handle_auth, handle_browse, handle_categories, handle_category, handle_search, BrowseCommand,
    CommandContext,
};
pub use render::{error_notice, render_page, render_view, LOAD_FAILED_MESSAGE};
