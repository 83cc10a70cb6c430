//! Plain-text rendering of result pages and session state

use std::fmt::Write;

use crate::app::models::{Article, FilterState};
use crate::app::paginate::PageView;
use crate::app::session::ViewState;
use crate::constants::CATEGORIES;
use crate::errors::PipelineError;

/// Shown for every failure that is not local and not the 426 restriction
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load news. Please try again later.";

/// Longest description shown on a card, in characters
const DESCRIPTION_LIMIT: usize = 240;

/// User-facing notice for a failed pipeline run
pub fn error_notice(error: &PipelineError) -> String {
    if error.is_local() || error.is_unavailable() {
        error.to_string()
    } else {
        LOAD_FAILED_MESSAGE.to_string()
    }
}

/// One line describing what is being searched
pub fn filter_summary(filter: &FilterState) -> String {
    format!("{} since {}", filter.search_by(), filter.from_date())
}

/// Render the whole view for a session state
pub fn render_view(
    filter: &FilterState,
    state: &ViewState,
    page: Option<PageView<'_, Article>>,
) -> String {
    match (state, page) {
        (ViewState::Idle, _) => format!("{}\n(no results requested yet)\n", filter_summary(filter)),
        (ViewState::Fetching, _) => format!("{}\nLoading...\n", filter_summary(filter)),
        (ViewState::Failed(error), _) => format!("{}\n{}\n", filter_summary(filter), error_notice(error)),
        (ViewState::Loaded(_), Some(page)) => render_page(filter, &page),
        (ViewState::Loaded(_), None) => String::new(),
    }
}

/// Render a page of article cards with a header and a pager line
pub fn render_page(filter: &FilterState, page: &PageView<'_, Article>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", filter_summary(filter));

    if page.total_pages == 0 {
        let _ = writeln!(out, "No articles found.");
        return out;
    }
    if page.items.is_empty() {
        let _ = writeln!(
            out,
            "Page {} is out of range ({} pages).",
            page.page_number, page.total_pages
        );
        return out;
    }

    let _ = writeln!(out);
    let first = page.first_position();
    for (offset, article) in page.items.iter().enumerate() {
        out.push_str(&render_card(first + offset, article));
        let _ = writeln!(out);
    }

    let _ = write!(out, "Page {} of {}", page.page_number, page.total_pages);
    match (page.has_previous(), page.has_next()) {
        (true, true) => out.push_str("  [prev | next]"),
        (true, false) => out.push_str("  [prev]"),
        (false, true) => out.push_str("  [next]"),
        (false, false) => {}
    }
    out.push('\n');
    out
}

/// Render one article card
pub fn render_card(position: usize, article: &Article) -> String {
    let mut out = String::new();
    let title = if article.title.is_empty() {
        "(untitled)"
    } else {
        article.title.as_str()
    };
    let _ = writeln!(out, "{:>3}. {}", position, title);

    let mut byline = vec![];
    if !article.source_name.is_empty() {
        byline.push(article.source_name.clone());
    }
    if let Some(author) = article.author.as_deref().filter(|a| !a.trim().is_empty()) {
        byline.push(author.to_string());
    }
    byline.push(article.published_date());
    let _ = writeln!(out, "     {}", byline.join(" | "));

    if let Some(description) = article.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "     {}", truncate(description.trim(), DESCRIPTION_LIMIT));
    }
    if !article.url.is_empty() {
        let _ = writeln!(out, "     {}", article.url);
    }
    if let Some(image) = &article.image_url {
        let _ = writeln!(out, "     image: {}", image);
    }
    out
}

/// The preset category list, marking `selected`
pub fn render_categories(selected: &str) -> String {
    let mut out = String::new();
    for category in CATEGORIES {
        let marker = if category == selected { '*' } else { ' ' };
        let _ = writeln!(out, " {} {}", marker, category);
    }
    out
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut.trim_end())
}
