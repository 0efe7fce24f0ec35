//! Plain-text rendering of search state for the terminal.
//!
//! Every function returns a `String` so output can be asserted on in tests;
//! callers decide where to print it.

use std::fmt::Write as _;

use pricewise_client::SearchState;
use pricewise_core::{category_facets, source_facets, Product};

const TITLE_WIDTH: usize = 60;

pub(crate) const START_HINT: &str = "Enter a product name to compare prices across Flipkart, \
Amazon, Vijay Sales, and JioMart.\nPopular searches: iPhone 15, Samsung TV, Sony Headphones, \
MacBook Air, PlayStation 5";

/// Renders the whole screen for `state`: error or empty-state hint, best-deal
/// banner, filter facets, summary line, and the product table.
pub(crate) fn render_state(state: &SearchState) -> String {
    let mut out = String::new();

    if let Some(error) = &state.error {
        let _ = writeln!(out, "! {error}");
    }

    if state.loading {
        out.push_str("Searching across platforms...\n");
        return out;
    }

    if state.products.is_empty() {
        if state.error.is_none() {
            out.push_str(START_HINT);
            out.push('\n');
        }
        return out;
    }

    if let Some(deal) = state.headline_deal() {
        out.push_str(&render_best_deal(deal));
        out.push('\n');
    }

    out.push_str(&render_facets(state));

    let view = state.view();
    let _ = writeln!(
        out,
        "Sort: {}  |  {}",
        state.filter.sort,
        view.summary()
    );
    out.push('\n');

    for (idx, product) in view.products.iter().enumerate() {
        out.push_str(&render_row(idx + 1, product));
    }

    out
}

pub(crate) fn render_best_deal(product: &Product) -> String {
    format!(
        "Best deal found!\n  {}\n  {}  {} {}\n  {}\n",
        product.title,
        product.price,
        product.source.icon(),
        product.source,
        product.link
    )
}

/// Source counts and the category list, as offered by the filter controls.
pub(crate) fn render_facets(state: &SearchState) -> String {
    let mut sources = vec![format!("All Sources ({})", state.products.len())];
    sources.extend(
        source_facets(&state.products)
            .into_iter()
            .map(|(source, count)| format!("{} {source} ({count})", source.icon())),
    );

    let mut categories = vec!["All Categories".to_string()];
    categories.extend(category_facets(&state.products));

    format!(
        "Sources: {}\nCategories: {}\n",
        sources.join(" | "),
        categories.join(" | ")
    )
}

pub(crate) fn render_row(position: usize, product: &Product) -> String {
    let mut line = format!(
        "{position:>3}. {} {:<12} {:>12}",
        product.source.icon(),
        product.source.name(),
        product.price
    );

    if product.has_discount() {
        if let Some(original) = &product.original_price {
            let _ = write!(line, " (was {original})");
        }
    }
    if let Some(rating) = product.rating {
        let _ = write!(line, "  \u{2605}{rating}");
    }

    let _ = write!(line, "  {}", truncate(&product.title, TITLE_WIDTH));

    let mut out = format!("{line}\n");
    if let Some(category) = &product.category {
        let _ = writeln!(out, "     Category: {category}");
    }
    let _ = writeln!(out, "     {}", product.link);
    out
}

fn truncate(title: &str, width: usize) -> String {
    if title.chars().count() > width {
        format!("{}...", title.chars().take(width).collect::<String>())
    } else {
        title.to_string()
    }
}
