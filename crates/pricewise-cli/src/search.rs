//! One-shot `search` and `health` command handlers.

use pricewise_client::{SearchClient, SearchController, SearchOutcome, SearchState};
use pricewise_core::FilterState;

use crate::render::render_state;

/// Run a single search, apply `filter`, and print the result.
///
/// With `json` set, the shaped list is printed as a JSON document instead of
/// the text table.
///
/// # Errors
///
/// Returns an error for a blank query, a backend-reported failure, or an
/// unreachable backend. An empty result set is not an error.
pub(crate) async fn run_search(
    controller: &SearchController,
    query: &str,
    filter: FilterState,
    json: bool,
) -> anyhow::Result<()> {
    controller.set_source(filter.source).await;
    controller.set_category(filter.category).await;
    controller.set_sort(filter.sort).await;

    let outcome = controller.submit(query).await;
    let state = controller.snapshot().await;

    match outcome {
        SearchOutcome::Rejected | SearchOutcome::Failed { .. } => {
            let message = state.error.as_deref().unwrap_or("search failed");
            anyhow::bail!("{message}");
        }
        SearchOutcome::Loaded { .. } | SearchOutcome::NoResults | SearchOutcome::Superseded => {}
    }

    if json {
        println!("{}", render_json(&state)?);
    } else {
        print!("{}", render_state(&state));
    }
    Ok(())
}

/// Check the backend's health route and print its status.
///
/// # Errors
///
/// Returns an error if the backend is unreachable or reports itself unhealthy.
pub(crate) async fn run_health(client: &SearchClient) -> anyhow::Result<()> {
    let health = client.health().await.map_err(|e| {
        anyhow::anyhow!(
            "backend at {} is not reachable: {e}",
            client.base_url()
        )
    })?;

    let message = health.message.as_deref().unwrap_or("");
    if !health.is_healthy() {
        anyhow::bail!("backend at {} reports {}: {message}", client.base_url(), health.status);
    }
    println!("{}: {} {message}", client.base_url(), health.status);
    Ok(())
}

pub(crate) fn render_json(state: &SearchState) -> anyhow::Result<String> {
    let view = state.view();
    let doc = serde_json::json!({
        "query": state.query,
        "total": view.total,
        "showing": view.products.len(),
        "best_deal": view.best_deal(),
        "products": view.products,
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}
