//! Search controller: owns the current query, result set, loading flag,
//! user-visible error and filter state, and drives [`SearchClient`].
//!
//! Overlapping searches are allowed. Every dispatched request takes the next
//! sequence number, and a response is only applied if no later request has
//! been dispatched since; older responses are dropped as superseded.

use pricewise_core::{CategoryFilter, FilterState, Product, ShapedView, SortKey, SourceFilter};
use tokio::sync::Mutex;

use crate::client::SearchClient;
use crate::normalize::normalize_products;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query";
pub const NO_RESULTS_MESSAGE: &str = "No products found. Try a different search term.";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch products";

/// What a single call to [`SearchController::submit`] ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query; no request was sent.
    Rejected,
    /// Results were stored.
    Loaded { count: usize },
    /// The backend succeeded with zero products.
    NoResults,
    /// The backend reported failure or could not be reached.
    Failed { message: String },
    /// A newer search was dispatched before this one resolved; its response
    /// was discarded.
    Superseded,
}

/// Snapshot of the controller's state.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub filter: FilterState,
}

impl SearchState {
    /// The current result set shaped by the current filter.
    #[must_use]
    pub fn view(&self) -> ShapedView<'_> {
        ShapedView::new(&self.products, &self.filter)
    }

    /// The product to headline, if any. Suppressed while loading or while an
    /// error is shown.
    #[must_use]
    pub fn headline_deal(&self) -> Option<&Product> {
        if self.loading || self.error.is_some() {
            return None;
        }
        self.view().best_deal()
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: SearchState,
    /// Sequence number of the most recently dispatched request.
    latest_seq: u64,
}

/// Drives searches against the backend and holds the resulting UI state.
#[derive(Debug)]
pub struct SearchController {
    client: SearchClient,
    inner: Mutex<Inner>,
}

impl SearchController {
    #[must_use]
    pub fn new(client: SearchClient) -> Self {
        Self {
            client,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Runs one search for `query`.
    ///
    /// A blank query sets the validation message and returns
    /// [`SearchOutcome::Rejected`] without touching the network. Otherwise the
    /// result set is cleared, the request is sent, and the response is applied
    /// unless a later search was dispatched in the meantime. Failures are
    /// never retried.
    pub async fn submit(&self, query: &str) -> SearchOutcome {
        let seq = {
            let mut inner = self.inner.lock().await;
            inner.state.query = query.to_string();
            if query.trim().is_empty() {
                inner.state.error = Some(EMPTY_QUERY_MESSAGE.to_string());
                return SearchOutcome::Rejected;
            }

            inner.latest_seq += 1;
            inner.state.loading = true;
            inner.state.error = None;
            inner.state.products.clear();
            inner.latest_seq
        };

        tracing::info!(query, seq, "dispatching search");
        let result = self.client.search(query).await;

        let mut inner = self.inner.lock().await;
        if seq != inner.latest_seq {
            tracing::debug!(
                query,
                seq,
                latest_seq = inner.latest_seq,
                "discarding superseded search response"
            );
            return SearchOutcome::Superseded;
        }

        let state = &mut inner.state;
        state.loading = false;

        match result {
            Ok(response) if response.success => {
                state.products = normalize_products(response.products);
                if state.products.is_empty() {
                    state.error = Some(NO_RESULTS_MESSAGE.to_string());
                    SearchOutcome::NoResults
                } else {
                    let count = state.products.len();
                    tracing::info!(query, count, "search complete");
                    SearchOutcome::Loaded { count }
                }
            }
            Ok(response) => {
                let message = response
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| FETCH_FAILED_MESSAGE.to_string());
                tracing::warn!(query, error = %message, "backend reported search failure");
                state.error = Some(message.clone());
                SearchOutcome::Failed { message }
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "search request failed");
                let message = format!(
                    "Failed to connect to server. Make sure the backend is running on {}",
                    self.client.base_url()
                );
                state.error = Some(message.clone());
                SearchOutcome::Failed { message }
            }
        }
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> SearchState {
        self.inner.lock().await.state.clone()
    }

    pub async fn set_source(&self, source: SourceFilter) {
        self.inner.lock().await.state.filter.source = source;
    }

    pub async fn set_category(&self, category: CategoryFilter) {
        self.inner.lock().await.state.filter.category = category;
    }

    pub async fn set_sort(&self, sort: SortKey) {
        self.inner.lock().await.state.filter.sort = sort;
    }
}
