//! Wire types for the price-comparison backend.
//!
//! ## Observed response shape
//!
//! ### Envelope
//! `POST /api/search` answers `{"success": true, "query": ..., "total_products": N,
//! "products": [...]}` on success and `{"success": false, "error": "...",
//! "products": []}` on a 500. A blank query gets a 400 with **no** `success`
//! field at all, so `success` defaults to `false`.
//!
//! ### Product link
//! The scraper emits the listing URL under `url`; newer payloads use `link`,
//! and some carry both. They are read as separate fields and `link` wins.
//!
//! ### Products array
//! Kept as raw [`serde_json::Value`]s so one malformed entry cannot fail the
//! whole envelope. Each entry is decoded into [`WireProduct`] in
//! [`crate::normalize`], where failures are logged and skipped.
//!
//! ### `price_num`
//! An integer number of rupees, or `null` when the scraper could not parse the
//! display price. Modelled as `Option<f64>`.
//!
//! ### `rating` and `image`
//! Free text straight from the retailer page: `"4.3"`, `"4.3 out of 5 stars"`,
//! or the literal `"N/A"`. Some payloads send a bare number. Kept as a raw
//! [`serde_json::Value`] and interpreted in [`crate::normalize`].

use serde::{Deserialize, Serialize};

/// Body of `POST /api/search`.
#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
}

/// Top-level response from `POST /api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub products: Vec<serde_json::Value>,

    /// Human-readable failure reason, present when `success` is `false`.
    #[serde(default)]
    pub error: Option<String>,
}

/// A single product as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct WireProduct {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub price_num: Option<f64>,

    #[serde(default)]
    pub original_price: Option<String>,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub rating: Option<serde_json::Value>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

/// Response from `GET /api/health`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,

    #[serde(default)]
    pub message: Option<String>,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
