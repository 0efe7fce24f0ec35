pub mod client;
pub mod controller;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::SearchClient;
pub use controller::{SearchController, SearchOutcome, SearchState};
pub use error::SearchError;
pub use normalize::normalize_products;
pub use types::{HealthStatus, SearchRequest, SearchResponse, WireProduct};
