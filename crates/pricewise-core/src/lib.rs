pub mod app_config;
pub mod config;
pub mod price;
pub mod products;
pub mod shaping;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, load_app_config_with_api_url};
pub use price::parse_price;
pub use products::{Product, Source};
pub use shaping::{
    best_deal, category_facets, shape, source_facets, CategoryFilter, FilterState, ShapedView,
    SortKey, SourceFilter,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised when parsing user-supplied filter values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown sort key \"{0}\" (expected price-asc or price-desc)")]
    UnknownSortKey(String),

    #[error("filter value must not be empty")]
    Empty,
}
