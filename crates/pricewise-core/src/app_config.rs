#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime configuration for the search client and CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Base URL of the price-comparison backend, without a trailing slash.
    pub api_url: String,
    pub log_level: String,
    /// Whole-request timeout. `None` leaves the HTTP stack's default (no timeout).
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}
