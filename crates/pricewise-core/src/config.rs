use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_USER_AGENT: &str = "pricewise/0.1 (price-comparison)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    load_app_config_with_api_url(None)
}

/// Like [`load_app_config`], but `api_url` (when given) replaces
/// `PRICEWISE_API_URL` before anything is validated, so a bad value in the
/// environment cannot block an explicit override.
///
/// # Errors
///
/// Returns `ConfigError` if a variable or the override is invalid.
pub fn load_app_config_with_api_url(api_url: Option<&str>) -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(with_api_url_override(|key| std::env::var(key), api_url))
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a config
/// pointed at the local backend.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("PRICEWISE_ENV", "development"))?;

    let api_url = parse_api_url(&or_default("PRICEWISE_API_URL", DEFAULT_API_URL))?;
    let log_level = or_default("PRICEWISE_LOG_LEVEL", "warn");

    let request_timeout_secs = match lookup("PRICEWISE_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => Some(parse_timeout(&raw)?),
        Err(_) => None,
    };

    let user_agent = or_default("PRICEWISE_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        env,
        api_url,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}

fn with_api_url_override<'a, F>(
    lookup: F,
    api_url: Option<&'a str>,
) -> impl Fn(&str) -> Result<String, std::env::VarError> + 'a
where
    F: Fn(&str) -> Result<String, std::env::VarError> + 'a,
{
    move |key: &str| match api_url {
        Some(url) if key == "PRICEWISE_API_URL" => Ok(url.to_string()),
        _ => lookup(key),
    }
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRICEWISE_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

/// Accepts `http://` and `https://` URLs and strips trailing slashes.
fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());

    if !has_host {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICEWISE_API_URL".to_string(),
            reason: format!("\"{raw}\" is not an http(s) URL"),
        });
    }

    Ok(trimmed.to_string())
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "PRICEWISE_REQUEST_TIMEOUT_SECS".to_string(),
        reason,
    };

    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| invalid(e.to_string()))?;
    if secs == 0 {
        return Err(invalid("timeout must be at least 1 second".to_string()));
    }
    Ok(secs)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
