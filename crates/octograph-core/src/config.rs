use crate::app_config::AppConfig;
use crate::duration::{parse_cache_duration, DEFAULT_CACHE_DURATION};
use crate::ConfigError;

/// Default GitHub GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com/graphql";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load application configuration with `overrides` taking precedence over
/// variables already in the process. Does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_with_overrides(
    overrides: &[(&str, &str)],
) -> Result<AppConfig, ConfigError> {
    build_app_config(with_overrides(overrides, |key| std::env::var(key)))
}

fn with_overrides<'a, F>(
    overrides: &'a [(&'a str, &'a str)],
    lookup: F,
) -> impl Fn(&str) -> Result<String, std::env::VarError> + 'a
where
    F: Fn(&str) -> Result<String, std::env::VarError> + 'a,
{
    move |key| match overrides.iter().find(|(var, _)| *var == key) {
        Some((_, value)) => Ok((*value).to_string()),
        None => lookup(key),
    }
}

/// Build application configuration using the provided env-var lookup function.
///
/// The token is optional here: offline commands never need it, and the
/// network client reports its absence before any request is made.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let github_token = lookup("GITHUB_TOKEN")
        .or_else(|_| lookup("OCTOGRAPH_GITHUB_TOKEN"))
        .ok()
        .filter(|t| !t.trim().is_empty());

    let api_url = or_default("OCTOGRAPH_API_URL", DEFAULT_API_URL);
    let log_level = or_default("OCTOGRAPH_LOG_LEVEL", "info");
    let user_agent = or_default("OCTOGRAPH_USER_AGENT", "octograph/0.1");

    let request_timeout_secs = parse_u64("OCTOGRAPH_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "OCTOGRAPH_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }
    let max_retries = parse_u32("OCTOGRAPH_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("OCTOGRAPH_RETRY_BACKOFF_BASE_MS", "1000")?;

    let cache_duration_raw = or_default("OCTOGRAPH_CACHE_DURATION", DEFAULT_CACHE_DURATION);
    let cache_duration =
        parse_cache_duration(&cache_duration_raw).map_err(|e| ConfigError::InvalidEnvVar {
            var: "OCTOGRAPH_CACHE_DURATION".to_string(),
            reason: e.to_string(),
        })?;

    Ok(AppConfig {
        github_token,
        api_url,
        log_level,
        user_agent,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        cache_duration,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
