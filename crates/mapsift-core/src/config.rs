use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed. No variable is
/// strictly required: every setting has a default and the API key is
/// optional.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let pagespeed_api_key = lookup("PAGESPEED_API_KEY").ok();
    let pagespeed_max_retries = parse_u32("PAGESPEED_MAX_RETRIES", "3")?;
    let pagespeed_retry_delay_ms = parse_u64("PAGESPEED_RETRY_DELAY_MS", "2000")?;
    let pagespeed_request_timeout_secs = parse_u64("PAGESPEED_REQUEST_TIMEOUT_SECS", "30")?;
    let enrich_max_concurrent = parse_usize("ENRICH_MAX_CONCURRENT", "4")?;
    let http_user_agent = or_default("HTTP_USER_AGENT", "mapsift/0.1 (listing-enrichment)");
    let log_level = or_default("MAPSIFT_LOG_LEVEL", "info");

    Ok(AppConfig {
        pagespeed_api_key,
        pagespeed_max_retries,
        pagespeed_retry_delay_ms,
        pagespeed_request_timeout_secs,
        enrich_max_concurrent,
        http_user_agent,
        log_level,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn empty_env_uses_every_default() {
        let map: HashMap<&str, &str> = HashMap::new();
        let config = build_app_config(lookup_from_map(&map)).expect("defaults should parse");
        assert!(config.pagespeed_api_key.is_none());
        assert_eq!(config.pagespeed_max_retries, 3);
        assert_eq!(config.pagespeed_retry_delay_ms, 2000);
        assert_eq!(config.pagespeed_request_timeout_secs, 30);
        assert_eq!(config.enrich_max_concurrent, 4);
        assert_eq!(config.http_user_agent, "mapsift/0.1 (listing-enrichment)");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn api_key_is_picked_up_when_set() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("PAGESPEED_API_KEY", "test-key");
        let config = build_app_config(lookup_from_map(&map)).expect("config should parse");
        assert_eq!(config.pagespeed_api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn overridden_numeric_values_parse() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("PAGESPEED_MAX_RETRIES", "5");
        map.insert("PAGESPEED_RETRY_DELAY_MS", "100");
        map.insert("ENRICH_MAX_CONCURRENT", "16");
        let config = build_app_config(lookup_from_map(&map)).expect("config should parse");
        assert_eq!(config.pagespeed_max_retries, 5);
        assert_eq!(config.pagespeed_retry_delay_ms, 100);
        assert_eq!(config.enrich_max_concurrent, 16);
    }

    #[test]
    fn unparseable_numeric_reports_invalid_env_var() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("PAGESPEED_MAX_RETRIES", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PAGESPEED_MAX_RETRIES"),
            "expected InvalidEnvVar(PAGESPEED_MAX_RETRIES), got: {result:?}"
        );
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("PAGESPEED_API_KEY", "super-secret");
        let config = build_app_config(lookup_from_map(&map)).expect("config should parse");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"), "key leaked: {debug}");
        assert!(debug.contains("[redacted]"));
    }
}
