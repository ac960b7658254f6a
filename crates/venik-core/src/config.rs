use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
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
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_i32 = |var: &str, default: &str| -> Result<i32, ConfigError> {
        or_default(var, default)
            .parse::<i32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("VENIK_LOG_LEVEL", "info");
    let archive_dir = PathBuf::from(or_default("VENIK_ARCHIVE_DIR", "./archive"));

    let vendor_prefix = or_default("VENIK_VENDOR_PREFIX", "Jumbo/");
    if vendor_prefix.trim().is_empty() {
        return Err(invalid("VENIK_VENDOR_PREFIX", "must not be empty".to_string()));
    }

    let store_id = parse_i32("VENIK_STORE_ID", "1")?;
    let sku_fallback_prefix = lookup("VENIK_SKU_FALLBACK_PREFIX")
        .ok()
        .filter(|p| !p.is_empty());
    let origin_max_chars = parse_usize("VENIK_ORIGIN_MAX_CHARS", "30")?;
    // At least one document in flight.
    let max_concurrent_documents = parse_usize("VENIK_MAX_CONCURRENT_DOCUMENTS", "4")?.max(1);

    Ok(AppConfig {
        log_level,
        archive_dir,
        vendor_prefix,
        store_id,
        sku_fallback_prefix,
        origin_max_chars,
        max_concurrent_documents,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
