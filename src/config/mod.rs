mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable holding the TMDB API key.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";
/// Environment variable overriding the TMDB base URL.
pub const BASE_URL_ENV: &str = "TMDB_BASE_URL";

/// Load configuration from a TOML file, then apply environment overrides
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./cinescout.toml",
        "~/.config/cinescout/config.toml",
        "/etc/cinescout/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // No file found: defaults plus whatever the environment provides
    let mut config = Config::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config)?;
    Ok(config)
}

/// Overlay environment settings on top of file values.
///
/// `lookup` is `std::env::var` in production; tests pass a closure over a map.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(API_KEY_ENV) {
        config.tmdb.api_key = Some(key);
    }
    if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.is_empty()) {
        config.tmdb.base_url = url;
    }
}

/// Validate configuration
///
/// A missing API key is not an error here: requests fail individually instead.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.server.allowed_origins.iter().any(|o| o.trim() == "*") {
        anyhow::bail!("Wildcard origin is not allowed with credentialed CORS");
    }

    if config.tmdb.timeout_secs == 0 {
        anyhow::bail!("TMDB timeout must be at least 1 second");
    }

    let base = &config.tmdb.base_url;
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        anyhow::bail!("TMDB base URL must be http(s): {}", base);
    }

    Ok(())
}
