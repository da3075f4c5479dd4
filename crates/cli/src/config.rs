// Path: crates/cli/src/config.rs

use anyhow::{Context, Result};
use scavenger_types::config::ScavengerConfig;
use std::path::Path;

/// Environment variable that overrides `api_base`.
pub const API_BASE_ENV: &str = "SCAVENGER_API_BASE";

/// Loads the configuration from `path`, or the defaults when no file is
/// given, then applies environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<ScavengerConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        }
        None => ScavengerConfig::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies overrides read through `lookup`.
pub fn apply_env_overrides(config: &mut ScavengerConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(base) = lookup(API_BASE_ENV).filter(|b| !b.trim().is_empty()) {
        tracing::debug!(api_base = %base, "API base overridden from environment");
        config.api_base = base.trim().trim_end_matches('/').to_string();
    }
}
