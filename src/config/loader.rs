use crate::config::Config;
use crate::utils::debug_with_context;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Load configuration with priority: CLI args > Env vars > Config files > Defaults
pub async fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let mut config = if let Some(path) = config_path {
        load_config_file(&path).await?
    } else {
        load_config_from_default_locations().await
    };

    apply_env_overrides(&mut config);

    Ok(config)
}

/// First readable file on the search path wins; broken files are skipped with a warning.
async fn load_config_from_default_locations() -> Config {
    for path in get_config_search_paths() {
        if !path.exists() {
            continue;
        }
        match load_config_file(&path).await {
            Ok(config) => {
                debug_with_context("config", &format!("Loaded {}", path.display()));
                return config;
            }
            Err(e) => {
                log::warn!("Failed to load config from {}: {:#}", path.display(), e);
            }
        }
    }

    Config::default()
}

fn get_config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(".promptline.json")];

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("promptline").join("config.json"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config").join("promptline").join("config.json"));
    }

    paths.dedup();
    paths
}

pub async fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Apply environment variable overrides to configuration
pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(theme) = env::var("PROMPTLINE_THEME") {
        config.theme = theme;
    }

    if let Ok(timeout) = env::var("PROMPTLINE_TIMEOUT_MS") {
        match timeout.trim().parse::<u64>() {
            Ok(ms) => config.timeout_ms = ms,
            Err(_) => log::warn!("Ignoring invalid PROMPTLINE_TIMEOUT_MS={}", timeout),
        }
    }

    if let Ok(disabled) = env::var("PROMPTLINE_DISABLE") {
        disable_features(config, &disabled);
    }
}

/// Force every name in a comma-separated list off.
pub fn disable_features(config: &mut Config, list: &str) {
    for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        config.toggles.insert(name.to_string(), false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disable_features_ignores_blanks() {
        let mut config = Config::default();
        disable_features(&mut config, "git, ,docker,");

        let registry = config.toggle_registry();
        assert!(!registry.get("git"));
        assert!(!registry.get("docker"));
        assert!(registry.get("venv"));
        assert_eq!(config.toggles.len(), 2);
    }
}
