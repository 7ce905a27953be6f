mod types;

pub use types::*;

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use std::path::Path;

/// Environment variable overriding `backend.base_url`
pub const BASE_URL_ENV: &str = "REELVIEW_BASE_URL";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = ["./reelview.toml", "~/.config/reelview/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.trim().is_empty() {
            tracing::debug!("Backend URL overridden by {}", BASE_URL_ENV);
            config.backend.base_url = url.trim().to_string();
        }
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let url = config.backend.base_url.trim();
    if url.is_empty() {
        anyhow::bail!("Backend base_url cannot be empty");
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("Backend base_url must start with http:// or https://: {}", url);
    }

    if config.backend.timeout_secs == 0 {
        anyhow::bail!("Backend timeout_secs cannot be 0");
    }

    let date_format = config.display.date_format.as_str();
    if date_format.trim().is_empty() {
        anyhow::bail!("Display date_format cannot be empty");
    }
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        anyhow::bail!("Display date_format is not a valid strftime pattern: {}", date_format);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.backend.base_url, "http://localhost:5000/api");
        assert_eq!(config.backend.timeout().as_secs(), 10);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            base_url = "https://movies.example.com/api"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "https://movies.example.com/api");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.display.date_format, "%d/%m/%Y");
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut config = Config::default();
        config.backend.base_url = "ftp://movies".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_date_format() {
        let mut config = Config::default();
        config.display.date_format = "%Q".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.backend.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }
}
