use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use tracing::debug;

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "FXC_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.freecurrencyapi.com/v1/latest";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl AppConfig {
    /// Loads the config from the default path. A missing file is fine as
    /// long as the API key arrives via the environment.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(AppConfig::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fxc")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// The API key to use: the `FXC_API_KEY` environment variable wins,
    /// then the config file entry.
    pub fn resolve_api_key(&self) -> Result<String> {
        api_key_from(env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }
}

fn api_key_from(env_key: Option<String>, config_key: Option<&str>) -> Result<String> {
    env_key
        .filter(|k| !k.trim().is_empty())
        .or_else(|| {
            config_key
                .map(str::to_string)
                .filter(|k| !k.trim().is_empty())
        })
        .with_context(|| {
            format!("No API key configured. Set {API_KEY_ENV} or add api_key to the config file.")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
api_key: "secret"
provider:
  base_url: "http://example.com/v1/latest"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.api_key, Some("secret".to_string()));
        assert_eq!(config.provider.base_url, "http://example.com/v1/latest");
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);

        // Key only, provider defaulted
        let config: AppConfig = serde_yaml::from_str(r#"api_key: "k""#).unwrap();
        assert_eq!(config.api_key, Some("k".to_string()));
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_from_path() {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        fs::write(config_file.path(), "api_key: \"from-file\"\n").unwrap();

        let config = AppConfig::load_from_path(config_file.path()).unwrap();
        assert_eq!(config.api_key, Some("from-file".to_string()));

        assert!(AppConfig::load_from_path("/nonexistent/config.yaml").is_err());
    }

    #[test]
    fn test_api_key_resolution_order() {
        // Environment wins over config
        let key = api_key_from(Some("env-key".to_string()), Some("cfg-key")).unwrap();
        assert_eq!(key, "env-key");

        // Config used when environment is absent or blank
        let key = api_key_from(None, Some("cfg-key")).unwrap();
        assert_eq!(key, "cfg-key");
        let key = api_key_from(Some("  ".to_string()), Some("cfg-key")).unwrap();
        assert_eq!(key, "cfg-key");

        // Neither set is an error mentioning the variable name
        let err = api_key_from(None, None).unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
        assert!(api_key_from(None, Some("")).is_err());
    }
}
