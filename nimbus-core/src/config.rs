use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, num::NonZeroU32, path::PathBuf, time::Duration};

use crate::{
    WeatherError,
    provider::{DEFAULT_BASE_URL, DEFAULT_SEARCH_LANG, RequestConfig},
    resolver::ResolverPolicy,
};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "NIMBUS_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_place = "Kharkiv, Ukraine"
///
/// [resolver]
/// fallback = "Macau"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Response language forced on place search.
    pub search_lang: String,
    /// Place used when a command is given none.
    pub default_place: String,
    pub forecast_days: NonZeroU32,
    pub timeout_secs: u64,
    pub resolver: ResolverPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            search_lang: DEFAULT_SEARCH_LANG.to_string(),
            default_place: "Kharkiv, Ukraine".to_string(),
            forecast_days: NonZeroU32::new(7).unwrap_or(NonZeroU32::MIN),
            timeout_secs: 10,
            resolver: ResolverPolicy::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    /// The API key from the environment wins over the file.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Overlay environment values, looked up through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "nimbus", "nimbus")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Request settings for the provider. Fails when no API key is available.
    pub fn request_config(&self) -> Result<RequestConfig, WeatherError> {
        let api_key = self.api_key.as_deref().filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            WeatherError::Config(format!(
                "No API key configured.\n\
                 Hint: run `nimbus configure` or set {API_KEY_ENV}."
            ))
        })?;

        Ok(RequestConfig::new(api_key)
            .with_base_url(self.base_url.clone())
            .with_search_lang(self.search_lang.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}
