use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const FINNHUB_BASE_URL_VAR: &str = "FINNHUB_API_BASE_URL";
pub const FINNHUB_TOKEN_VAR: &str = "FINNHUB_API_TOKEN";
pub const IEX_BASE_URL_VAR: &str = "IEX_API_BASE_URL";
pub const IEX_TOKEN_VAR: &str = "IEX_API_TOKEN";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ProvidersConfig {
    /// Search and company profile source.
    pub finnhub: ProviderConfig,
    /// Latest quote and price history source.
    pub iex: ProviderConfig,
    /// Per-request timeout applied by the provider clients.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            finnhub: ProviderConfig {
                base_url: "https://finnhub.io/api/v1".to_string(),
                token: String::new(),
            },
            iex: ProviderConfig {
                base_url: "https://cloud.iexapis.com/stable".to_string(),
                token: String::new(),
            },
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Loads the config file at the default location, falling back to
    /// built-in defaults when no file exists.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "stocks", "stocks")
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

    /// Applies provider base URL and token overrides from the process
    /// environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let providers = &mut self.providers;

        if let Some(url) = lookup(FINNHUB_BASE_URL_VAR) {
            debug!("Overriding finnhub base url from {}", FINNHUB_BASE_URL_VAR);
            providers.finnhub.base_url = url;
        }
        if let Some(token) = lookup(FINNHUB_TOKEN_VAR) {
            providers.finnhub.token = token;
        }
        if let Some(url) = lookup(IEX_BASE_URL_VAR) {
            debug!("Overriding iex base url from {}", IEX_BASE_URL_VAR);
            providers.iex.base_url = url;
        }
        if let Some(token) = lookup(IEX_TOKEN_VAR) {
            providers.iex.token = token;
        }
        self
    }
}
