use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

use crate::layout::LayoutMode;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub http_server: HttpServerConfig,
}

/// Where the executive order table is fetched from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Candidate locations, tried in order until one yields a non-empty body.
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,
    /// When set, relative locations are resolved against this URL and fetched over HTTP.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            locations: default_locations(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_locations() -> Vec<String> {
    vec![
        "/presidential_documents.csv".to_string(),
        "./presidential_documents.csv".to_string(),
        "presidential_documents.csv".to_string(),
    ]
}

fn default_timeout_secs() -> u64 {
    30
}

/// Metrics configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { top_k: default_top_k() }
    }
}

fn default_top_k() -> usize {
    5
}

/// Layout seeding configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub mode: LayoutMode,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_http_port")]
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            port: default_http_port(),
            allowed_origins: Vec::new(),
        }
    }
}

fn default_http_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in EOGRAPH_CONFIG environment variable (must exist)
    /// 2. ./config.toml in current directory
    /// 3. Built-in defaults when neither is present
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();

        let config = match std::env::var("EOGRAPH_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => {
                let path = PathBuf::from("config.toml");
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    log::debug!("No config.toml found, using defaults");
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse configuration from a TOML string without validating it.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.source.locations.is_empty() {
            anyhow::bail!("source.locations must list at least one location");
        }

        if self.source.timeout_secs == 0 {
            anyhow::bail!("source.timeout_secs must be greater than 0");
        }

        if let Some(base) = &self.source.base_url {
            let url = Url::parse(base)
                .with_context(|| format!("source.base_url is not a valid URL: {}", base))?;
            if !matches!(url.scheme(), "http" | "https") {
                anyhow::bail!("source.base_url must use http or https, got {}", url.scheme());
            }
        }

        if self.analysis.top_k == 0 {
            anyhow::bail!("analysis.top_k must be greater than 0");
        }

        Ok(())
    }
}
