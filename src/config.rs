use std::env;
use std::fs;

use anyhow::{Context, Result, bail};
use camino::Utf8Path;
use serde::Deserialize;

/// Application configuration, loaded from a TOML file with environment
/// overrides. A `.env` file in the working directory is honored.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub remote: RemoteConfig,
}

/// Connection parameters for the remote table and object storage.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Service base URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// API key sent as `apikey` and bearer token.
    pub api_key: String,
    /// Land plots table name.
    #[serde(default = "default_table")]
    pub table: String,
    /// Storage bucket for uploaded scheme images.
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

fn default_table() -> String {
    "land_plots".to_string()
}

fn default_bucket() -> String {
    "plot-schemes".to_string()
}

impl AppConfig {
    /// Read and parse the configuration from a TOML file.
    pub fn load_from_file(path: &Utf8Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig =
            toml::from_str(&content).with_context(|| format!("Failed to parse {path}"))?;
        Ok(config)
    }

    /// Build the configuration entirely from environment variables.
    /// `PLOTMAP_BASE_URL` and `PLOTMAP_API_KEY` are required.
    pub fn from_env() -> Result<Self> {
        let Ok(base_url) = env::var("PLOTMAP_BASE_URL") else {
            bail!("PLOTMAP_BASE_URL is not set and no config file was given");
        };
        let Ok(api_key) = env::var("PLOTMAP_API_KEY") else {
            bail!("PLOTMAP_API_KEY is not set and no config file was given");
        };
        let mut config = AppConfig {
            remote: RemoteConfig {
                base_url,
                api_key,
                table: default_table(),
                bucket: default_bucket(),
            },
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load the configuration: from `path` if given (with environment
    /// overrides applied on top), otherwise from the environment alone.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        dotenv::dotenv().ok();
        match path {
            Some(path) => {
                let mut config = Self::load_from_file(path)?;
                config.apply_env_overrides();
                Ok(config)
            }
            None => Self::from_env(),
        }
    }

    /// Override individual fields from `PLOTMAP_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("PLOTMAP_BASE_URL") {
            self.remote.base_url = v;
        }
        if let Ok(v) = env::var("PLOTMAP_API_KEY") {
            self.remote.api_key = v;
        }
        if let Ok(v) = env::var("PLOTMAP_TABLE") {
            self.remote.table = v;
        }
        if let Ok(v) = env::var("PLOTMAP_BUCKET") {
            self.remote.bucket = v;
        }
    }
}
