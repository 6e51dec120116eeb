//! Configuration resolution
//!
//! Values are layered: built-in defaults, then the optional TOML file, then
//! environment variables, then command-line flags.
//!
//! Environment:
//! - `PILVI_CONFIG`: explicit path to the config file
//! - `PILVI_API_URL`: cluster-management API base URL
//! - `PILVI_TOKEN`: bearer access token for the cluster-management API
//! - `AWS_REGION` / `AWS_DEFAULT_REGION`: cloud region
//! - `PILVI_AWS_CLI`: cloud provider CLI binary

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default cluster-management API endpoint
pub const DEFAULT_API_URL: &str = "https://api.openshift.com";

/// Default cloud provider CLI binary
pub const DEFAULT_AWS_CLI: &str = "aws";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config file '{0}' does not exist")]
    NotFound(PathBuf),

    #[error("region not set, use --region or AWS_REGION")]
    MissingRegion,

    #[error("not logged in: set PILVI_TOKEN or token in config file")]
    MissingToken,
}

/// On-disk representation, every key optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub region: Option<String>,
    pub aws_cli: Option<String>,
}

/// Values supplied through global command-line flags
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub region: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub aws_cli: String,
    token: Option<String>,
    region: Option<String>,
}

impl Config {
    /// Load configuration from file, environment and flags
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = match std::env::var("PILVI_CONFIG").ok().filter(|p| !p.is_empty()) {
            Some(explicit) => {
                let path = PathBuf::from(explicit);
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                read_file(&path)?
            }
            None => match default_path() {
                Some(path) if path.exists() => read_file(&path)?,
                _ => FileConfig::default(),
            },
        };

        Ok(Self::resolve(file, |key| std::env::var(key).ok(), overrides))
    }

    /// Merge layers; `env` is injected so resolution can be tested without
    /// touching the process environment
    pub fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
        overrides: &Overrides,
    ) -> Self {
        let env = |key: &str| env(key).filter(|v| !v.is_empty());

        let api_url = env("PILVI_API_URL")
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let aws_cli = env("PILVI_AWS_CLI")
            .or(file.aws_cli)
            .unwrap_or_else(|| DEFAULT_AWS_CLI.to_string());

        let token = env("PILVI_TOKEN").or(file.token);

        let region = overrides
            .region
            .clone()
            .filter(|r| !r.is_empty())
            .or_else(|| env("AWS_REGION"))
            .or_else(|| env("AWS_DEFAULT_REGION"))
            .or(file.region);

        Config {
            api_url: api_url.trim_end_matches('/').to_string(),
            aws_cli,
            token,
            region,
        }
    }

    pub fn region(&self) -> Result<&str, ConfigError> {
        self.region.as_deref().ok_or(ConfigError::MissingRegion)
    }

    pub fn token(&self) -> Result<&str, ConfigError> {
        self.token.as_deref().ok_or(ConfigError::MissingToken)
    }
}

/// `$XDG_CONFIG_HOME/pilvi/config.toml` or the platform equivalent
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pilvi").join("config.toml"))
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_file(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_file(raw: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(raw)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
