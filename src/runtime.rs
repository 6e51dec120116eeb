//! Per-command context
//!
//! Bundles the reporter, prompter and the two external clients so that
//! commands and strategies receive everything through one reference.

use crate::cloud::{AwsCliClient, CloudProvider};
use crate::commands::CommandError;
use crate::config::{Config, ConfigError};
use crate::controlplane::{Cluster, ClusterManager, OcmClient};
use crate::interactive::{DialoguerPrompter, Prompter};
use crate::reporter::Reporter;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

pub struct Runtime {
    pub reporter: Reporter,
    pub prompter: Box<dyn Prompter>,
    pub cloud: Box<dyn CloudProvider>,
    control_plane: Option<Box<dyn ClusterManager>>,
    region: Option<String>,
}

impl Runtime {
    pub fn new(
        reporter: Reporter,
        prompter: Box<dyn Prompter>,
        cloud: Box<dyn CloudProvider>,
        control_plane: Option<Box<dyn ClusterManager>>,
        region: Option<String>,
    ) -> Self {
        Runtime {
            reporter,
            prompter,
            cloud,
            control_plane,
            region,
        }
    }

    /// Terminal runtime wired to the real clients
    ///
    /// Without a token the control plane stays unset and only commands that
    /// reach it fail.
    pub fn from_config(config: &Config) -> Self {
        let region = config.region().ok().map(str::to_string);
        let control_plane = config.token().ok().map(|token| {
            Box::new(OcmClient::new(&config.api_url, token)) as Box<dyn ClusterManager>
        });
        debug!(
            api_url = %config.api_url,
            region = ?region,
            logged_in = control_plane.is_some(),
            "Runtime configured"
        );
        Runtime::new(
            Reporter::new(),
            Box::new(DialoguerPrompter),
            Box::new(AwsCliClient::new(config.aws_cli.clone(), region.clone())),
            control_plane,
            region,
        )
    }

    pub fn region(&self) -> Result<&str, CommandError> {
        self.region.as_deref().ok_or_else(|| {
            CommandError::Failed(
                "Error getting region: region not set, use --region or AWS_REGION".to_string(),
            )
        })
    }

    pub fn control_plane(&self) -> Result<&dyn ClusterManager, ConfigError> {
        self.control_plane
            .as_deref()
            .ok_or(ConfigError::MissingToken)
    }

    /// Validated cluster key from the `--cluster` flag
    pub fn cluster_key<'a>(&self, key: Option<&'a str>) -> Result<&'a str, CommandError> {
        static CLUSTER_KEY: OnceLock<Option<Regex>> = OnceLock::new();

        let key = key.unwrap_or("").trim();
        let valid = CLUSTER_KEY
            .get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").ok())
            .as_ref()
            .is_some_and(|re| re.is_match(key));
        if !valid {
            return Err(CommandError::Failed(format!(
                "Expected a valid cluster name or identifier: '{}'",
                key
            )));
        }
        Ok(key)
    }

    pub async fn fetch_cluster(&self, key: &str) -> Result<Cluster, CommandError> {
        let control_plane = self.control_plane()?;
        debug!(cluster = %key, "Fetching cluster");
        control_plane
            .get_cluster(key)
            .await
            .map_err(|e| CommandError::Failed(format!("Failed to get cluster '{}': {}", key, e)))
    }
}
