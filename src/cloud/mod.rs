//! Cloud infrastructure operations
//!
//! Secrets, buckets, IAM OIDC providers and VPC lookups. Commands depend on
//! the [`CloudProvider`] trait; [`AwsCliClient`] drives the provider's CLI.

pub mod aws;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub use aws::AwsCliClient;

#[derive(Debug, Error)]
pub enum CloudError {
    #[error("failed to execute '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("failed to parse output of '{command}': {source}")]
    Parse {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("subnet '{0}' not found")]
    SubnetNotFound(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subnet {
    pub subnet_id: String,
    #[serde(default)]
    pub vpc_id: Option<String>,
    #[serde(default)]
    pub availability_zone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroup {
    pub group_id: String,
    #[serde(default)]
    pub group_name: String,
}

#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Delete a secret immediately, skipping the recovery window
    async fn delete_secret(&self, arn: &str) -> Result<(), CloudError>;

    /// Empty and remove a bucket
    async fn delete_bucket(&self, name: &str) -> Result<(), CloudError>;

    async fn caller_account_id(&self) -> Result<String, CloudError>;

    async fn oidc_provider_exists(&self, arn: &str) -> Result<bool, CloudError>;

    async fn delete_oidc_provider(&self, arn: &str) -> Result<(), CloudError>;

    async fn describe_subnet(&self, subnet_id: &str) -> Result<Subnet, CloudError>;

    async fn list_security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>, CloudError>;
}
