//! Strategy pattern for OIDC configuration deletion
//!
//! The same logical delete has three execution paths:
//! - AutoStrategy: delete the private key secret and the bucket directly
//! - ManualStrategy: print the equivalent cloud CLI commands
//! - HostedStrategy: remove the provider-hosted config, then the secret
//!
//! Each strategy runs its steps in order and stops at the first failure.
//! Nothing already deleted is restored.

pub mod auto;
pub mod hosted;
pub mod manual;

use crate::cloud::CloudError;
use crate::config::ConfigError;
use crate::controlplane::ControlPlaneError;
use crate::mode::Mode;
use crate::runtime::Runtime;
use async_trait::async_trait;
use thiserror::Error;

pub use auto::AutoStrategy;
pub use hosted::HostedStrategy;
pub use manual::ManualStrategy;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("There was a problem deleting private key from secrets manager: {0}")]
    DeleteSecret(#[source] CloudError),

    #[error("There was a problem deleting S3 bucket '{bucket}': {source}")]
    DeleteBucket {
        bucket: String,
        #[source]
        source: CloudError,
    },

    #[error("There was a problem deleting Red Hat Hosted OIDC Configuration: {0}")]
    DeleteHosted(#[source] ControlPlaneError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything a strategy needs to remove one OIDC configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidcConfigInput {
    pub private_key_secret_arn: String,
    pub bucket_name: String,
    pub region: String,
}

#[async_trait]
pub trait DeleteOidcConfigStrategy: Send + Sync {
    /// Strategy name for logging
    fn name(&self) -> &'static str;

    async fn execute(&self, input: &OidcConfigInput, rt: &Runtime) -> Result<(), StrategyError>;
}

/// Pick the strategy for `mode`
///
/// A hosted configuration always takes the hosted path; callers reject
/// `hosted` outside auto mode before getting here.
pub fn select_strategy(mode: Mode, hosted: bool) -> Box<dyn DeleteOidcConfigStrategy> {
    if hosted {
        return Box::new(HostedStrategy);
    }
    match mode {
        Mode::Auto => Box::new(AutoStrategy),
        Mode::Manual => Box::new(ManualStrategy),
    }
}
