//! Provider-hosted OIDC configuration

use super::{DeleteOidcConfigStrategy, OidcConfigInput, StrategyError};
use crate::helper;
use crate::runtime::Runtime;
use async_trait::async_trait;
use tracing::info;

pub struct HostedStrategy;

#[async_trait]
impl DeleteOidcConfigStrategy for HostedStrategy {
    fn name(&self) -> &'static str {
        "hosted"
    }

    async fn execute(&self, input: &OidcConfigInput, rt: &Runtime) -> Result<(), StrategyError> {
        let control_plane = rt.control_plane()?;
        let spin = helper::spinner(&rt.reporter, "Deleting Red Hat hosted OIDC configuration");

        let result: Result<(), StrategyError> = async {
            info!(config = %input.bucket_name, "Deleting hosted OIDC configuration");
            control_plane
                .delete_hosted_oidc_config(&input.bucket_name)
                .await
                .map_err(StrategyError::DeleteHosted)?;

            rt.cloud
                .delete_secret(&input.private_key_secret_arn)
                .await
                .map_err(StrategyError::DeleteSecret)
        }
        .await;

        if let Some(spin) = spin {
            spin.finish_and_clear();
        }
        result?;

        if rt.reporter.is_terminal() {
            rt.reporter.info("Deleted OIDC configuration");
        }
        Ok(())
    }
}
