//! Customer-hosted OIDC configuration, deleted through the cloud API

use super::{DeleteOidcConfigStrategy, OidcConfigInput, StrategyError};
use crate::helper;
use crate::runtime::Runtime;
use async_trait::async_trait;
use tracing::info;

pub struct AutoStrategy;

#[async_trait]
impl DeleteOidcConfigStrategy for AutoStrategy {
    fn name(&self) -> &'static str {
        "auto"
    }

    async fn execute(&self, input: &OidcConfigInput, rt: &Runtime) -> Result<(), StrategyError> {
        let bucket = &input.bucket_name;
        let spin = helper::spinner(
            &rt.reporter,
            &format!("Deleting OIDC configuration '{}'", bucket),
        );

        let result: Result<(), StrategyError> = async {
            info!(secret = %input.private_key_secret_arn, "Deleting private key secret");
            rt.cloud
                .delete_secret(&input.private_key_secret_arn)
                .await
                .map_err(StrategyError::DeleteSecret)?;

            info!(bucket = %bucket, "Deleting OIDC bucket");
            rt.cloud
                .delete_bucket(bucket)
                .await
                .map_err(|source| StrategyError::DeleteBucket {
                    bucket: bucket.clone(),
                    source,
                })
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
