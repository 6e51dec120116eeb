//! Print the cloud CLI commands that delete an OIDC configuration

use super::{DeleteOidcConfigStrategy, OidcConfigInput, StrategyError};
use crate::commandbuilder::{join_commands, AwsCommandBuilder, Command, Param};
use crate::runtime::Runtime;
use async_trait::async_trait;

pub struct ManualStrategy;

/// Secret deletion, bucket emptying, bucket removal
pub fn delete_commands(input: &OidcConfigInput) -> Vec<String> {
    let bucket_url = format!("s3://{}", input.bucket_name);
    vec![
        AwsCommandBuilder::secrets_manager()
            .set_command(Command::DeleteSecret)
            .add_param(Param::SecretId, &input.private_key_secret_arn)
            .add_param(Param::Region, &input.region)
            .build(),
        AwsCommandBuilder::s3()
            .set_command(Command::Remove)
            .add_value_no_param(&bucket_url)
            .add_param_no_value(Param::Recursive)
            .build(),
        AwsCommandBuilder::s3()
            .set_command(Command::RemoveBucket)
            .add_value_no_param(&bucket_url)
            .build(),
    ]
}

#[async_trait]
impl DeleteOidcConfigStrategy for ManualStrategy {
    fn name(&self) -> &'static str {
        "manual"
    }

    async fn execute(&self, input: &OidcConfigInput, rt: &Runtime) -> Result<(), StrategyError> {
        rt.reporter.print(join_commands(&delete_commands(input)));
        Ok(())
    }
}
