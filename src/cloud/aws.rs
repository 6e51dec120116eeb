//! Cloud provider CLI client
//!
//! Runs the same invocations manual mode prints, with `--output json`, and
//! decodes stdout. A non-zero exit carries stderr into the error.

use super::{CloudError, CloudProvider, SecurityGroup, Subnet};
use crate::commandbuilder::{AwsCommandBuilder, Command, Param};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

/// Error code the IAM API returns for a missing entity
const NO_SUCH_ENTITY: &str = "NoSuchEntity";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CallerIdentity {
    account: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeSubnetsOutput {
    #[serde(default)]
    subnets: Vec<Subnet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeSecurityGroupsOutput {
    #[serde(default)]
    security_groups: Vec<SecurityGroup>,
}

pub struct AwsCliClient {
    program: String,
    region: Option<String>,
}

impl AwsCliClient {
    pub fn new(program: impl Into<String>, region: Option<String>) -> Self {
        AwsCliClient {
            program: program.into(),
            region,
        }
    }

    fn with_region(&self, builder: AwsCommandBuilder) -> AwsCommandBuilder {
        match &self.region {
            Some(region) => builder.add_param(Param::Region, region.clone()),
            None => builder,
        }
    }

    /// Execute and return stdout
    async fn run(&self, builder: AwsCommandBuilder) -> Result<Vec<u8>, CloudError> {
        let builder = self.with_region(builder);
        let args = builder.args();
        let command = format!("{} {}", self.program, args.join(" "));
        debug!(command = %command, "Running cloud CLI");

        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|source| CloudError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(command = %command, stderr = %stderr, "Cloud CLI command failed");
            Err(CloudError::CommandFailed { command, stderr })
        }
    }

    async fn run_json<T: DeserializeOwned>(
        &self,
        builder: AwsCommandBuilder,
    ) -> Result<T, CloudError> {
        let builder = builder.add_param(Param::Output, "json");
        let command = builder.build();
        let stdout = self.run(builder).await?;
        serde_json::from_slice(&stdout).map_err(|source| CloudError::Parse { command, source })
    }
}

#[async_trait]
impl CloudProvider for AwsCliClient {
    async fn delete_secret(&self, arn: &str) -> Result<(), CloudError> {
        let cmd = AwsCommandBuilder::secrets_manager()
            .set_command(Command::DeleteSecret)
            .add_param(Param::SecretId, arn)
            .add_param_no_value(Param::ForceDeleteWithoutRecovery);
        self.run(cmd).await.map(|_| ())
    }

    async fn delete_bucket(&self, name: &str) -> Result<(), CloudError> {
        let cmd = AwsCommandBuilder::s3()
            .set_command(Command::RemoveBucket)
            .add_value_no_param(format!("s3://{}", name))
            .add_param_no_value(Param::Force);
        self.run(cmd).await.map(|_| ())
    }

    async fn caller_account_id(&self) -> Result<String, CloudError> {
        let cmd = AwsCommandBuilder::sts().set_command(Command::GetCallerIdentity);
        let identity: CallerIdentity = self.run_json(cmd).await?;
        Ok(identity.account)
    }

    async fn oidc_provider_exists(&self, arn: &str) -> Result<bool, CloudError> {
        let cmd = AwsCommandBuilder::iam()
            .set_command(Command::GetOpenIdConnectProvider)
            .add_param(Param::OpenIdConnectProviderArn, arn);
        match self.run(cmd).await {
            Ok(_) => Ok(true),
            Err(CloudError::CommandFailed { stderr, .. }) if stderr.contains(NO_SUCH_ENTITY) => {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn delete_oidc_provider(&self, arn: &str) -> Result<(), CloudError> {
        let cmd = AwsCommandBuilder::iam()
            .set_command(Command::DeleteOpenIdConnectProvider)
            .add_param(Param::OpenIdConnectProviderArn, arn);
        self.run(cmd).await.map(|_| ())
    }

    async fn describe_subnet(&self, subnet_id: &str) -> Result<Subnet, CloudError> {
        let cmd = AwsCommandBuilder::ec2()
            .set_command(Command::DescribeSubnets)
            .add_param(Param::SubnetIds, subnet_id);
        let out: DescribeSubnetsOutput = self.run_json(cmd).await?;
        out.subnets
            .into_iter()
            .next()
            .ok_or_else(|| CloudError::SubnetNotFound(subnet_id.to_string()))
    }

    async fn list_security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>, CloudError> {
        let cmd = AwsCommandBuilder::ec2()
            .set_command(Command::DescribeSecurityGroups)
            .add_param(Param::Filters, format!("Name=vpc-id,Values={}", vpc_id));
        let out: DescribeSecurityGroupsOutput = self.run_json(cmd).await?;
        Ok(out.security_groups)
    }
}
