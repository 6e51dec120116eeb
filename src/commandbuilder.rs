//! Cloud provider CLI command assembly
//!
//! Manual mode prints these commands for the user; the CLI-backed cloud
//! client runs the very same invocations through `args()`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    SecretsManager,
    S3,
    Iam,
    Sts,
    Ec2,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::SecretsManager => "secretsmanager",
            Service::S3 => "s3",
            Service::Iam => "iam",
            Service::Sts => "sts",
            Service::Ec2 => "ec2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    DeleteSecret,
    Remove,
    RemoveBucket,
    DeleteOpenIdConnectProvider,
    GetOpenIdConnectProvider,
    GetCallerIdentity,
    DescribeSubnets,
    DescribeSecurityGroups,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::DeleteSecret => "delete-secret",
            Command::Remove => "rm",
            Command::RemoveBucket => "rb",
            Command::DeleteOpenIdConnectProvider => "delete-open-id-connect-provider",
            Command::GetOpenIdConnectProvider => "get-open-id-connect-provider",
            Command::GetCallerIdentity => "get-caller-identity",
            Command::DescribeSubnets => "describe-subnets",
            Command::DescribeSecurityGroups => "describe-security-groups",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    SecretId,
    Region,
    Recursive,
    Force,
    ForceDeleteWithoutRecovery,
    OpenIdConnectProviderArn,
    SubnetIds,
    Filters,
    Output,
}

impl Param {
    pub fn as_str(&self) -> &'static str {
        match self {
            Param::SecretId => "secret-id",
            Param::Region => "region",
            Param::Recursive => "recursive",
            Param::Force => "force",
            Param::ForceDeleteWithoutRecovery => "force-delete-without-recovery",
            Param::OpenIdConnectProviderArn => "open-id-connect-provider-arn",
            Param::SubnetIds => "subnet-ids",
            Param::Filters => "filters",
            Param::Output => "output",
        }
    }
}

/// Builder for a single `aws <service> <command> ...` invocation
#[derive(Debug, Clone)]
pub struct AwsCommandBuilder {
    service: Service,
    command: Option<Command>,
    values: Vec<String>,
    params: Vec<(Param, Option<String>)>,
}

impl AwsCommandBuilder {
    pub fn new(service: Service) -> Self {
        AwsCommandBuilder {
            service,
            command: None,
            values: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn secrets_manager() -> Self {
        Self::new(Service::SecretsManager)
    }

    pub fn s3() -> Self {
        Self::new(Service::S3)
    }

    pub fn iam() -> Self {
        Self::new(Service::Iam)
    }

    pub fn sts() -> Self {
        Self::new(Service::Sts)
    }

    pub fn ec2() -> Self {
        Self::new(Service::Ec2)
    }

    pub fn set_command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    pub fn add_param(mut self, param: Param, value: impl Into<String>) -> Self {
        self.params.push((param, Some(value.into())));
        self
    }

    pub fn add_param_no_value(mut self, param: Param) -> Self {
        self.params.push((param, None));
        self
    }

    /// Positional argument placed right after the command
    pub fn add_value_no_param(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Printable command, one parameter per continuation line
    pub fn build(&self) -> String {
        let mut command = format!("aws {}", self.service.as_str());
        if let Some(cmd) = self.command {
            command.push(' ');
            command.push_str(cmd.as_str());
        }
        for value in &self.values {
            command.push(' ');
            command.push_str(value);
        }
        for (param, value) in &self.params {
            command.push_str(" \\\n\t--");
            command.push_str(param.as_str());
            if let Some(value) = value {
                command.push(' ');
                command.push_str(value);
            }
        }
        command
    }

    /// Argument vector for direct execution (without the `aws` binary itself)
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.service.as_str().to_string()];
        if let Some(cmd) = self.command {
            args.push(cmd.as_str().to_string());
        }
        args.extend(self.values.iter().cloned());
        for (param, value) in &self.params {
            args.push(format!("--{}", param.as_str()));
            if let Some(value) = value {
                args.push(value.clone());
            }
        }
        args
    }
}

impl fmt::Display for AwsCommandBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

/// Join printable commands with a blank line between each
pub fn join_commands(commands: &[String]) -> String {
    commands.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_delete_secret_command() {
        let command = AwsCommandBuilder::secrets_manager()
            .set_command(Command::DeleteSecret)
            .add_param(Param::SecretId, "arn:aws:secretsmanager:us-east-1:123:secret:key")
            .add_param(Param::Region, "us-east-1")
            .build();

        assert_eq!(
            command,
            "aws secretsmanager delete-secret \\\n\t--secret-id arn:aws:secretsmanager:us-east-1:123:secret:key \\\n\t--region us-east-1"
        );
    }

    #[test]
    fn test_build_places_values_before_params() {
        let command = AwsCommandBuilder::s3()
            .set_command(Command::Remove)
            .add_value_no_param("s3://bucket")
            .add_param_no_value(Param::Recursive)
            .build();

        assert_eq!(command, "aws s3 rm s3://bucket \\\n\t--recursive");
    }

    #[test]
    fn test_args_match_printed_command() {
        let builder = AwsCommandBuilder::s3()
            .set_command(Command::RemoveBucket)
            .add_value_no_param("s3://bucket")
            .add_param_no_value(Param::Force)
            .add_param(Param::Region, "eu-west-1");

        assert_eq!(
            builder.args(),
            vec!["s3", "rb", "s3://bucket", "--force", "--region", "eu-west-1"]
        );
    }

    #[test]
    fn test_join_commands_separates_with_blank_line() {
        let joined = join_commands(&["aws a".to_string(), "aws b".to_string()]);
        assert_eq!(joined, "aws a\n\naws b");
    }
}
