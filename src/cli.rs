//! CLI argument definitions using clap

use crate::output::Format;
use clap::{Args, Parser, Subcommand};

/// pilvi: manage OpenShift clusters on AWS
#[derive(Parser, Debug)]
#[command(name = "pilvi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Use a specific AWS region, overriding the AWS_REGION environment variable
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a resource from stdin
    #[command(subcommand)]
    Create(CreateCommand),

    /// Delete a specific resource
    #[command(subcommand)]
    Delete(DeleteCommand),

    /// List all resources of a specific type
    #[command(subcommand)]
    List(ListCommand),
}

#[derive(Subcommand, Debug)]
pub enum CreateCommand {
    /// Add an Ingress endpoint to determine API access to the cluster
    #[command(visible_aliases = ["route", "routes", "ingresses"])]
    #[command(after_help = CREATE_INGRESS_EXAMPLES)]
    Ingress(CreateIngressArgs),

    /// Add a machine pool to the cluster
    #[command(name = "machinepool", visible_aliases = ["machinepools", "machine-pool", "machine-pools"])]
    #[command(after_help = CREATE_MACHINEPOOL_EXAMPLES)]
    MachinePool(CreateMachinePoolArgs),
}

#[derive(Subcommand, Debug)]
pub enum DeleteCommand {
    /// Cleans up OIDC config based on secret ARN
    #[command(name = "oidc-config", alias = "oidcconfig", hide = true)]
    #[command(after_help = DELETE_OIDC_CONFIG_EXAMPLES)]
    OidcConfig(DeleteOidcConfigArgs),

    /// Delete the OIDC provider of an OIDC endpoint
    #[command(name = "oidc-provider", alias = "oidcprovider")]
    OidcProvider(DeleteOidcProviderArgs),

    /// Delete a cluster ingress
    #[command(visible_aliases = ["route", "routes", "ingresses"])]
    Ingress(DeleteResourceArgs),

    /// Delete a machine pool
    #[command(name = "machinepool", visible_aliases = ["machinepools", "machine-pool", "machine-pools"])]
    MachinePool(DeleteResourceArgs),
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// List clusters
    #[command(visible_alias = "cluster")]
    Clusters(OutputArgs),

    /// List cluster ingresses
    #[command(visible_aliases = ["ingress", "route", "routes"])]
    Ingresses(ClusterOutputArgs),

    /// List cluster machine pools
    #[command(name = "machinepools", visible_aliases = ["machinepool", "machine-pools"])]
    MachinePools(ClusterOutputArgs),

    /// List OIDC configurations
    #[command(name = "oidc-configs", alias = "oidcconfigs")]
    OidcConfigs(OutputArgs),
}

#[derive(Args, Debug, Default)]
pub struct CreateIngressArgs {
    /// Name or ID of the cluster
    #[arg(short = 'c', long)]
    pub cluster: Option<String>,

    /// Restrict application route to direct, private connectivity
    #[arg(long)]
    pub private: bool,

    /// Label match for ingress. Format should be a comma-separated list of 'key=value'.
    /// If no label is specified, all routes will be exposed on both routers.
    #[arg(long, default_value = "")]
    pub label_match: String,

    /// Chooses type of load balancer to be NLB
    #[arg(long)]
    pub nlb: bool,

    /// Enable interactive mode
    #[arg(short = 'i', long)]
    pub interactive: bool,
}

#[derive(Args, Debug, Default)]
pub struct CreateMachinePoolArgs {
    /// Name or ID of the cluster
    #[arg(short = 'c', long)]
    pub cluster: Option<String>,

    /// Name for the machine pool
    #[arg(long)]
    pub name: Option<String>,

    /// Count of machines for this machine pool
    #[arg(long, allow_negative_numbers = true)]
    pub replicas: Option<i32>,

    /// Enable autoscaling for the machine pool
    #[arg(long)]
    pub enable_autoscaling: bool,

    /// Minimum number of machines for the machine pool
    #[arg(long, allow_negative_numbers = true)]
    pub min_replicas: Option<i32>,

    /// Maximum number of machines for the machine pool
    #[arg(long, allow_negative_numbers = true)]
    pub max_replicas: Option<i32>,

    /// Instance type that should be used
    #[arg(long, default_value = crate::commands::create::machinepool::DEFAULT_INSTANCE_TYPE)]
    pub instance_type: String,

    /// Labels for machine pool. Format should be a comma-separated list of 'key=value'
    #[arg(long, default_value = "")]
    pub labels: String,

    /// Taints for machine pool. Format should be a comma-separated list of 'key=value:ScheduleType'
    #[arg(long, default_value = "")]
    pub taints: String,

    /// Apply user defined tags to all machine pool resources. Format should be a comma-separated list of 'key:value'
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Additional security group IDs to be added to the machine pool
    #[arg(long, value_delimiter = ',')]
    pub additional_security_group_ids: Vec<String>,

    /// Subnet the node pool is placed in (hosted control plane clusters only)
    #[arg(long)]
    pub subnet: Option<String>,

    /// Enable interactive mode
    #[arg(short = 'i', long)]
    pub interactive: bool,
}

#[derive(Args, Debug, Default)]
pub struct DeleteOidcConfigArgs {
    /// AWS Secrets Manager ARN for identification of config
    #[arg(long)]
    pub oidc_private_key_secret_arn: Option<String>,

    /// Indicates whether it is a Red Hat hosted or Customer hosted OIDC Configuration
    #[arg(long)]
    pub rh_hosted: bool,

    /// How to perform the operation. Valid options are:
    /// auto: Resource changes will be automatic applied using the current AWS account.
    /// manual: Commands necessary to modify AWS resources will be output to be run manually.
    #[arg(short = 'm', long)]
    pub mode: Option<String>,

    /// Enable interactive mode
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Automatically answer yes to confirm operation
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Args, Debug, Default)]
pub struct DeleteOidcProviderArgs {
    /// Endpoint URL of the OIDC provider to delete
    #[arg(long)]
    pub oidc_endpoint_url: Option<String>,

    /// How to perform the operation. Valid options are 'auto' and 'manual'
    #[arg(short = 'm', long)]
    pub mode: Option<String>,

    /// Enable interactive mode
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Automatically answer yes to confirm operation
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Args, Debug, Default)]
pub struct DeleteResourceArgs {
    /// ID of the resource to delete
    pub id: String,

    /// Name or ID of the cluster
    #[arg(short = 'c', long)]
    pub cluster: Option<String>,

    /// Automatically answer yes to confirm operation
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = Format::Table)]
    pub output: Format,
}

#[derive(Args, Debug, Default)]
pub struct ClusterOutputArgs {
    /// Name or ID of the cluster
    #[arg(short = 'c', long)]
    pub cluster: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = Format::Table)]
    pub output: Format,
}

const CREATE_INGRESS_EXAMPLES: &str = "\
Examples:
  # Add an internal ingress to a cluster named \"mycluster\"
  pilvi create ingress --private --cluster=mycluster

  # Add a public ingress to a cluster
  pilvi create ingress --cluster=mycluster

  # Add an ingress with route selector label match
  pilvi create ingress -c mycluster --label-match=\"foo=bar,bar=baz\"";

const CREATE_MACHINEPOOL_EXAMPLES: &str = "\
Examples:
  # Interactively add a machine pool to a cluster named \"mycluster\"
  pilvi create machinepool --cluster=mycluster --interactive

  # Add a machine pool with 3 replicas of m5.xlarge to a cluster
  pilvi create machinepool --cluster=mycluster --name=mp-1 --replicas=3

  # Add an autoscaling machine pool with labels and taints
  pilvi create machinepool -c mycluster --name=mp-1 --enable-autoscaling \\
    --min-replicas=2 --max-replicas=5 --labels=foo=bar --taints=key=value:NoSchedule";

const DELETE_OIDC_CONFIG_EXAMPLES: &str = "\
Examples:
  # Delete OIDC config based on secret ARN that has been supplied
  pilvi delete oidc-config --oidc-private-key-secret-arn <oidc_private_key_secret_arn>";
