//! `create machinepool`
//!
//! Hosted control-plane clusters get a node pool, classic clusters a machine
//! pool. Both share naming, scaling, label and taint rules.

use crate::cli::CreateMachinePoolArgs;
use crate::cloud::Subnet;
use crate::commands::CommandError;
use crate::controlplane::{AwsNodePoolBuilder, Cluster, ClusterState, PoolBuilder, Scaling, Taint};
use crate::helper;
use crate::interactive::{self, validation, Input};
use crate::runtime::Runtime;
use std::collections::BTreeMap;
use tracing::info;

pub const DEFAULT_INSTANCE_TYPE: &str = "m5.xlarge";

const NAME_PATTERN: &str = "^[a-z]([-a-z0-9]*[a-z0-9])?$";
const TAINT_EFFECTS: [&str; 3] = ["NoSchedule", "PreferNoSchedule", "NoExecute"];

/// Cloud settings for a node pool, leaving empty collections unset
pub fn create_aws_node_pool_builder(
    instance_type: &str,
    security_group_ids: &[String],
    tags: &BTreeMap<String, String>,
) -> AwsNodePoolBuilder {
    let mut builder = AwsNodePoolBuilder::new().instance_type(instance_type);
    if !security_group_ids.is_empty() {
        builder = builder.additional_security_group_ids(security_group_ids.to_vec());
    }
    if !tags.is_empty() {
        builder = builder.tags(tags.clone());
    }
    builder
}

pub fn get_vpc_id_from_subnet(subnet: &Subnet) -> Result<String, CommandError> {
    subnet.vpc_id.clone().filter(|id| !id.is_empty()).ok_or_else(|| {
        CommandError::Failed(
            "Unexpected situation a VPC ID should have been selected based on chosen subnets"
                .to_string(),
        )
    })
}

/// Security group IDs available in the VPC of the cluster's subnets
pub async fn get_security_groups_option(
    rt: &Runtime,
    cluster: &Cluster,
) -> Result<Vec<String>, CommandError> {
    let subnet_id = cluster.subnet_ids().first().ok_or_else(|| {
        CommandError::Failed(
            "Expected cluster's subnets to contain subnets IDs, but got an empty list".to_string(),
        )
    })?;
    let subnet = rt.cloud.describe_subnet(subnet_id).await?;
    let vpc_id = get_vpc_id_from_subnet(&subnet)?;
    let groups = rt.cloud.list_security_groups(&vpc_id).await?;
    Ok(groups.into_iter().map(|g| g.group_id).collect())
}

/// `key=value:Effect,...`
pub fn parse_taints(input: &str) -> Result<Vec<Taint>, CommandError> {
    let mut taints = Vec::new();
    if input.trim().is_empty() {
        return Ok(taints);
    }
    for raw in input.split(',') {
        let invalid = || {
            CommandError::Failed(format!(
                "Expected key=value:scheduleType format for taints, got '{}'",
                raw
            ))
        };
        let (pair, effect) = raw.trim().rsplit_once(':').ok_or_else(invalid)?;
        let (key, value) = pair.split_once('=').ok_or_else(invalid)?;
        if key.trim().is_empty() {
            return Err(invalid());
        }
        if !TAINT_EFFECTS.contains(&effect) {
            let effects: Vec<String> = TAINT_EFFECTS.iter().map(|e| e.to_string()).collect();
            return Err(CommandError::Failed(format!(
                "Invalid taint effect '{}', should be one of {}",
                effect,
                helper::slice_to_string(&effects)
            )));
        }
        taints.push(Taint {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
            effect: effect.to_string(),
        });
    }
    Ok(taints)
}

fn parse_pairs(
    input: &str,
    separator: char,
    flag: &str,
) -> Result<BTreeMap<String, String>, CommandError> {
    helper::parse_key_value_pairs(input, separator).ok_or_else(|| {
        CommandError::Failed(format!(
            "Expected key{}value format for {}",
            separator, flag
        ))
    })
}

fn prompt_int(rt: &Runtime, question: &str, default: i32) -> Result<i32, CommandError> {
    interactive::get_int(
        rt.prompter.as_ref(),
        Input::new(question).default_text(default.to_string()),
    )
    .map_err(|e| CommandError::Failed(format!("Expected a valid number of {}: {}", question, e)))
}

fn resolve_scaling(args: &CreateMachinePoolArgs, rt: &Runtime) -> Result<Scaling, CommandError> {
    let mut autoscaling = args.enable_autoscaling;
    if args.interactive {
        autoscaling = interactive::get_bool(
            rt.prompter.as_ref(),
            Input::new("Enable autoscaling").default_bool(autoscaling),
        )?;
    }

    if autoscaling {
        if args.replicas.is_some() {
            return Err(CommandError::Failed(
                "Replicas can't be set when autoscaling is enabled".to_string(),
            ));
        }
        let mut min = args.min_replicas.unwrap_or(0);
        let mut max = args.max_replicas.unwrap_or(min);
        if args.interactive {
            min = prompt_int(rt, "min replicas", min)?;
            max = prompt_int(rt, "max replicas", max.max(min))?;
        }
        if min < 0 {
            return Err(CommandError::Failed(
                "Min replicas must be a non-negative integer".to_string(),
            ));
        }
        if max < min {
            return Err(CommandError::Failed(format!(
                "Max replicas ({}) must not be less than min replicas ({})",
                max, min
            )));
        }
        return Ok(Scaling::Autoscaling { min, max });
    }

    if args.min_replicas.is_some() || args.max_replicas.is_some() {
        return Err(CommandError::Failed(
            "Autoscaling must be enabled in order to set min and max replicas".to_string(),
        ));
    }
    let mut replicas = args.replicas.unwrap_or(0);
    if args.interactive {
        replicas = prompt_int(rt, "replicas", replicas)?;
    }
    if replicas < 0 {
        return Err(CommandError::Failed(
            "Replicas must be a non-negative integer".to_string(),
        ));
    }
    Ok(Scaling::Fixed(replicas))
}

pub async fn run(args: CreateMachinePoolArgs, rt: &Runtime) -> Result<(), CommandError> {
    let cluster_key = rt.cluster_key(args.cluster.as_deref())?;
    let cluster = rt.fetch_cluster(cluster_key).await?;
    if cluster.state != ClusterState::Ready {
        return Err(CommandError::Failed(format!(
            "Cluster '{}' is not yet ready",
            cluster_key
        )));
    }

    let mut name = args.name.clone().unwrap_or_default();
    if name.is_empty() || args.interactive {
        let name_validator = validation::reg_exp(NAME_PATTERN)
            .map_err(|e| CommandError::Failed(e.to_string()))?;
        name = interactive::get_string(
            rt.prompter.as_ref(),
            Input::new("Machine pool name")
                .default_text(name)
                .required()
                .validator(name_validator),
        )
        .map_err(|e| {
            CommandError::Failed(format!("Expected a valid name for the machine pool: {}", e))
        })?;
    }
    let name = name.trim().to_string();
    let name_validator =
        validation::reg_exp(NAME_PATTERN).map_err(|e| CommandError::Failed(e.to_string()))?;
    if name.is_empty() || name_validator(&interactive::Answer::Text(name.clone())).is_err() {
        return Err(CommandError::Failed(
            "Expected a valid name for the machine pool, it must consist of lower-case \
             alphanumeric characters or '-', start with a letter and end with an alphanumeric \
             character"
                .to_string(),
        ));
    }

    let scaling = resolve_scaling(&args, rt)?;

    let mut instance_type = args.instance_type.clone();
    if args.interactive {
        instance_type = interactive::get_string(
            rt.prompter.as_ref(),
            Input::new("Instance type")
                .default_text(instance_type)
                .required(),
        )?;
    }

    let labels = parse_pairs(&args.labels, '=', "labels")?;
    let taints = parse_taints(&args.taints)?;
    let tags = parse_pairs(&args.tags, ':', "tags")?;

    let mut security_group_ids =
        helper::handle_empty_string_on_slice(&args.additional_security_group_ids);
    if security_group_ids.is_empty() && args.interactive {
        let options = get_security_groups_option(rt, &cluster).await?;
        if !options.is_empty() {
            security_group_ids = interactive::get_multiple_options(
                rt.prompter.as_ref(),
                Input::new("Additional Security Group IDs").options(options),
            )?;
        }
    }

    let aws = create_aws_node_pool_builder(&instance_type, &security_group_ids, &tags)
        .build()
        .map_err(|e| {
            CommandError::Failed(format!(
                "Failed to create machine pool for cluster '{}': {}",
                cluster_key, e
            ))
        })?;
    let pool = PoolBuilder::new(name.clone())
        .scaling(scaling)
        .labels(labels)
        .taints(taints);

    let control_plane = rt.control_plane()?;
    let added = if cluster.is_hypershift() {
        let mut subnet = args.subnet.clone();
        if subnet.is_none() && args.interactive && !cluster.subnet_ids().is_empty() {
            subnet = Some(interactive::get_option(
                rt.prompter.as_ref(),
                Input::new("Subnet ID").options(cluster.subnet_ids().to_vec()),
            )?);
        }
        let node_pool = pool.build_node_pool(aws, subnet).map_err(|e| {
            CommandError::Failed(format!(
                "Failed to create machine pool for cluster '{}': {}",
                cluster_key, e
            ))
        })?;
        info!(cluster = %cluster.id, pool = %name, "Creating node pool");
        control_plane
            .create_node_pool(&cluster.id, &node_pool)
            .await
            .map(|_| ())
    } else {
        let machine_pool = pool.build_machine_pool(aws).map_err(|e| {
            CommandError::Failed(format!(
                "Failed to create machine pool for cluster '{}': {}",
                cluster_key, e
            ))
        })?;
        info!(cluster = %cluster.id, pool = %name, "Creating machine pool");
        control_plane
            .create_machine_pool(&cluster.id, &machine_pool)
            .await
            .map(|_| ())
    };
    added.map_err(|e| {
        CommandError::Failed(format!(
            "Failed to add machine pool to cluster '{}': {}",
            cluster_key, e
        ))
    })?;

    rt.reporter.info(format!(
        "Machine pool '{}' created successfully on cluster '{}'",
        name, cluster_key
    ));
    rt.reporter.info(format!(
        "To view all machine pools, run 'pilvi list machinepools -c {}'",
        cluster_key
    ));
    Ok(())
}

#[cfg(test)]
#[path = "machinepool_test.rs"]
mod tests;
