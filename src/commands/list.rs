//! `list` subcommands
//!
//! Each listing renders as a table by default or as JSON with `-o json`.
//! Empty listings print an info line instead of an empty table.

use crate::cli::{ClusterOutputArgs, OutputArgs};
use crate::commands::CommandError;
use crate::controlplane::{
    Cluster, ControlPlaneError, Ingress, ListeningMethod, MachinePool, NodePool, OidcConfig, Taint,
};
use crate::output::{render_json, render_table, yes_no, Format};
use crate::runtime::Runtime;
use serde::Serialize;
use std::collections::BTreeMap;

fn emit<T: Serialize>(
    rt: &Runtime,
    format: Format,
    items: &[T],
    empty: &str,
    headers: &[&str],
    row: impl Fn(&T) -> Vec<String>,
) -> Result<(), CommandError> {
    match format {
        Format::Json => {
            let json = render_json(items)
                .map_err(|e| CommandError::Failed(format!("Failed to render JSON: {}", e)))?;
            rt.reporter.print(json);
        }
        Format::Table if items.is_empty() => rt.reporter.info(empty),
        Format::Table => rt
            .reporter
            .print(render_table(headers, items.iter().map(row).collect())),
    }
    Ok(())
}

fn join_map(map: &BTreeMap<String, String>, separator: &str) -> String {
    map.iter()
        .map(|(k, v)| format!("{}{}{}", k, separator, v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn cluster_row(cluster: &Cluster) -> Vec<String> {
    vec![
        cluster.id.clone(),
        cluster.name.clone(),
        cluster.state.to_string(),
        if cluster.is_hypershift() {
            "Hosted CP"
        } else {
            "Classic"
        }
        .to_string(),
        cluster.region_id().to_string(),
    ]
}

fn ingress_row(ingress: &Ingress) -> Vec<String> {
    vec![
        ingress.id.clone(),
        ingress.dns_name.clone(),
        yes_no(ingress.listening == ListeningMethod::Internal),
        ingress.load_balancer_type.to_string(),
        yes_no(ingress.default),
        join_map(&ingress.route_selectors, "="),
    ]
}

fn replicas_column(replicas: Option<i32>, autoscaling: Option<(i32, i32)>) -> (String, String) {
    match autoscaling {
        Some((min, max)) => ("Yes".to_string(), format!("{}-{}", min, max)),
        None => ("No".to_string(), replicas.unwrap_or(0).to_string()),
    }
}

fn taints_column(taints: &[Taint]) -> String {
    taints
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn machine_pool_row(pool: &MachinePool) -> Vec<String> {
    let (autoscaling, replicas) = replicas_column(
        pool.replicas,
        pool.autoscaling
            .as_ref()
            .map(|a| (a.min_replicas, a.max_replicas)),
    );
    vec![
        pool.id.clone(),
        autoscaling,
        replicas,
        pool.instance_type.clone(),
        join_map(&pool.labels, "="),
        taints_column(&pool.taints),
    ]
}

fn node_pool_row(pool: &NodePool) -> Vec<String> {
    let (autoscaling, replicas) = replicas_column(
        pool.replicas,
        pool.autoscaling
            .as_ref()
            .map(|a| (a.min_replica, a.max_replica)),
    );
    vec![
        pool.id.clone(),
        autoscaling,
        replicas,
        pool.aws_node_pool
            .as_ref()
            .map(|aws| aws.instance_type.clone())
            .unwrap_or_default(),
        join_map(&pool.labels, "="),
        taints_column(&pool.taints),
        pool.subnet.clone().unwrap_or_default(),
    ]
}

fn oidc_config_row(config: &OidcConfig) -> Vec<String> {
    vec![
        config.id.clone(),
        yes_no(config.managed),
        yes_no(config.reusable),
        config.issuer_url.clone(),
        config.secret_arn.clone(),
    ]
}

pub async fn clusters(args: OutputArgs, rt: &Runtime) -> Result<(), CommandError> {
    let clusters = rt
        .control_plane()?
        .list_clusters()
        .await
        .map_err(|e| CommandError::Failed(format!("Failed to get clusters: {}", e)))?;
    emit(
        rt,
        args.output,
        &clusters,
        "No clusters available",
        &["ID", "NAME", "STATE", "TOPOLOGY", "REGION"],
        cluster_row,
    )
}

pub async fn ingresses(args: ClusterOutputArgs, rt: &Runtime) -> Result<(), CommandError> {
    let cluster_key = rt.cluster_key(args.cluster.as_deref())?;
    let cluster = rt.fetch_cluster(cluster_key).await?;
    let ingresses = rt
        .control_plane()?
        .list_ingresses(&cluster.id)
        .await
        .map_err(|e| {
            CommandError::Failed(format!(
                "Failed to get ingresses for cluster '{}': {}",
                cluster_key, e
            ))
        })?;
    emit(
        rt,
        args.output,
        &ingresses,
        &format!("There are no ingresses on cluster '{}'", cluster_key),
        &["ID", "APPLICATION ROUTER", "PRIVATE", "LB-TYPE", "DEFAULT", "ROUTE SELECTORS"],
        ingress_row,
    )
}

pub async fn machine_pools(args: ClusterOutputArgs, rt: &Runtime) -> Result<(), CommandError> {
    let cluster_key = rt.cluster_key(args.cluster.as_deref())?;
    let cluster = rt.fetch_cluster(cluster_key).await?;
    let control_plane = rt.control_plane()?;
    let list_error = |e: ControlPlaneError| {
        CommandError::Failed(format!(
            "Failed to get machine pools for cluster '{}': {}",
            cluster_key, e
        ))
    };
    let empty = format!("There are no machine pools on cluster '{}'", cluster_key);

    if cluster.is_hypershift() {
        let pools = control_plane
            .list_node_pools(&cluster.id)
            .await
            .map_err(list_error)?;
        emit(
            rt,
            args.output,
            &pools,
            &empty,
            &["ID", "AUTOSCALING", "REPLICAS", "INSTANCE TYPE", "LABELS", "TAINTS", "SUBNET"],
            node_pool_row,
        )
    } else {
        let pools = control_plane
            .list_machine_pools(&cluster.id)
            .await
            .map_err(list_error)?;
        emit(
            rt,
            args.output,
            &pools,
            &empty,
            &["ID", "AUTOSCALING", "REPLICAS", "INSTANCE TYPE", "LABELS", "TAINTS"],
            machine_pool_row,
        )
    }
}

pub async fn oidc_configs(args: OutputArgs, rt: &Runtime) -> Result<(), CommandError> {
    let configs = rt
        .control_plane()?
        .list_oidc_configs()
        .await
        .map_err(|e| CommandError::Failed(format!("Failed to get OIDC configs: {}", e)))?;
    emit(
        rt,
        args.output,
        &configs,
        "There are no OIDC configurations",
        &["ID", "MANAGED", "REUSABLE", "ISSUER URL", "SECRET ARN"],
        oidc_config_row,
    )
}
