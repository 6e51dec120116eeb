//! `delete machinepool`
//!
//! Node pools on hosted control-plane clusters, machine pools elsewhere.

use crate::cli::DeleteResourceArgs;
use crate::commands::{confirm, CommandError};
use crate::controlplane::ControlPlaneError;
use crate::runtime::Runtime;
use tracing::info;

pub async fn run(args: DeleteResourceArgs, rt: &Runtime) -> Result<(), CommandError> {
    let cluster_key = rt.cluster_key(args.cluster.as_deref())?;
    let pool_id = args.id.trim();
    if pool_id.is_empty() {
        return Err(CommandError::Failed(
            "Expected a valid machine pool identifier".to_string(),
        ));
    }

    let cluster = rt.fetch_cluster(cluster_key).await?;
    let control_plane = rt.control_plane()?;
    let hypershift = cluster.is_hypershift();

    let list_error = |e: ControlPlaneError| {
        CommandError::Failed(format!(
            "Failed to get machine pools for cluster '{}': {}",
            cluster_key, e
        ))
    };
    let exists = if hypershift {
        control_plane
            .list_node_pools(&cluster.id)
            .await
            .map_err(list_error)?
            .iter()
            .any(|p| p.id == pool_id)
    } else {
        control_plane
            .list_machine_pools(&cluster.id)
            .await
            .map_err(list_error)?
            .iter()
            .any(|p| p.id == pool_id)
    };
    if !exists {
        return Err(CommandError::Failed(format!(
            "Failed to get machine pool '{}' for cluster '{}'",
            pool_id, cluster_key
        )));
    }

    if !confirm(
        rt,
        args.yes,
        format!(
            "Are you sure you want to delete machine pool '{}' on cluster '{}'?",
            pool_id, cluster_key
        ),
    )? {
        return Ok(());
    }

    info!(cluster = %cluster.id, pool = %pool_id, hypershift, "Deleting machine pool");
    let deleted = if hypershift {
        control_plane.delete_node_pool(&cluster.id, pool_id).await
    } else {
        control_plane.delete_machine_pool(&cluster.id, pool_id).await
    };
    deleted.map_err(|e| {
        CommandError::Failed(format!(
            "Failed to delete machine pool '{}' on cluster '{}': {}",
            pool_id, cluster_key, e
        ))
    })?;

    rt.reporter.info(format!(
        "Successfully deleted machine pool '{}' from cluster '{}'",
        pool_id, cluster_key
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controlplane::types::Hypershift;
    use crate::controlplane::{Cluster, ClusterState, MachinePool, NodePool};
    use crate::testing::{test_runtime, FakeCloud, FakeControlPlane};

    fn cluster(hypershift: bool) -> Cluster {
        Cluster {
            id: "2a8v0i1kq".to_string(),
            name: "mycluster".to_string(),
            state: ClusterState::Ready,
            hypershift: Some(Hypershift {
                enabled: hypershift,
            }),
            ..Default::default()
        }
    }

    fn args(id: &str) -> DeleteResourceArgs {
        DeleteResourceArgs {
            id: id.to_string(),
            cluster: Some("mycluster".to_string()),
            yes: true,
        }
    }

    #[tokio::test]
    async fn test_deletes_machine_pool_on_classic_cluster() {
        let control_plane = FakeControlPlane::default()
            .with_cluster(cluster(false))
            .with_machine_pool(MachinePool {
                id: "workers".to_string(),
                ..Default::default()
            });
        let rt = test_runtime(FakeCloud::default(), control_plane.clone(), vec![]);

        run(args("workers"), &rt).await.unwrap();

        assert_eq!(
            control_plane.calls(),
            vec![
                "get_cluster mycluster",
                "list_machine_pools 2a8v0i1kq",
                "delete_machine_pool 2a8v0i1kq/workers",
            ]
        );
        assert_eq!(
            rt.reporter.captured(),
            vec!["I: Successfully deleted machine pool 'workers' from cluster 'mycluster'"]
        );
    }

    #[tokio::test]
    async fn test_deletes_node_pool_on_hosted_cluster() {
        let control_plane = FakeControlPlane::default()
            .with_cluster(cluster(true))
            .with_node_pool(NodePool {
                id: "workers".to_string(),
                ..Default::default()
            });
        let rt = test_runtime(FakeCloud::default(), control_plane.clone(), vec![]);

        run(args("workers"), &rt).await.unwrap();

        assert_eq!(
            control_plane.calls()[1..],
            [
                "list_node_pools 2a8v0i1kq".to_string(),
                "delete_node_pool 2a8v0i1kq/workers".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_pool() {
        let control_plane = FakeControlPlane::default().with_cluster(cluster(false));
        let rt = test_runtime(FakeCloud::default(), control_plane, vec![]);

        let err = run(args("workers"), &rt).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to get machine pool 'workers' for cluster 'mycluster'"
        );
    }

    #[tokio::test]
    async fn test_declined_confirmation_keeps_pool() {
        let control_plane = FakeControlPlane::default()
            .with_cluster(cluster(false))
            .with_machine_pool(MachinePool {
                id: "workers".to_string(),
                ..Default::default()
            });
        let rt = test_runtime(FakeCloud::default(), control_plane.clone(), vec![]);
        let args = DeleteResourceArgs {
            yes: false,
            ..args("workers")
        };

        run(args, &rt).await.unwrap();

        assert_eq!(control_plane.calls().len(), 2);
    }
}
