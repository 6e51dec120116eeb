//! `delete ingress`

use crate::cli::DeleteResourceArgs;
use crate::commands::{confirm, CommandError};
use crate::runtime::Runtime;
use tracing::info;

pub async fn run(args: DeleteResourceArgs, rt: &Runtime) -> Result<(), CommandError> {
    let cluster_key = rt.cluster_key(args.cluster.as_deref())?;
    let ingress_id = args.id.trim();
    if ingress_id.is_empty() {
        return Err(CommandError::Failed(
            "Expected a valid ingress identifier".to_string(),
        ));
    }

    let cluster = rt.fetch_cluster(cluster_key).await?;
    let control_plane = rt.control_plane()?;
    let ingresses = control_plane
        .list_ingresses(&cluster.id)
        .await
        .map_err(|e| {
            CommandError::Failed(format!(
                "Failed to get ingresses for cluster '{}': {}",
                cluster_key, e
            ))
        })?;

    let ingress = ingresses
        .iter()
        .find(|i| i.id == ingress_id)
        .ok_or_else(|| {
            CommandError::Failed(format!(
                "Failed to get ingress '{}' for cluster '{}'",
                ingress_id, cluster_key
            ))
        })?;
    if ingress.default {
        return Err(CommandError::Failed(format!(
            "Ingress '{}' is the default ingress of cluster '{}' and cannot be deleted",
            ingress_id, cluster_key
        )));
    }

    if !confirm(
        rt,
        args.yes,
        format!(
            "Are you sure you want to delete ingress '{}' on cluster '{}'?",
            ingress_id, cluster_key
        ),
    )? {
        return Ok(());
    }

    info!(cluster = %cluster.id, ingress = %ingress_id, "Deleting ingress");
    control_plane
        .delete_ingress(&cluster.id, ingress_id)
        .await
        .map_err(|e| {
            CommandError::Failed(format!(
                "Failed to delete ingress '{}' on cluster '{}': {}",
                ingress_id, cluster_key, e
            ))
        })?;

    rt.reporter.info(format!(
        "Successfully deleted ingress '{}' from cluster '{}'",
        ingress_id, cluster_key
    ));
    Ok(())
}
