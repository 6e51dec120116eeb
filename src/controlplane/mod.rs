//! Cluster-management control plane
//!
//! Commands talk to the control plane through the [`ClusterManager`] trait.
//! [`OcmClient`] is the HTTP implementation; tests substitute a recording fake.

pub mod client;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use client::OcmClient;
pub use types::{
    AwsNodePool, AwsNodePoolBuilder, BuildError, Cluster, ClusterState, Ingress, IngressBuilder,
    ListeningMethod, LoadBalancerType, MachinePool, NodePool, OidcConfig, PoolBuilder, Scaling,
    Taint,
};

#[derive(Debug, Error)]
pub enum ControlPlaneError {
    #[error("request to cluster-management API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("status is {status}, reason: {reason}")]
    Api { status: u16, reason: String },

    #[error("There is no cluster with identifier or name '{0}'")]
    ClusterNotFound(String),

    #[error("{0}")]
    Build(#[from] BuildError),
}

#[async_trait]
pub trait ClusterManager: Send + Sync {
    /// Look up a cluster by id, name or external id
    async fn get_cluster(&self, key: &str) -> Result<Cluster, ControlPlaneError>;

    async fn list_clusters(&self) -> Result<Vec<Cluster>, ControlPlaneError>;

    async fn create_ingress(
        &self,
        cluster_id: &str,
        ingress: &Ingress,
    ) -> Result<Ingress, ControlPlaneError>;

    async fn list_ingresses(&self, cluster_id: &str) -> Result<Vec<Ingress>, ControlPlaneError>;

    async fn delete_ingress(
        &self,
        cluster_id: &str,
        ingress_id: &str,
    ) -> Result<(), ControlPlaneError>;

    async fn create_node_pool(
        &self,
        cluster_id: &str,
        node_pool: &NodePool,
    ) -> Result<NodePool, ControlPlaneError>;

    async fn list_node_pools(&self, cluster_id: &str) -> Result<Vec<NodePool>, ControlPlaneError>;

    async fn delete_node_pool(
        &self,
        cluster_id: &str,
        node_pool_id: &str,
    ) -> Result<(), ControlPlaneError>;

    async fn create_machine_pool(
        &self,
        cluster_id: &str,
        machine_pool: &MachinePool,
    ) -> Result<MachinePool, ControlPlaneError>;

    async fn list_machine_pools(
        &self,
        cluster_id: &str,
    ) -> Result<Vec<MachinePool>, ControlPlaneError>;

    async fn delete_machine_pool(
        &self,
        cluster_id: &str,
        machine_pool_id: &str,
    ) -> Result<(), ControlPlaneError>;

    /// Whether any cluster's OIDC endpoint references `bucket_or_id`
    async fn has_cluster_using_oidc_config(
        &self,
        bucket_or_id: &str,
    ) -> Result<bool, ControlPlaneError>;

    async fn has_cluster_using_oidc_endpoint_url(
        &self,
        url: &str,
    ) -> Result<bool, ControlPlaneError>;

    async fn list_oidc_configs(&self) -> Result<Vec<OidcConfig>, ControlPlaneError>;

    async fn delete_hosted_oidc_config(&self, id: &str) -> Result<(), ControlPlaneError>;
}
