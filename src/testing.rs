//! Recording fakes for unit tests
//!
//! Each fake shares its call log through an `Arc`, so a test can keep a clone
//! after handing the fake to a [`Runtime`] and inspect what was called.

use crate::cloud::{CloudError, CloudProvider, SecurityGroup, Subnet};
use crate::controlplane::{
    Cluster, ClusterManager, ControlPlaneError, Ingress, MachinePool, NodePool, OidcConfig,
};
use crate::interactive::{Answer, Input, PromptError, Prompter, ValidationError};
use crate::reporter::Reporter;
use crate::runtime::Runtime;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub const TEST_REGION: &str = "us-east-1";

#[allow(clippy::unwrap_used)]
fn push(log: &Arc<Mutex<Vec<String>>>, operation: &str, arg: &str) {
    let entry = format!("{} {}", operation, arg).trim_end().to_string();
    log.lock().unwrap().push(entry);
}

/// Prompter that answers from a fixed script
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Answer>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        ScriptedPrompter {
            answers: Mutex::new(answers.into()),
        }
    }

    #[allow(clippy::unwrap_used)]
    fn next(&self, input: &Input) -> Result<Answer, PromptError> {
        let answer = match self.answers.lock().unwrap().pop_front() {
            Some(answer) => answer,
            None => input
                .default
                .clone()
                .ok_or_else(|| PromptError::NoAnswer(input.question.clone()))?,
        };
        input.validate(&answer)?;
        Ok(answer)
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&self, input: &Input) -> Result<String, PromptError> {
        match self.next(input)? {
            Answer::Text(s) => Ok(s),
            other => Err(ValidationError::NotText(other.to_string()).into()),
        }
    }

    fn confirm(&self, input: &Input) -> Result<bool, PromptError> {
        match self.next(input)? {
            Answer::Bool(b) => Ok(b),
            other => Err(ValidationError::NotBool(other.to_string()).into()),
        }
    }

    fn select(&self, input: &Input) -> Result<String, PromptError> {
        match self.next(input)? {
            Answer::Text(s) if input.options.contains(&s) => Ok(s),
            Answer::Text(s) => Err(ValidationError::Invalid(format!(
                "'{}' is not one of [{}]",
                s,
                input.options.join(" ")
            ))
            .into()),
            other => Err(ValidationError::NotText(other.to_string()).into()),
        }
    }

    fn multi_select(&self, input: &Input) -> Result<Vec<String>, PromptError> {
        match self.next(input)? {
            Answer::Choices(values) => Ok(values),
            other => Err(ValidationError::NotChoices(other.to_string()).into()),
        }
    }
}

/// In-memory cloud provider
#[derive(Clone, Default)]
pub struct FakeCloud {
    calls: Arc<Mutex<Vec<String>>>,
    fail_on: Option<&'static str>,
    account_id: String,
    subnets: HashMap<String, Subnet>,
    security_groups: Vec<SecurityGroup>,
    providers: Vec<String>,
}

impl FakeCloud {
    /// Fail every call to the named operation
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    pub fn with_account(mut self, account_id: &str) -> Self {
        self.account_id = account_id.to_string();
        self
    }

    pub fn with_subnet(mut self, subnet: Subnet) -> Self {
        self.subnets.insert(subnet.subnet_id.clone(), subnet);
        self
    }

    pub fn with_security_groups(mut self, groups: Vec<SecurityGroup>) -> Self {
        self.security_groups = groups;
        self
    }

    pub fn with_provider(mut self, arn: &str) -> Self {
        self.providers.push(arn.to_string());
        self
    }

    #[allow(clippy::unwrap_used)]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, arg: &str) -> Result<(), CloudError> {
        push(&self.calls, operation, arg);
        if self.fail_on == Some(operation) {
            return Err(CloudError::CommandFailed {
                command: operation.to_string(),
                stderr: "AccessDenied".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CloudProvider for FakeCloud {
    async fn delete_secret(&self, arn: &str) -> Result<(), CloudError> {
        self.record("delete_secret", arn)
    }

    async fn delete_bucket(&self, name: &str) -> Result<(), CloudError> {
        self.record("delete_bucket", name)
    }

    async fn caller_account_id(&self) -> Result<String, CloudError> {
        self.record("caller_account_id", "")?;
        Ok(self.account_id.clone())
    }

    async fn oidc_provider_exists(&self, arn: &str) -> Result<bool, CloudError> {
        self.record("oidc_provider_exists", arn)?;
        Ok(self.providers.iter().any(|p| p == arn))
    }

    async fn delete_oidc_provider(&self, arn: &str) -> Result<(), CloudError> {
        self.record("delete_oidc_provider", arn)
    }

    async fn describe_subnet(&self, subnet_id: &str) -> Result<Subnet, CloudError> {
        self.record("describe_subnet", subnet_id)?;
        self.subnets
            .get(subnet_id)
            .cloned()
            .ok_or_else(|| CloudError::SubnetNotFound(subnet_id.to_string()))
    }

    async fn list_security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>, CloudError> {
        self.record("list_security_groups", vpc_id)?;
        Ok(self.security_groups.clone())
    }
}

/// In-memory control plane
#[derive(Clone, Default)]
pub struct FakeControlPlane {
    calls: Arc<Mutex<Vec<String>>>,
    fail_on: Option<&'static str>,
    clusters: Vec<Cluster>,
    ingresses: Vec<Ingress>,
    machine_pools: Vec<MachinePool>,
    node_pools: Vec<NodePool>,
    oidc_configs: Vec<OidcConfig>,
    oidc_in_use: bool,
    created: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl FakeControlPlane {
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    pub fn with_cluster(mut self, cluster: Cluster) -> Self {
        self.clusters.push(cluster);
        self
    }

    pub fn with_ingress(mut self, ingress: Ingress) -> Self {
        self.ingresses.push(ingress);
        self
    }

    pub fn with_machine_pool(mut self, pool: MachinePool) -> Self {
        self.machine_pools.push(pool);
        self
    }

    pub fn with_node_pool(mut self, pool: NodePool) -> Self {
        self.node_pools.push(pool);
        self
    }

    pub fn with_oidc_config(mut self, config: OidcConfig) -> Self {
        self.oidc_configs.push(config);
        self
    }

    /// Report every OIDC config and endpoint as used by a cluster
    pub fn with_oidc_in_use(mut self) -> Self {
        self.oidc_in_use = true;
        self
    }

    #[allow(clippy::unwrap_used)]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Request bodies sent to `create_*` operations
    #[allow(clippy::unwrap_used)]
    pub fn created(&self) -> Vec<serde_json::Value> {
        self.created.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, arg: &str) -> Result<(), ControlPlaneError> {
        push(&self.calls, operation, arg);
        if self.fail_on == Some(operation) {
            return Err(ControlPlaneError::Api {
                status: 500,
                reason: "internal error".to_string(),
            });
        }
        Ok(())
    }

    #[allow(clippy::unwrap_used)]
    fn store<T: serde::Serialize>(&self, value: &T) {
        self.created
            .lock()
            .unwrap()
            .push(serde_json::to_value(value).unwrap());
    }
}

#[async_trait]
impl ClusterManager for FakeControlPlane {
    async fn get_cluster(&self, key: &str) -> Result<Cluster, ControlPlaneError> {
        self.record("get_cluster", key)?;
        self.clusters
            .iter()
            .find(|c| c.id == key || c.name == key)
            .cloned()
            .ok_or_else(|| ControlPlaneError::ClusterNotFound(key.to_string()))
    }

    async fn list_clusters(&self) -> Result<Vec<Cluster>, ControlPlaneError> {
        self.record("list_clusters", "")?;
        Ok(self.clusters.clone())
    }

    async fn create_ingress(
        &self,
        cluster_id: &str,
        ingress: &Ingress,
    ) -> Result<Ingress, ControlPlaneError> {
        self.record("create_ingress", cluster_id)?;
        self.store(ingress);
        Ok(ingress.clone())
    }

    async fn list_ingresses(&self, cluster_id: &str) -> Result<Vec<Ingress>, ControlPlaneError> {
        self.record("list_ingresses", cluster_id)?;
        Ok(self.ingresses.clone())
    }

    async fn delete_ingress(
        &self,
        cluster_id: &str,
        ingress_id: &str,
    ) -> Result<(), ControlPlaneError> {
        self.record("delete_ingress", &format!("{}/{}", cluster_id, ingress_id))
    }

    async fn create_node_pool(
        &self,
        cluster_id: &str,
        node_pool: &NodePool,
    ) -> Result<NodePool, ControlPlaneError> {
        self.record("create_node_pool", cluster_id)?;
        self.store(node_pool);
        Ok(node_pool.clone())
    }

    async fn list_node_pools(&self, cluster_id: &str) -> Result<Vec<NodePool>, ControlPlaneError> {
        self.record("list_node_pools", cluster_id)?;
        Ok(self.node_pools.clone())
    }

    async fn delete_node_pool(
        &self,
        cluster_id: &str,
        node_pool_id: &str,
    ) -> Result<(), ControlPlaneError> {
        self.record("delete_node_pool", &format!("{}/{}", cluster_id, node_pool_id))
    }

    async fn create_machine_pool(
        &self,
        cluster_id: &str,
        machine_pool: &MachinePool,
    ) -> Result<MachinePool, ControlPlaneError> {
        self.record("create_machine_pool", cluster_id)?;
        self.store(machine_pool);
        Ok(machine_pool.clone())
    }

    async fn list_machine_pools(
        &self,
        cluster_id: &str,
    ) -> Result<Vec<MachinePool>, ControlPlaneError> {
        self.record("list_machine_pools", cluster_id)?;
        Ok(self.machine_pools.clone())
    }

    async fn delete_machine_pool(
        &self,
        cluster_id: &str,
        machine_pool_id: &str,
    ) -> Result<(), ControlPlaneError> {
        self.record(
            "delete_machine_pool",
            &format!("{}/{}", cluster_id, machine_pool_id),
        )
    }

    async fn has_cluster_using_oidc_config(
        &self,
        bucket_or_id: &str,
    ) -> Result<bool, ControlPlaneError> {
        self.record("has_cluster_using_oidc_config", bucket_or_id)?;
        Ok(self.oidc_in_use)
    }

    async fn has_cluster_using_oidc_endpoint_url(
        &self,
        url: &str,
    ) -> Result<bool, ControlPlaneError> {
        self.record("has_cluster_using_oidc_endpoint_url", url)?;
        Ok(self.oidc_in_use)
    }

    async fn list_oidc_configs(&self) -> Result<Vec<OidcConfig>, ControlPlaneError> {
        self.record("list_oidc_configs", "")?;
        Ok(self.oidc_configs.clone())
    }

    async fn delete_hosted_oidc_config(&self, id: &str) -> Result<(), ControlPlaneError> {
        self.record("delete_hosted_oidc_config", id)
    }
}

/// Capturing runtime in `TEST_REGION` backed by the given fakes
pub fn test_runtime(
    cloud: FakeCloud,
    control_plane: FakeControlPlane,
    answers: Vec<Answer>,
) -> Runtime {
    Runtime::new(
        Reporter::new_capture(),
        Box::new(ScriptedPrompter::new(answers)),
        Box::new(cloud),
        Some(Box::new(control_plane)),
        Some(TEST_REGION.to_string()),
    )
}
