//! Cluster-management API resources
//!
//! Field names follow the API's snake_case JSON. Request bodies are assembled
//! through the builders so that optional collections are only sent when set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    Conflict(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterState {
    Error,
    Hibernating,
    Installing,
    Pending,
    PoweringDown,
    Ready,
    Resuming,
    Uninstalling,
    Validating,
    Waiting,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClusterState::Error => "error",
            ClusterState::Hibernating => "hibernating",
            ClusterState::Installing => "installing",
            ClusterState::Pending => "pending",
            ClusterState::PoweringDown => "powering_down",
            ClusterState::Ready => "ready",
            ClusterState::Resuming => "resuming",
            ClusterState::Uninstalling => "uninstalling",
            ClusterState::Validating => "validating",
            ClusterState::Waiting => "waiting",
            ClusterState::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Reference to another API object by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oidc_endpoint_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAws {
    #[serde(default)]
    pub private_link: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subnet_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sts: Option<Sts>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypershift {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: ClusterState,
    #[serde(default)]
    pub multi_az: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<ObjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<ClusterAws>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypershift: Option<Hypershift>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
}

impl Cluster {
    pub fn is_private_link(&self) -> bool {
        self.aws.as_ref().is_some_and(|aws| aws.private_link)
    }

    /// Hosted control-plane clusters manage workers as node pools
    pub fn is_hypershift(&self) -> bool {
        self.hypershift.as_ref().is_some_and(|h| h.enabled)
    }

    pub fn subnet_ids(&self) -> &[String] {
        self.aws
            .as_ref()
            .map(|aws| aws.subnet_ids.as_slice())
            .unwrap_or_default()
    }

    pub fn region_id(&self) -> &str {
        self.region.as_ref().map(|r| r.id.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListeningMethod {
    Internal,
    External,
}

impl fmt::Display for ListeningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListeningMethod::Internal => f.write_str("internal"),
            ListeningMethod::External => f.write_str("external"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadBalancerType {
    Classic,
    Nlb,
}

impl fmt::Display for LoadBalancerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadBalancerType::Classic => f.write_str("classic"),
            LoadBalancerType::Nlb => f.write_str("nlb"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingress {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dns_name: String,
    pub listening: ListeningMethod,
    #[serde(default = "default_load_balancer")]
    pub load_balancer_type: LoadBalancerType,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub route_selectors: BTreeMap<String, String>,
    #[serde(default)]
    pub default: bool,
}

fn default_load_balancer() -> LoadBalancerType {
    LoadBalancerType::Classic
}

#[derive(Debug, Clone, Default)]
pub struct IngressBuilder {
    listening: Option<ListeningMethod>,
    load_balancer_type: Option<LoadBalancerType>,
    route_selectors: BTreeMap<String, String>,
}

impl IngressBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listening(mut self, listening: ListeningMethod) -> Self {
        self.listening = Some(listening);
        self
    }

    pub fn load_balancer_type(mut self, lb: LoadBalancerType) -> Self {
        self.load_balancer_type = Some(lb);
        self
    }

    pub fn route_selectors(mut self, selectors: BTreeMap<String, String>) -> Self {
        self.route_selectors = selectors;
        self
    }

    pub fn build(self) -> Result<Ingress, BuildError> {
        let listening = self.listening.ok_or(BuildError::MissingField("listening"))?;
        if self.route_selectors.keys().any(|k| k.is_empty()) {
            return Err(BuildError::Conflict(
                "route selector keys must not be empty".to_string(),
            ));
        }
        Ok(Ingress {
            id: String::new(),
            dns_name: String::new(),
            listening,
            load_balancer_type: self.load_balancer_type.unwrap_or(LoadBalancerType::Classic),
            route_selectors: self.route_selectors,
            default: false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taint {
    pub key: String,
    #[serde(default)]
    pub value: String,
    pub effect: String,
}

impl fmt::Display for Taint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}:{}", self.key, self.value, self.effect)
    }
}

/// Cloud-specific settings of a hosted control-plane node pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsNodePool {
    pub instance_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_security_group_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct AwsNodePoolBuilder {
    instance_type: Option<String>,
    additional_security_group_ids: Vec<String>,
    tags: BTreeMap<String, String>,
}

impl AwsNodePoolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instance_type(mut self, instance_type: impl Into<String>) -> Self {
        self.instance_type = Some(instance_type.into());
        self
    }

    pub fn additional_security_group_ids(mut self, ids: Vec<String>) -> Self {
        self.additional_security_group_ids = ids;
        self
    }

    pub fn tags(mut self, tags: BTreeMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn build(self) -> Result<AwsNodePool, BuildError> {
        let instance_type = self
            .instance_type
            .filter(|t| !t.is_empty())
            .ok_or(BuildError::MissingField("instance_type"))?;
        Ok(AwsNodePool {
            instance_type,
            additional_security_group_ids: self.additional_security_group_ids,
            tags: self.tags,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePoolAutoscaling {
    pub min_replica: i32,
    pub max_replica: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePool {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscaling: Option<NodePoolAutoscaling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_node_pool: Option<AwsNodePool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taints: Vec<Taint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachinePoolAutoscaling {
    pub min_replicas: i32,
    pub max_replicas: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsMachinePool {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_security_group_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachinePool {
    pub id: String,
    #[serde(default)]
    pub instance_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscaling: Option<MachinePoolAutoscaling>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taints: Vec<Taint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsMachinePool>,
}

/// Replica count or autoscaling bounds, never both
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    Fixed(i32),
    Autoscaling { min: i32, max: i32 },
}

#[derive(Debug, Clone, Default)]
pub struct PoolBuilder {
    id: String,
    scaling: Option<Scaling>,
    labels: BTreeMap<String, String>,
    taints: Vec<Taint>,
}

impl PoolBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        PoolBuilder {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn scaling(mut self, scaling: Scaling) -> Self {
        self.scaling = Some(scaling);
        self
    }

    pub fn labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn taints(mut self, taints: Vec<Taint>) -> Self {
        self.taints = taints;
        self
    }

    fn validate(&self) -> Result<Scaling, BuildError> {
        if self.id.is_empty() {
            return Err(BuildError::MissingField("id"));
        }
        let scaling = self.scaling.ok_or(BuildError::MissingField("replicas"))?;
        if let Scaling::Autoscaling { min, max } = scaling {
            if min > max {
                return Err(BuildError::Conflict(format!(
                    "max-replicas ({}) must be greater than or equal to min-replicas ({})",
                    max, min
                )));
            }
        }
        Ok(scaling)
    }

    /// Node pool for a hosted control-plane cluster
    pub fn build_node_pool(
        self,
        aws: AwsNodePool,
        subnet: Option<String>,
    ) -> Result<NodePool, BuildError> {
        let scaling = self.validate()?;
        let (replicas, autoscaling) = match scaling {
            Scaling::Fixed(n) => (Some(n), None),
            Scaling::Autoscaling { min, max } => (
                None,
                Some(NodePoolAutoscaling {
                    min_replica: min,
                    max_replica: max,
                }),
            ),
        };
        Ok(NodePool {
            id: self.id,
            replicas,
            autoscaling,
            aws_node_pool: Some(aws),
            subnet: subnet.filter(|s| !s.is_empty()),
            labels: self.labels,
            taints: self.taints,
        })
    }

    /// Machine pool for a classic cluster
    pub fn build_machine_pool(self, aws: AwsNodePool) -> Result<MachinePool, BuildError> {
        let scaling = self.validate()?;
        let (replicas, autoscaling) = match scaling {
            Scaling::Fixed(n) => (Some(n), None),
            Scaling::Autoscaling { min, max } => (
                None,
                Some(MachinePoolAutoscaling {
                    min_replicas: min,
                    max_replicas: max,
                }),
            ),
        };
        let machine_aws = if aws.additional_security_group_ids.is_empty() && aws.tags.is_empty() {
            None
        } else {
            Some(AwsMachinePool {
                additional_security_group_ids: aws.additional_security_group_ids,
                tags: aws.tags,
            })
        };
        Ok(MachinePool {
            id: self.id,
            instance_type: aws.instance_type,
            replicas,
            autoscaling,
            labels: self.labels,
            taints: self.taints,
            aws: machine_aws,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OidcConfig {
    pub id: String,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub reusable: bool,
    #[serde(default)]
    pub issuer_url: String,
    #[serde(default)]
    pub secret_arn: String,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
