//! Wire shapes for deploy output and cluster deployment descriptors
//!
//! The deploy engine reports the resources it applied; the assistant
//! extracts the externally reachable route and the workload identity
//! from that report. The `DeploymentConfig` descriptor mirrors the
//! fields the scale path reads and writes; everything else on the
//! cluster object is ignored on deserialization.

use serde::{Deserialize, Serialize};

/// Result of a deploy operation: the list of cluster resources the
/// deploy engine applied
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployOutput {
    #[serde(default)]
    pub applied_resources: Vec<AppliedResource>,
}

/// A single resource applied during deploy
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppliedResource {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: ResourceMeta,
    #[serde(default)]
    pub spec: AppliedSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppliedSpec {
    /// Externally reachable host, present on Route resources
    #[serde(default)]
    pub host: String,
}

impl DeployOutput {
    /// Host of the first applied resource of kind "Route"
    pub fn route_host(&self) -> Option<&str> {
        self.applied_resources
            .iter()
            .find(|r| r.kind == "Route")
            .map(|r| r.spec.host.as_str())
    }

    /// Name and namespace of the first applied resource of kind
    /// "DeploymentConfig"
    pub fn deployment_config(&self) -> Option<(&str, &str)> {
        self.applied_resources
            .iter()
            .find(|r| r.kind == "DeploymentConfig")
            .map(|r| (r.metadata.name.as_str(), r.metadata.namespace.as_str()))
    }
}

/// The cluster's runtime deployment record for one workload
///
/// Only the fields the scale path touches are modeled. `spec.replicas`
/// is the requested count, `status.availableReplicas` the observed one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentConfig {
    #[serde(default)]
    pub metadata: ResourceMeta,
    #[serde(default)]
    pub spec: DeploymentConfigSpec,
    #[serde(default)]
    pub status: DeploymentConfigStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentConfigSpec {
    #[serde(default)]
    pub replicas: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigStatus {
    #[serde(default)]
    pub available_replicas: i32,
}

/// List form returned by a descriptor query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeploymentConfigList {
    #[serde(default)]
    pub items: Vec<DeploymentConfig>,
}

impl DeploymentConfigList {
    /// Find the descriptor matching both name and namespace
    ///
    /// Matching on the pair disambiguates identically named workloads
    /// deployed across namespaces.
    pub fn find(&self, name: &str, namespace: &str) -> Option<&DeploymentConfig> {
        self.items
            .iter()
            .find(|dc| dc.metadata.name == name && dc.metadata.namespace == namespace)
    }
}
