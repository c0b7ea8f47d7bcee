//! Replica convergence
//!
//! Scaling submits the requested replica count to the cluster, then
//! polls the observed available-replica count until it matches. The
//! descriptor is re-fetched on every attempt so the loop follows the
//! cluster's view, not a cached one.

use crate::error::AssistantError;
use crate::poll::Poller;
use crate::resources::{DeploymentConfig, DeploymentConfigList};
use async_trait::async_trait;
use tracing::{debug, info};

/// Query and update access to cluster deployment descriptors
///
/// The cluster-backed implementation lives in [`crate::client`]; tests
/// substitute scripted implementations.
#[async_trait]
pub trait DeploymentConfigs: Send + Sync {
    /// List deployment descriptors across all namespaces
    async fn find_all(&self) -> Result<DeploymentConfigList, AssistantError>;

    /// Submit an updated descriptor to the cluster
    async fn update(&self, name: &str, descriptor: &DeploymentConfig)
        -> Result<(), AssistantError>;
}

async fn find_named(
    api: &dyn DeploymentConfigs,
    name: &str,
    namespace: &str,
) -> Result<DeploymentConfig, AssistantError> {
    api.find_all().await?.find(name, namespace).cloned().ok_or_else(|| {
        AssistantError::Upstream(format!(
            "DeploymentConfig {name:?} not found in namespace {namespace:?}"
        ))
    })
}

/// Scale the named workload and wait for the observed replica count to
/// converge on the requested one
///
/// The readiness probe that follows a scale-up is the caller's
/// responsibility; scaling to zero needs no probe at all.
pub async fn scale_to(
    api: &dyn DeploymentConfigs,
    name: &str,
    namespace: &str,
    replicas: i32,
    poller: Poller,
) -> Result<(), AssistantError> {
    debug!(
        name = %name,
        namespace = %namespace,
        replicas = replicas,
        "Submitting replica count"
    );

    let mut descriptor = find_named(api, name, namespace).await?;
    descriptor.spec.replicas = replicas;
    api.update(name, &descriptor).await?;

    poller
        .run(move || async move {
            let observed = find_named(api, name, namespace)
                .await?
                .status
                .available_replicas;
            debug!(
                name = %name,
                observed = observed,
                desired = replicas,
                "Replica convergence check"
            );
            Ok(observed == replicas)
        })
        .await?;

    info!(
        name = %name,
        namespace = %namespace,
        replicas = replicas,
        "Replica count converged"
    );
    Ok(())
}
