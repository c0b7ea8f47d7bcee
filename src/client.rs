//! Cluster client bootstrap and the kube-backed descriptor API
//!
//! Client construction is expensive (kubeconfig discovery plus TLS
//! setup), so the provider builds it at most once per assistant and
//! hands out clones of the cached handle. TLS verification is disabled
//! by policy: test clusters routinely run with self-signed certs.

use crate::error::AssistantError;
use crate::resources::{DeploymentConfig, DeploymentConfigList};
use crate::scale::DeploymentConfigs;
use async_trait::async_trait;
use kube::api::{Api, DynamicObject, ListParams, Patch, PatchParams};
use kube::core::ApiResource;
use kube::Client;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Lazily constructed, memoized cluster client
///
/// The first call to [`get`](Self::get) discovers the local cluster
/// config and builds the client; every later call returns the cached
/// handle without re-authenticating. Concurrent first callers observe
/// the same in-flight construction. A failed construction is not
/// cached, so a later call may retry.
#[derive(Default)]
pub struct RestClientProvider {
    client: OnceCell<Client>,
}

impl RestClientProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cluster client, constructing it on first use
    pub async fn get(&self) -> Result<Client, AssistantError> {
        self.client
            .get_or_try_init(|| async {
                debug!("Constructing cluster client from local config");
                let mut config = kube::Config::infer()
                    .await
                    .map_err(|e| AssistantError::Client(e.to_string()))?;
                config.accept_invalid_certs = true;
                let client = Client::try_from(config)
                    .map_err(|e| AssistantError::Client(e.to_string()))?;
                info!("Cluster client ready");
                Ok(client)
            })
            .await
            .cloned()
    }
}

fn deployment_config_resource() -> ApiResource {
    ApiResource {
        group: "apps.openshift.io".to_string(),
        version: "v1".to_string(),
        api_version: "apps.openshift.io/v1".to_string(),
        kind: "DeploymentConfig".to_string(),
        plural: "deploymentconfigs".to_string(),
    }
}

/// Descriptor API served by the cluster through the shared client
pub struct KubeDeploymentConfigs {
    provider: RestClientProvider,
}

impl KubeDeploymentConfigs {
    pub fn new(provider: RestClientProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl DeploymentConfigs for KubeDeploymentConfigs {
    async fn find_all(&self) -> Result<DeploymentConfigList, AssistantError> {
        let client = self.provider.get().await?;
        let api: Api<DynamicObject> = Api::all_with(client, &deployment_config_resource());

        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|e| AssistantError::Upstream(e.to_string()))?;

        let items = list
            .items
            .into_iter()
            .filter_map(|obj| {
                serde_json::to_value(&obj)
                    .ok()
                    .and_then(|v| serde_json::from_value::<DeploymentConfig>(v).ok())
            })
            .collect();

        Ok(DeploymentConfigList { items })
    }

    async fn update(
        &self,
        name: &str,
        descriptor: &DeploymentConfig,
    ) -> Result<(), AssistantError> {
        let client = self.provider.get().await?;
        let api: Api<DynamicObject> = Api::namespaced_with(
            client,
            &descriptor.metadata.namespace,
            &deployment_config_resource(),
        );

        // Merge patch: the descriptor carries only the fields we own,
        // so a full replace would clobber server-managed state
        api.patch(name, &PatchParams::default(), &Patch::Merge(descriptor))
            .await
            .map_err(|e| AssistantError::Upstream(e.to_string()))?;

        debug!(
            name = %name,
            namespace = %descriptor.metadata.namespace,
            replicas = descriptor.spec.replicas,
            "Submitted descriptor update"
        );
        Ok(())
    }
}
